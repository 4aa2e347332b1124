//! Abstract content model
//!
//! Import adapters produce a [`VirtualDocument`], render adapters consume
//! one. The imposition core never looks inside a content item beyond its
//! transform: each [`ContentKind`] is handed to format-specific renderers
//! untouched.

use std::sync::Arc;

use crate::geometry::{Dimensions, Point, Transform};

/// Content shared between a source document and the slots it is assigned to
pub type SharedContent = Arc<VirtualPage>;

/// A page of a source document, identified by position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePage {
    /// Index of the source document among all inputs
    pub document: usize,
    /// Zero-based page index inside that document
    pub page: usize,
    /// Size of the source page
    pub dimensions: Dimensions,
}

/// Kind of printer's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkKind {
    /// Where the paper is folded (drawn dashed)
    Fold,
    /// Where the paper is cut (drawn solid)
    Cut,
}

/// A printer's mark: a straight stroke in the local coordinates of its page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mark {
    pub kind: MarkKind,
    pub from: Point,
    pub to: Point,
}

/// The closed set of content kinds renderers must handle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind {
    SourcePage(SourcePage),
    Mark(Mark),
}

/// A positioned content item
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Content {
    /// Maps the item's own coordinates into those of the page holding it
    pub transform: Transform,
    pub kind: ContentKind,
}

impl Content {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind,
        }
    }

    pub fn source_page(document: usize, page: usize, dimensions: Dimensions) -> Self {
        Self::new(ContentKind::SourcePage(SourcePage {
            document,
            page,
            dimensions,
        }))
    }

    pub fn mark(kind: MarkKind, from: Point, to: Point) -> Self {
        Self::new(ContentKind::Mark(Mark { kind, from, to }))
    }

    /// The same item placed through `outer` as well
    pub fn transformed(&self, outer: &Transform) -> Content {
        Content {
            transform: self.transform.then(outer),
            kind: self.kind.clone(),
        }
    }

    pub fn as_source_page(&self) -> Option<&SourcePage> {
        match &self.kind {
            ContentKind::SourcePage(page) => Some(page),
            ContentKind::Mark(_) => None,
        }
    }
}

/// A page of abstract content: a size and an unordered bag of positioned items
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualPage {
    dimensions: Dimensions,
    contents: Vec<Content>,
}

impl VirtualPage {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            contents: Vec::new(),
        }
    }

    pub fn with_content(dimensions: Dimensions, content: Content) -> Self {
        Self {
            dimensions,
            contents: vec![content],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn add_content(&mut self, content: Content) {
        self.contents.push(content);
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// All items of this page, placed through `outer`
    pub fn placed<'a>(&'a self, outer: &'a Transform) -> impl Iterator<Item = Content> + 'a {
        self.contents.iter().map(move |c| c.transformed(outer))
    }

    /// Source pages referenced on this page, in insertion order
    pub fn source_pages(&self) -> impl Iterator<Item = &SourcePage> {
        self.contents.iter().filter_map(Content::as_source_page)
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.contents.iter().filter_map(|c| match &c.kind {
            ContentKind::Mark(mark) => Some(mark),
            ContentKind::SourcePage(_) => None,
        })
    }
}

impl Extend<Content> for VirtualPage {
    fn extend<I: IntoIterator<Item = Content>>(&mut self, iter: I) {
        self.contents.extend(iter);
    }
}

/// An ordered sequence of virtual pages
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualDocument {
    pages: Vec<SharedContent>,
}

impl VirtualDocument {
    pub fn builder() -> VirtualDocumentBuilder {
        VirtualDocumentBuilder::default()
    }

    /// A document whose pages each reference one page of source `document`
    pub fn from_source(document: usize, page_count: usize, dimensions: Dimensions) -> Self {
        let mut builder = Self::builder();
        for page in 0..page_count {
            builder.add_page(VirtualPage::with_content(
                dimensions,
                Content::source_page(document, page, dimensions),
            ));
        }
        builder.build()
    }

    /// Concatenate documents in order
    pub fn concat<'a>(documents: impl IntoIterator<Item = &'a VirtualDocument>) -> Self {
        Self {
            pages: documents
                .into_iter()
                .flat_map(|d| d.pages.iter().cloned())
                .collect(),
        }
    }

    pub fn pages(&self) -> &[SharedContent] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&VirtualPage> {
        self.pages.get(index).map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Accumulates pages; consumed by [`VirtualDocumentBuilder::build`]
#[derive(Debug, Default)]
pub struct VirtualDocumentBuilder {
    pages: Vec<SharedContent>,
}

impl VirtualDocumentBuilder {
    pub fn add_page(&mut self, page: VirtualPage) -> &mut Self {
        self.pages.push(Arc::new(page));
        self
    }

    pub fn add_shared(&mut self, page: SharedContent) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn build(self) -> VirtualDocument {
        VirtualDocument { pages: self.pages }
    }
}
