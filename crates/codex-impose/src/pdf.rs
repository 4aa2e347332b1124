//! PDF import adapter
//!
//! Turns PDF files into [`VirtualDocument`]s whose pages reference the
//! source pages by position. Only the page geometry is read here; page
//! content stays in the file for a renderer to pick up.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::content::{Content, VirtualDocument, VirtualPage};
use crate::geometry::Dimensions;
use crate::types::*;

/// Pages nest only a few levels deep; a longer Parent chain is malformed
const MAX_PARENT_DEPTH: usize = 32;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Load multiple PDF documents
pub async fn load_multiple_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        documents.push(load_pdf(path).await?);
    }
    Ok(documents)
}

/// Build the virtual counterpart of a loaded PDF
///
/// `index` identifies the document among all sources and ends up in every
/// [`SourcePage`](crate::content::SourcePage) reference.
pub fn import_pdf(doc: &Document, index: usize) -> Result<VirtualDocument> {
    let mut builder = VirtualDocument::builder();
    for (page, page_id) in doc.get_pages().into_values().enumerate() {
        let dimensions = get_page_dimensions(doc, page_id)?;
        builder.add_page(VirtualPage::with_content(
            dimensions,
            Content::source_page(index, page, dimensions),
        ));
    }
    log::debug!("Imported document {} with {} pages", index, builder.len());
    Ok(builder.build())
}

/// Import several loaded PDFs, numbering them in order
pub fn import_pdfs(docs: &[Document]) -> Result<Vec<VirtualDocument>> {
    docs.iter()
        .enumerate()
        .map(|(index, doc)| import_pdf(doc, index))
        .collect()
}

/// Page size from its MediaBox, inherited from parent nodes if needed
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<Dimensions> {
    let mut dict = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PARENT_DEPTH {
        if let Some(dimensions) = media_box(dict) {
            return dimensions;
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => dict = doc.get_dictionary(parent)?,
            Err(_) => break,
        }
    }

    Dimensions::from_pt(DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
}

fn media_box(dict: &Dictionary) -> Option<Result<Dimensions>> {
    let mb = dict.get(b"MediaBox").and_then(Object::as_array).ok()?;
    let coords: Vec<f64> = mb.iter().filter_map(extract_number).collect();
    match coords.as_slice() {
        [x0, y0, x1, y1] => Some(Dimensions::from_pt((x1 - x0).abs(), (y1 - y0).abs())),
        _ => None,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
