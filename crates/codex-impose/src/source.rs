//! Content assignment
//!
//! A [`SourceProvider`] pops content off a single queue into page slots,
//! dispatching on the page kind. A [`LayeredSourceProvider`] keeps one queue
//! per source document and fills the layers of stacked pages side by side.
//!
//! Running out of content is not an error: the remaining slots stay blank
//! and a warning is recorded.

use std::collections::VecDeque;

use crate::content::{SharedContent, VirtualDocument};
use crate::diagnostics::{Diagnostics, Warning};
use crate::model::{Page, PageKind, Pagelet};
use crate::types::{ImposeError, Result};

/// A single queue of content. Queue entries may be deliberate blanks.
#[derive(Debug, Clone, Default)]
pub struct SourceProvider {
    queue: VecDeque<Option<SharedContent>>,
}

impl SourceProvider {
    pub fn new(document: &VirtualDocument) -> Self {
        Self {
            queue: document.pages().iter().cloned().map(Some).collect(),
        }
    }

    /// The pages of all documents, one after the other
    pub fn from_documents(documents: &[VirtualDocument]) -> Self {
        Self {
            queue: documents
                .iter()
                .flat_map(|d| d.pages().iter().cloned())
                .map(Some)
                .collect(),
        }
    }

    /// Queue `count` blank pages ahead of the content
    pub fn push_front_blanks(&mut self, count: usize) {
        for _ in 0..count {
            self.queue.push_front(None);
        }
    }

    /// Queue `count` blank pages after the content
    pub fn push_back_blanks(&mut self, count: usize) {
        self.queue.extend(std::iter::repeat_n(None, count));
    }

    /// Drop everything past the first `len` entries. Returns how many were dropped.
    pub fn truncate(&mut self, len: usize) -> usize {
        let dropped = self.queue.len().saturating_sub(len);
        self.queue.truncate(len);
        dropped
    }

    /// Entries not yet assigned
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Fill every slot of `page`
    ///
    /// Multi pages are abstract and rejected; grid and stacked pages take one
    /// entry per pagelet in their stored order.
    pub fn fill_page(&mut self, page: &mut Page, diagnostics: &mut Diagnostics) -> Result<()> {
        let number = page.number();
        let (filled, slots) = match page.kind_mut() {
            PageKind::Single(single) => match self.queue.pop_front() {
                Some(content) => {
                    single.set_content(content);
                    (1, 1)
                }
                None => (0, 1),
            },
            PageKind::Multi(_) => return Err(ImposeError::AbstractPage),
            PageKind::Grid(grid) => self.fill_pagelets(grid.pagelets_mut()),
            PageKind::Stacked(stacked) => self.fill_pagelets(stacked.layers_mut()),
        };

        if filled < slots {
            diagnostics.warn(Warning::ContentExhausted {
                page: number,
                filled,
                slots,
            });
        }
        Ok(())
    }

    fn fill_pagelets(&mut self, pagelets: &mut [Pagelet]) -> (usize, usize) {
        let mut filled = 0;
        for pagelet in pagelets.iter_mut() {
            let Some(content) = self.queue.pop_front() else {
                break;
            };
            pagelet.set_content(content);
            filled += 1;
        }
        (filled, pagelets.len())
    }

    /// Fill pages in the given order. Warns once per page that runs short.
    pub fn fill<'a>(
        &mut self,
        pages: impl IntoIterator<Item = &'a mut Page>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        for page in pages {
            self.fill_page(page, diagnostics)?;
        }
        Ok(())
    }
}

/// One queue per source document, each feeding one layer of stacked pages
#[derive(Debug, Clone, Default)]
pub struct LayeredSourceProvider {
    layers: Vec<VecDeque<SharedContent>>,
}

impl LayeredSourceProvider {
    pub fn new(documents: &[VirtualDocument]) -> Self {
        Self {
            layers: documents
                .iter()
                .map(|d| d.pages().iter().cloned().collect())
                .collect(),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Entries not yet assigned, per layer
    pub fn remaining(&self) -> Vec<usize> {
        self.layers.iter().map(VecDeque::len).collect()
    }

    /// Fill layer `i` of a stacked page from queue `i`
    ///
    /// A layer whose queue has run dry stays blank with a warning. Layers
    /// beyond the number of queues stay blank silently.
    pub fn fill_page(&mut self, page: &mut Page, diagnostics: &mut Diagnostics) -> Result<()> {
        let number = page.number();
        let stacked = match page.kind_mut() {
            PageKind::Stacked(stacked) => stacked,
            other => return Err(ImposeError::UnsupportedPage(other.name())),
        };

        for (layer, pagelet) in stacked.layers_mut().iter_mut().enumerate() {
            let Some(queue) = self.layers.get_mut(layer) else {
                break;
            };
            match queue.pop_front() {
                Some(content) => pagelet.set_content(Some(content)),
                None => diagnostics.warn(Warning::LayerExhausted {
                    layer,
                    page: number,
                }),
            }
        }
        Ok(())
    }

    pub fn fill<'a>(
        &mut self,
        pages: impl IntoIterator<Item = &'a mut Page>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        for page in pages {
            self.fill_page(page, diagnostics)?;
        }
        Ok(())
    }
}
