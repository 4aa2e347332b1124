//! Non-fatal diagnostics collected while building an imposition
//!
//! Shape mismatches between the content and the layout (a short source,
//! a missing overlay layer, padding) never abort the run. They are recorded
//! here and forwarded to the `log` facade, so the caller decides how to
//! surface them.

use thiserror::Error;

/// A recoverable condition encountered while imposing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("page count {requested} padded to {padded} with blank pages")]
    PagesPadded { requested: usize, padded: usize },
    #[error("content ran out on page {}: filled {filled} of {slots} slots", display_page(.page))]
    ContentExhausted {
        page: Option<u32>,
        filled: usize,
        slots: usize,
    },
    #[error("layer {layer} ran out of content on page {}", display_page(.page))]
    LayerExhausted { layer: usize, page: Option<u32> },
    #[error("{declared} layers declared but only {provided} sources provided")]
    MissingLayers { declared: usize, provided: usize },
    #[error("{remaining} source pages were not placed")]
    UnusedContent { remaining: usize },
}

fn display_page(page: &Option<u32>) -> String {
    page.map_or_else(|| "(unnumbered)".to_string(), |n| n.to_string())
}

/// Handle threaded through imposition operations to collect warnings
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and forward it to the logger
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Take all collected warnings, leaving the handle empty
    pub fn drain(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
