//! Imposition schemes
//!
//! This module orchestrates the imposition process:
//! 1. Resolve options against the sources
//! 2. Build the page slots of the chosen scheme
//! 3. Assign source content to the slots
//! 4. Render the output sides into a virtual document

mod booklet;
mod nup;
mod overlay;

pub use booklet::Booklet;
pub use nup::NUp;
pub use overlay::Overlay;

use crate::content::VirtualDocument;
use crate::diagnostics::Diagnostics;
use crate::options::ImpositionOptions;
use crate::source::{LayeredSourceProvider, SourceProvider};
use crate::stats::calculate_statistics;
use crate::types::*;

/// Rendered output of an imposition run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Imposition {
    pub statistics: ImpositionStatistics,
    pub document: VirtualDocument,
}

/// Main imposition function
///
/// Booklet and N-up read the sources one after the other; overlay uses one
/// layer per source.
pub fn impose(
    options: &ImpositionOptions,
    sources: &[VirtualDocument],
    diagnostics: &mut Diagnostics,
) -> Result<Imposition> {
    options.validate()?;

    let page_counts: Vec<usize> = sources.iter().map(VirtualDocument::len).collect();
    let statistics = calculate_statistics(options, &page_counts)?;

    let document = match options.resolve_for(&page_counts) {
        ImpositionOptions::Booklet(options) => {
            let mut booklet = Booklet::new(&options, diagnostics)?;
            booklet.fill(&mut SourceProvider::from_documents(sources), diagnostics)?;
            booklet.render()
        }
        ImpositionOptions::NUp(options) => {
            let mut nup = NUp::new(&options, statistics.source_pages)?;
            nup.fill(&mut SourceProvider::from_documents(sources), diagnostics)?;
            nup.render()
        }
        ImpositionOptions::Overlay(options) => {
            let mut overlay = Overlay::new(&options, &page_counts, diagnostics)?;
            overlay.fill(&mut LayeredSourceProvider::new(sources), diagnostics)?;
            overlay.render()
        }
    };

    log::info!(
        "Imposed {} source pages onto {} output pages ({})",
        statistics.source_pages,
        document.len(),
        options.scheme_name()
    );

    Ok(Imposition {
        statistics,
        document,
    })
}

/// Run [`impose`] on a blocking task, returning the collected diagnostics
pub async fn impose_task(
    options: ImpositionOptions,
    sources: Vec<VirtualDocument>,
) -> Result<(Imposition, Diagnostics)> {
    tokio::task::spawn_blocking(move || {
        let mut diagnostics = Diagnostics::new();
        let imposition = impose(&options, &sources, &mut diagnostics)?;
        Ok((imposition, diagnostics))
    })
    .await?
}
