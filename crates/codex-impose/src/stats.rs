use crate::constants::PAGES_PER_BOOKLET_SHEET;
use crate::options::{BookletOptions, ImpositionOptions, NUpOptions, OverlayOptions};
use crate::types::*;

/// Calculate statistics for the imposition without building it
///
/// `source_page_counts` holds the page count of every source document.
pub fn calculate_statistics(
    options: &ImpositionOptions,
    source_page_counts: &[usize],
) -> Result<ImpositionStatistics> {
    options.validate()?;

    let source_pages = source_page_counts.iter().sum();

    match options.resolve_for(source_page_counts) {
        ImpositionOptions::Booklet(options) => calculate_booklet_stats(source_pages, &options),
        ImpositionOptions::NUp(options) => calculate_nup_stats(source_pages, &options),
        ImpositionOptions::Overlay(options) => {
            calculate_overlay_stats(source_pages, source_page_counts, &options)
        }
    }
}

fn calculate_booklet_stats(
    source_pages: usize,
    options: &BookletOptions,
) -> Result<ImpositionStatistics> {
    let requested = options.page_count + options.flyleaf_pages();
    if requested == 0 {
        return Err(ImposeError::NoPages);
    }

    // Pad to multiple of 4
    let padded_count = requested.div_ceil(PAGES_PER_BOOKLET_SHEET) * PAGES_PER_BOOKLET_SHEET;
    let total_sheets = padded_count / PAGES_PER_BOOKLET_SHEET;

    Ok(ImpositionStatistics {
        source_pages,
        output_sheets: total_sheets,
        signatures: Some(1),
        // Front and back of each sheet
        output_pages: total_sheets * 2,
        blank_pages_added: padded_count - options.page_count.min(source_pages),
    })
}

fn calculate_nup_stats(source_pages: usize, options: &NUpOptions) -> Result<ImpositionStatistics> {
    let cells = options.rows * options.columns;
    let sides = options
        .page_count
        .unwrap_or_else(|| source_pages.div_ceil(cells));
    if sides == 0 {
        return Err(ImposeError::NoPages);
    }

    let slots = sides * cells;
    Ok(ImpositionStatistics {
        source_pages,
        output_sheets: sides,
        signatures: None,
        output_pages: sides,
        blank_pages_added: slots - source_pages.min(slots),
    })
}

fn calculate_overlay_stats(
    source_pages: usize,
    source_page_counts: &[usize],
    options: &OverlayOptions,
) -> Result<ImpositionStatistics> {
    let layered = &source_page_counts[..options.layers.min(source_page_counts.len())];
    let pages = options
        .page_count
        .unwrap_or_else(|| layered.iter().copied().max().unwrap_or(0));
    if pages == 0 || options.layers == 0 {
        return Err(ImposeError::NoPages);
    }

    let placed: usize = layered.iter().map(|&n| n.min(pages)).sum();
    Ok(ImpositionStatistics {
        source_pages,
        output_sheets: pages,
        signatures: None,
        output_pages: pages,
        blank_pages_added: pages * options.layers - placed,
    })
}
