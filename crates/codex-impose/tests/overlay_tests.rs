use codex_impose::geometry::{Dimensions, Length};
use codex_impose::*;

fn source(document: usize, pages: usize) -> VirtualDocument {
    VirtualDocument::from_source(document, pages, Dimensions::from_pt(200.0, 300.0).unwrap())
}

fn options() -> OverlayOptions {
    OverlayOptions {
        width: Length::pt(200.0),
        height: Length::pt(300.0),
        ..Default::default()
    }
}

fn layers_on(page: &VirtualPage) -> Vec<(usize, usize)> {
    page.source_pages().map(|s| (s.document, s.page)).collect()
}

#[test]
fn test_one_layer_per_source() {
    let mut diagnostics = Diagnostics::new();
    let imposition = impose(
        &ImpositionOptions::Overlay(options()),
        &[source(0, 3), source(1, 3)],
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(imposition.document.len(), 3);
    for (index, page) in imposition.document.pages().iter().enumerate() {
        // Bottom layer first
        assert_eq!(layers_on(page), vec![(0, index), (1, index)]);
    }
    assert!(!diagnostics.has_warnings());
}

#[test]
fn test_short_layer_stays_blank() {
    let mut diagnostics = Diagnostics::new();
    let imposition = impose(
        &ImpositionOptions::Overlay(options()),
        &[source(0, 3), source(1, 2)],
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(imposition.document.len(), 3);
    assert_eq!(layers_on(imposition.document.page(2).unwrap()), vec![(0, 2)]);
    assert_eq!(
        diagnostics.warnings(),
        &[Warning::LayerExhausted {
            layer: 1,
            page: Some(3)
        }]
    );
}

#[test]
fn test_more_layers_than_sources() {
    let options = OverlayOptions {
        layers: 3,
        ..options()
    };
    let mut diagnostics = Diagnostics::new();
    let imposition = impose(
        &ImpositionOptions::Overlay(options),
        &[source(0, 2)],
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(imposition.document.len(), 2);
    assert_eq!(layers_on(imposition.document.page(0).unwrap()), vec![(0, 0)]);
    assert_eq!(
        diagnostics.warnings(),
        &[Warning::MissingLayers {
            declared: 3,
            provided: 1
        }]
    );
}

#[test]
fn test_explicit_page_count_truncates() {
    let options = OverlayOptions {
        page_count: Some(1),
        ..options()
    };
    let mut diagnostics = Diagnostics::new();
    let imposition = impose(
        &ImpositionOptions::Overlay(options),
        &[source(0, 2), source(1, 2)],
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(imposition.document.len(), 1);
    assert_eq!(
        diagnostics.warnings(),
        &[Warning::UnusedContent { remaining: 2 }]
    );
}

#[test]
fn test_no_sources() {
    let result = impose(
        &ImpositionOptions::Overlay(options()),
        &[],
        &mut Diagnostics::new(),
    );
    assert!(result.is_err());
}
