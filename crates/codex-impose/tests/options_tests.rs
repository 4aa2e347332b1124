use codex_impose::geometry::Length;
use codex_impose::*;

#[test]
fn test_validation_zero_sized_sheet() {
    let options = ImpositionOptions::NUp(NUpOptions {
        sheet_height: Length::ZERO,
        ..Default::default()
    });
    match options.validate() {
        Err(ImposeError::Config(msg)) => {
            assert!(msg.contains("N-up sheet"));
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_validation_grid_shape() {
    let mut options = NUpOptions::default();
    assert!(options.validate().is_ok());

    options.rows = 0;
    assert!(options.validate().is_err());

    options.rows = 3;
    options.columns = 0;
    assert!(options.validate().is_err());

    options.columns = 1;
    options.page_count = Some(0);
    assert!(options.validate().is_err());
}

#[test]
fn test_resolve_takes_counts_from_sources() {
    let booklet = ImpositionOptions::Booklet(BookletOptions::default()).resolve_for(&[3, 5]);
    match booklet {
        ImpositionOptions::Booklet(options) => assert_eq!(options.page_count, 8),
        other => panic!("Expected booklet options, got {other:?}"),
    }

    let overlay = ImpositionOptions::Overlay(OverlayOptions::default()).resolve_for(&[3, 5, 1]);
    match overlay {
        ImpositionOptions::Overlay(options) => assert_eq!(options.layers, 3),
        other => panic!("Expected overlay options, got {other:?}"),
    }

    // Explicit values are kept
    let explicit = ImpositionOptions::Booklet(BookletOptions {
        page_count: 12,
        ..Default::default()
    });
    assert_eq!(explicit.resolve_for(&[3]), explicit);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = ImpositionOptions::Booklet(BookletOptions {
        page_count: 24,
        binding: Binding::Horizontal,
        verso_opposite: true,
        front_flyleaves: 2,
        back_flyleaves: 1,
        fold_marks: true,
        scaling: ScalingMode::Stretch,
        ..Default::default()
    });

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Save
    options.save(path).await.unwrap();

    // Load
    let loaded = ImpositionOptions::load(path).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{"scheme": "nup", "rows": 4}"#)
        .await
        .unwrap();

    let loaded = ImpositionOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(
        loaded,
        ImpositionOptions::NUp(NUpOptions {
            rows: 4,
            ..Default::default()
        })
    );
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{"scheme": "poster"}"#)
        .await
        .unwrap();

    let result = ImpositionOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(ImposeError::Config(_))));
}
