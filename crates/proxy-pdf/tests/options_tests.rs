use proxy_pdf::*;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let options = ProxyOptions::default();

    assert_eq!(options.card_width_mm, 63.0);
    assert_eq!(options.card_height_mm, 88.0);
    assert_eq!(options.paper_size, PaperSize::A4);
    assert_eq!(options.orientation, Orientation::Portrait);
    assert_eq!((options.columns, options.rows), (3, 3));
    assert_eq!(options.margin_mm, 0.0);
    assert_eq!(options.gap_mm, 0.0);
    assert_eq!(options.pixels_per_mm, 10.0);
    assert_eq!(options.fit_mode, FitMode::Stretch);
    assert!(options.cut_lines);
    assert_eq!(options.cut_line_extension_mm, 8.0);
    assert_eq!(options.fetch_timeout_ms, 5_000);
    assert_eq!(options.fetch_max_retries, 2);
    assert_eq!(options.download_delay_ms, 300);
    assert_eq!(options.on_fetch_failure, FailurePolicy::Abort);
    assert_eq!(options.pages_per_file, 12);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_empty_grid() {
    let options = ProxyOptions {
        columns: 0,
        ..Default::default()
    };
    match options.validate() {
        Err(ProxyError::Config(msg)) => assert!(msg.contains("at least one column")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_zero_pages_per_file() {
    let options = ProxyOptions {
        pages_per_file: 0,
        ..Default::default()
    };
    match options.validate() {
        Err(ProxyError::Config(msg)) => assert!(msg.contains("Pages per file")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_bad_dimensions() {
    let mut options = ProxyOptions::default();

    options.card_width_mm = 0.0;
    assert!(options.validate().is_err());

    options.card_width_mm = 63.0;
    options.pixels_per_mm = -1.0;
    assert!(options.validate().is_err());

    options.pixels_per_mm = 10.0;
    options.gap_mm = -2.0;
    assert!(options.validate().is_err());

    options.gap_mm = 2.0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_no_room_for_cards() {
    // A4 is 210mm wide: 110mm margins leave nothing
    let options = ProxyOptions {
        margin_mm: 110.0,
        ..Default::default()
    };
    match options.validate() {
        Err(ProxyError::Config(msg)) => assert!(msg.contains("no room")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_overflow_is_not_an_error() {
    let options = ProxyOptions {
        card_width_mm: 80.0,
        ..Default::default()
    };
    assert!(options.validate().is_ok());
    assert!(options.layout().width_shrunk);
}

#[test]
fn test_paper_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    assert_eq!(
        PaperSize::Custom {
            width_mm: 100.0,
            height_mm: 150.0
        }
        .dimensions_mm(),
        (100.0, 150.0)
    );
}

#[tokio::test]
async fn test_save_and_load_roundtrip() {
    let options = ProxyOptions {
        paper_size: PaperSize::Custom {
            width_mm: 300.0,
            height_mm: 400.0,
        },
        columns: 4,
        margin_mm: 5.0,
        fit_mode: FitMode::Crop,
        on_fetch_failure: FailurePolicy::Placeholder,
        cut_lines: false,
        ..Default::default()
    };

    let file = NamedTempFile::new().unwrap();
    options.save(file.path()).await.unwrap();
    let loaded = ProxyOptions::load(file.path()).await.unwrap();

    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"{ "columns": 4, "fit_mode": "Crop" }"#).unwrap();

    let loaded = ProxyOptions::load(file.path()).await.unwrap();

    assert_eq!(loaded.columns, 4);
    assert_eq!(loaded.fit_mode, FitMode::Crop);
    assert_eq!(loaded.rows, 3);
    assert_eq!(loaded.pages_per_file, 12);
}

#[tokio::test]
async fn test_load_invalid_config() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "columns = 4").unwrap();

    match ProxyOptions::load(file.path()).await {
        Err(ProxyError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        _ => panic!("Expected Config error"),
    }
}
