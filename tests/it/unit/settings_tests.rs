//! Unit tests for settings persistence.

use cardcanvas::constants::{MAX_ZOOM, MIN_ZOOM};
use cardcanvas::{CanvasError, Settings, Size};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults_come_from_constants() {
    let settings = Settings::default();
    assert_eq!(settings.min_zoom, MIN_ZOOM);
    assert_eq!(settings.max_zoom, MAX_ZOOM);
    assert_eq!(settings.card_size, Size::default());
    assert!(settings.zoom_limits().is_ok());
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        max_zoom: 4.0,
        card_size: Size::new(200.0, 80.0),
        ..Settings::default()
    };
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"max_zoom": 3.0}"#).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.max_zoom, 3.0);
    assert_eq!(loaded.min_zoom, MIN_ZOOM);
    assert_eq!(loaded.line_scroll_step, Settings::default().line_scroll_step);
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Settings::load_from(&path), Err(CanvasError::Json(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Settings::load_from(dir.path().join("absent.json"));
    assert!(matches!(result, Err(CanvasError::Io(_))));
}

#[test]
fn test_inverted_zoom_range_rejected() {
    let settings = Settings {
        min_zoom: 5.0,
        max_zoom: 2.0,
        ..Settings::default()
    };
    assert!(matches!(
        settings.zoom_limits(),
        Err(CanvasError::InvalidZoomRange { .. })
    ));
}

#[test]
fn test_wheel_config_mirrors_fields() {
    let settings = Settings {
        wheel_zoom_sensitivity: 250.0,
        line_scroll_step: 40.0,
        ..Settings::default()
    };
    let wheel = settings.wheel_config().unwrap();
    assert_eq!(wheel.pixel_zoom_sensitivity, 250.0);
    assert_eq!(wheel.line_scroll_step, 40.0);
    assert_eq!(wheel.line_zoom_sensitivity, settings.line_zoom_sensitivity);
}

#[test]
fn test_zero_wheel_sensitivity_rejected() {
    let settings = Settings {
        wheel_zoom_sensitivity: 0.0,
        ..Settings::default()
    };
    assert!(matches!(
        settings.wheel_config(),
        Err(CanvasError::InvalidSetting {
            name: "wheel_zoom_sensitivity",
            ..
        })
    ));
    assert!(settings.validate().is_err());
}

#[test]
fn test_negative_card_size_rejected() {
    let settings = Settings {
        card_size: Size::new(-120.0, 48.0),
        ..Settings::default()
    };
    assert!(matches!(
        settings.card_size(),
        Err(CanvasError::InvalidSetting {
            name: "card_size.width",
            ..
        })
    ));
    assert!(Settings::default().validate().is_ok());
}
