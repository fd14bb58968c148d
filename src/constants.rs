//! Canvas-wide constants.
//!
//! Centralizes magic numbers for zoom, wheel handling and card layout so
//! settings defaults and tests share one source.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f64 = 8.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Pixel wheel delta that corresponds to a 100% zoom change
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 500.0;

/// Line wheel delta that corresponds to a 100% zoom change
pub const LINE_ZOOM_SENSITIVITY: f64 = 50.0;

/// Pixels panned per wheel line
pub const LINE_SCROLL_STEP: f64 = 20.0;

/// Zoom factors closer to 1.0 than this are ignored
pub const MIN_ZOOM_FACTOR_DELTA: f64 = 0.001;

// ============================================================================
// Card Layout
// ============================================================================

/// Default card width in logical pixels
pub const DEFAULT_CARD_WIDTH: f64 = 120.0;

/// Default card height in logical pixels
pub const DEFAULT_CARD_HEIGHT: f64 = 48.0;

// ============================================================================
// Timing
// ============================================================================

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Number of samples kept per gesture statistic
pub const STATS_SAMPLE_COUNT: usize = 100;
