//! Error types for canvas configuration and viewport updates.
//!
//! Interaction events never fail: ignored hovers, rejected drag starts and
//! zero-delta drops are ordinary no-ops. Errors are reserved for values that
//! must never reach the coordinate math.

use thiserror::Error;

/// Errors raised by the canvas core
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Zoom scale was zero, negative or not a number
    #[error("Degenerate zoom scale: {k}")]
    DegenerateScale { k: f64 },

    /// Translation component was NaN or infinite
    #[error("Non-finite transform component")]
    NonFiniteTransform,

    /// Zoom limits cannot produce a positive scale
    #[error("Invalid zoom range: min {min}, max {max}")]
    InvalidZoomRange { min: f64, max: f64 },

    /// A settings field that must be positive and finite was not
    #[error("Invalid setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher error
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
