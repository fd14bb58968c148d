//! Card interaction input handling.
//!
//! ## Architecture
//!
//! The active card is tracked by an explicit state machine
//! ([`ActivationState`], owned by [`ActivationTracker`]) instead of scattered
//! hover/drag flags. A drag lives in a transient [`DragSession`] child of the
//! `Dragging` state. Hover detection on the static card layer is gated by the
//! shared [`InputSuppressor`].
//!
//! ## Modules
//!
//! - `coords` - Logical/screen transform and conversions
//! - `state` - Activation state enum and helper methods
//! - `tracker` - Hover/drag transitions and commit to the host
//! - `drag` - Single drag gesture lifecycle
//! - `suppressor` - Hover gate during pan/zoom and drag

pub mod coords;
mod drag;
mod state;
mod suppressor;
mod tracker;

pub use coords::{CoordinateConverter, Transform};
pub use drag::{DragOutcome, DragSession};
pub use state::ActivationState;
pub use suppressor::{InputSuppressor, SuppressionSource};
pub use tracker::{ActivationTracker, Transition};
