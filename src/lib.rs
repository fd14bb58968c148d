//! cardcanvas - a pan/zoom card canvas with a single active card.
//!
//! Cards sit in a logical space mapped to the screen by one
//! [`Transform`]. Every card is drawn once in a static layer; the card under
//! the pointer gets a cover + handle overlay pair, and only the handle moves
//! during a drag. The crate is headless: a renderer feeds [`CanvasEvent`]s to
//! a [`Canvas`] and draws the [`Frame`] it derives.
//!
//! Modules:
//! - `canvas` - Event dispatch and frame derivation
//! - `viewport` - Pan/zoom controller, wheel and gesture handling
//! - `input` - Coordinates, activation state machine, drag sessions, suppression
//! - `render` - Static card layer and overlay projection
//! - `host` - Contract with the application owning the cards
//! - `settings` / `settings_watcher` - JSON settings and hot-reload
//! - `perf` - Gesture spans and scoped timers

pub mod canvas;
pub mod constants;
pub mod error;
pub mod host;
pub mod input;
pub mod logging;
pub mod perf;
pub mod render;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod subscription;
pub mod types;
pub mod viewport;

pub use canvas::{Canvas, CanvasEvent, Frame};
pub use error::{CanvasError, CanvasResult};
pub use host::CardHost;
pub use input::{ActivationState, ActivationTracker, InputSuppressor, Transform, Transition};
pub use render::{OverlayCoordinator, OverlayFrame, OverlayNode, OverlayRole, StaticNode};
pub use settings::Settings;
pub use types::{Card, CardId, Point, ScrollDelta, Size};
pub use viewport::{GestureEvent, ViewportController, ZoomLimits};
