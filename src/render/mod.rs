//! Render-side projections of canvas state.
//!
//! - `cards` - The static card layer and its hit index
//! - `overlay` - Cover + handle pair for the single active card

mod cards;
mod overlay;

pub use cards::{CardLayer, StaticNode};
pub use overlay::{OverlayCoordinator, OverlayFrame, OverlayNode, OverlayRole};
