//! Activation state - which single card is hovered or dragged.
//!
//! ## State Transitions
//!
//! ```text
//! Idle              -> Hovering(id)        (hover-enter, only when unsuppressed)
//! Hovering(a)       -> Hovering(b)         (hover-enter on another card, unsuppressed)
//! Hovering(id)      -> Dragging(id, 0)     (drag-start on the same card's handle)
//! Dragging(id, d)   -> Dragging(id, d')    (drag-move)
//! Dragging(id, d)   -> Hovering(id)        (drag-end, commits d / k when non-zero)
//! Hovering(id)      -> Idle                (hover-leave)
//! Any               -> Idle                (reset, or the card disappears)
//! ```
//!
//! There is no `Idle -> Dragging` edge: the drag handle only exists while its
//! card is already active.

use crate::types::{CardId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActivationState {
    /// No card is active; both overlays are hidden
    #[default]
    Idle,

    /// The pointer is over a card; the overlay pair shadows it
    Hovering(CardId),

    /// The card's handle is being dragged
    Dragging {
        card_id: CardId,
        /// Screen-space displacement since drag start
        live_delta: Point,
    },
}

impl ActivationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self, Self::Hovering(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The active card, hovered or dragged
    pub fn active_card(&self) -> Option<CardId> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(*id),
            Self::Dragging { card_id, .. } => Some(*card_id),
        }
    }

    pub fn dragged_card(&self) -> Option<CardId> {
        match self {
            Self::Dragging { card_id, .. } => Some(*card_id),
            _ => None,
        }
    }

    /// Live screen delta, zero unless dragging
    pub fn live_delta(&self) -> Point {
        match self {
            Self::Dragging { live_delta, .. } => *live_delta,
            _ => Point::ZERO,
        }
    }
}
