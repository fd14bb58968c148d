//! Drag session - lifecycle of a single card drag gesture.
//!
//! ## Performance Notes
//!
//! `on_move` runs for every pointer move during a drag (potentially 60+
//! times per second). It only replaces the live delta; nothing is committed
//! to the card until the drag ends.
//!
//! All deltas stay in screen space for the lifetime of the session. They are
//! converted to logical space by the caller at commit time, using the scale
//! current at that moment.

use crate::input::coords::Transform;
use crate::types::{CardId, Point};
use tracing::trace;

/// An in-flight drag of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    card_id: CardId,
    /// Screen-space displacement since drag start
    live_delta: Point,
    move_count: u64,
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Zero or non-finite displacement: a click, nothing to commit
    Click { card_id: CardId },
    /// The card was displaced by `screen_delta`
    Moved { card_id: CardId, screen_delta: Point },
}

impl DragOutcome {
    pub fn card_id(&self) -> CardId {
        match self {
            Self::Click { card_id } | Self::Moved { card_id, .. } => *card_id,
        }
    }

    /// Logical displacement to commit, if any.
    pub fn logical_delta(&self, transform: &Transform) -> Option<Point> {
        match self {
            Self::Click { .. } => None,
            Self::Moved { screen_delta, .. } => Some(transform.to_logical_delta(*screen_delta)),
        }
    }
}

impl DragSession {
    pub fn start(card_id: CardId) -> Self {
        Self {
            card_id,
            live_delta: Point::ZERO,
            move_count: 0,
        }
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn live_delta(&self) -> Point {
        self.live_delta
    }

    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Record the displacement since start. Non-finite samples are dropped and
    /// the previous delta is kept.
    pub fn on_move(&mut self, screen_delta: Point) {
        if !screen_delta.is_finite() {
            trace!(card_id = self.card_id, "dropping non-finite drag move");
            return;
        }
        self.live_delta = screen_delta;
        self.move_count += 1;
    }

    /// Finish the gesture with the final displacement since start.
    pub fn finish(self, screen_delta: Point) -> DragOutcome {
        if !screen_delta.is_finite() || screen_delta.is_zero() {
            return DragOutcome::Click {
                card_id: self.card_id,
            };
        }
        DragOutcome::Moved {
            card_id: self.card_id,
            screen_delta,
        }
    }
}
