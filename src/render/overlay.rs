//! Overlay pair - the cover and the drag handle for the active card.
//!
//! The cover sits exactly on the active card's static node so the static
//! node is never visible or reachable twice. The handle carries the same
//! text and follows the live drag delta. Both are derived from the latest
//! activation state and transform on every call; nothing is cached.

use crate::host::CardHost;
use crate::input::{ActivationState, CoordinateConverter, Transform};
use crate::types::{CardId, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayRole {
    /// Fixed placeholder over the static node
    Cover,
    /// The element the user drags
    Handle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayNode {
    pub role: OverlayRole,
    pub card_id: Option<CardId>,
    /// Hidden nodes are removed from layout, not just transparent
    pub visible: bool,
    pub text: String,
    /// Top-left corner in logical coordinates, live delta included
    pub position: Point,
    /// Absolute screen `(left, top)`, live delta included
    pub screen: Point,
    /// Live screen-space translation (handle only, while dragging)
    pub translation: Point,
}

impl OverlayNode {
    pub fn hidden(role: OverlayRole) -> Self {
        Self {
            role,
            card_id: None,
            visible: false,
            text: String::new(),
            position: Point::ZERO,
            screen: Point::ZERO,
            translation: Point::ZERO,
        }
    }

    /// Hidden nodes never intercept pointer input.
    #[inline]
    pub fn intercepts_pointer(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_draggable(&self) -> bool {
        self.visible && self.role == OverlayRole::Handle
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    pub cover: OverlayNode,
    pub handle: OverlayNode,
}

impl OverlayFrame {
    pub fn hidden() -> Self {
        Self {
            cover: OverlayNode::hidden(OverlayRole::Cover),
            handle: OverlayNode::hidden(OverlayRole::Handle),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.cover.visible || self.handle.visible
    }

    pub fn active_card(&self) -> Option<CardId> {
        self.handle.card_id.filter(|_| self.handle.visible)
    }
}

pub struct OverlayCoordinator;

impl OverlayCoordinator {
    /// Position the overlay pair for `state` under `transform`.
    ///
    /// The cover stays on the card's stored coordinates; the handle adds the
    /// live delta. A state naming a card the host no longer has projects to a
    /// hidden pair.
    pub fn project(
        state: &ActivationState,
        transform: &Transform,
        host: &impl CardHost,
    ) -> OverlayFrame {
        let Some(card) = state.active_card().and_then(|id| host.card(id)) else {
            return OverlayFrame::hidden();
        };

        let screen = CoordinateConverter::canvas_to_screen(card.coordinates, transform);
        let live_delta = state.live_delta();

        let cover = OverlayNode {
            role: OverlayRole::Cover,
            card_id: Some(card.id),
            visible: true,
            text: card.text.clone(),
            position: card.coordinates,
            screen,
            translation: Point::ZERO,
        };
        let handle = OverlayNode {
            role: OverlayRole::Handle,
            card_id: Some(card.id),
            visible: true,
            text: card.text.clone(),
            position: card.coordinates
                + CoordinateConverter::delta_screen_to_canvas(live_delta, transform),
            screen: screen + live_delta,
            translation: live_delta,
        };

        OverlayFrame { cover, handle }
    }
}
