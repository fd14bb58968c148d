//! Static card layer - every card as a passive visual node.
//!
//! The layer is a pure function of the host's card list. It never sees the
//! activation state; its only coupling to interaction is the activation
//! callback it invokes when the pointer enters a card, and it stops invoking
//! it while the [`InputSuppressor`] is engaged.
//!
//! ## Performance Notes
//!
//! Nodes are rebuilt only when the card list is synced, and are shared with
//! every frame through an `Rc<[StaticNode]>`. Renderers can compare
//! [`CardLayer::revision`] to skip re-painting the layer entirely while only
//! the transform or the overlay pair changes.

use crate::input::{CoordinateConverter, InputSuppressor, Transform};
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::types::{Card, CardId, Point, Size};
use std::rc::Rc;
use tracing::trace;

/// One non-interactive card.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticNode {
    pub card_id: CardId,
    /// Top-left corner in logical coordinates
    pub position: Point,
    pub text: String,
}

impl StaticNode {
    /// Absolute screen `(left, top)` under `transform`.
    #[inline]
    pub fn screen_position(&self, transform: &Transform) -> Point {
        CoordinateConverter::canvas_to_screen(self.position, transform)
    }
}

pub struct CardLayer {
    nodes: Rc<[StaticNode]>,
    index: SpatialIndex,
    card_size: Size,
    revision: u64,
    suppressor: InputSuppressor,
}

impl CardLayer {
    pub fn new(cards: &[Card], card_size: Size, suppressor: InputSuppressor) -> Self {
        Self {
            nodes: Self::render(cards).into(),
            index: SpatialIndex::from_cards(cards, card_size),
            card_size,
            revision: 0,
            suppressor,
        }
    }

    /// Map each card to its node. Order-preserving, independent of any
    /// interaction state.
    pub fn render(cards: &[Card]) -> Vec<StaticNode> {
        cards
            .iter()
            .map(|card| StaticNode {
                card_id: card.id,
                position: card.coordinates,
                text: card.text.clone(),
            })
            .collect()
    }

    /// Rebuild nodes and hit index from the host's current list.
    pub fn sync(&mut self, cards: &[Card]) {
        profile_scope!("card_layer_sync");

        self.nodes = Self::render(cards).into();
        self.index.rebuild(cards, self.card_size);
        self.revision += 1;
        trace!(cards = cards.len(), revision = self.revision, "Card layer rebuilt");
    }

    pub fn set_card_size(&mut self, card_size: Size, cards: &[Card]) {
        self.card_size = card_size;
        self.sync(cards);
    }

    pub fn nodes(&self) -> Rc<[StaticNode]> {
        Rc::clone(&self.nodes)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    /// False while hover detection is gated.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        !self.suppressor.is_suppressed()
    }

    /// Topmost card under a screen position.
    pub fn card_at(&self, screen: Point, transform: &Transform) -> Option<CardId> {
        profile_scope!("card_hit_test");

        let logical = CoordinateConverter::screen_to_canvas(screen, transform);
        self.index.topmost_at(logical)
    }

    /// Whether a screen position falls within a card's rectangle.
    pub fn contains(&self, card_id: CardId, screen: Point, transform: &Transform) -> bool {
        let logical = CoordinateConverter::screen_to_canvas(screen, transform);
        self.index
            .get(card_id)
            .is_some_and(|entry| entry.contains_point(logical.x, logical.y))
    }

    /// Pointer entered a static card: invoke the activation callback unless
    /// the layer is gated.
    pub fn pointer_enter<R>(
        &self,
        card_id: CardId,
        on_activate: impl FnOnce(CardId) -> R,
    ) -> Option<R> {
        if !self.is_interactive() {
            trace!(card_id, "Static layer gated, pointer-enter dropped");
            return None;
        }
        Some(on_activate(card_id))
    }
}
