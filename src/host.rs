//! Host contract - the application that owns the card list.
//!
//! The canvas never keeps its own copy of the cards. It reads them through
//! [`CardHost`] at the moment of use and asks the host to persist a move
//! exactly once per completed non-zero drag.

use crate::types::{Card, CardId, Point};

pub trait CardHost {
    /// Every card, in paint order (later cards are drawn on top)
    fn cards(&self) -> &[Card];

    fn card(&self, id: CardId) -> Option<&Card> {
        self.cards().iter().find(|card| card.id == id)
    }

    /// Persist a card's new logical coordinates.
    fn commit_move(&mut self, id: CardId, coordinates: Point);
}

impl CardHost for Vec<Card> {
    fn cards(&self) -> &[Card] {
        self.as_slice()
    }

    fn commit_move(&mut self, id: CardId, coordinates: Point) {
        if let Some(card) = self.iter_mut().find(|card| card.id == id) {
            card.coordinates = coordinates;
        }
    }
}
