//! Spatial Index Module
//!
//! R-tree over card rectangles in logical space, used to turn a pointer
//! position into the card under it. Point queries are O(log n).

use crate::types::{Card, CardId, Point, Size};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A card's bounding box plus its paint order.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub card_id: CardId,
    /// Index in the host's list; higher is painted later (on top)
    pub order: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(card_id: CardId, order: usize, position: Point, size: Size) -> Self {
        Self {
            card_id,
            order,
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + size.width,
            max_y: position.y + size.height,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

/// Spatial index for cards using an R-tree.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<CardId, SpatialEntry>,
}

impl SpatialIndex {
    /// Build an index from cards in paint order, all sharing one size.
    pub fn from_cards(cards: &[Card], size: Size) -> Self {
        let mut index = Self::default();
        index.rebuild(cards, size);
        index
    }

    /// The card painted on top at the point, if any.
    pub fn topmost_at(&self, point: Point) -> Option<CardId> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .max_by_key(|entry| entry.order)
            .map(|entry| entry.card_id)
    }

    pub fn get(&self, card_id: CardId) -> Option<&SpatialEntry> {
        self.entries.get(&card_id)
    }

    pub fn rebuild(&mut self, cards: &[Card], size: Size) {
        let entries: Vec<SpatialEntry> = cards
            .iter()
            .enumerate()
            .map(|(order, card)| SpatialEntry::new(card.id, order, card.coordinates, size))
            .collect();

        self.entries = entries.iter().map(|e| (e.card_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }
}
