//! Hover gate for the static card layer.
//!
//! While a pan/zoom gesture or a card drag is running, pointer movement can
//! outrun event delivery and land on static cards that are not the one being
//! handled. The suppressor is a pure gate: no timers, no debouncing. The
//! viewport and the activation tracker each hold their own claim on it, and
//! the layer reads as suppressed while either claim is engaged.

use std::cell::Cell;
use std::rc::Rc;

/// Who is holding the gate closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuppressionSource {
    /// Pan, zoom, pinch or wheel gesture (viewport)
    Gesture,
    /// Card drag (activation tracker)
    Drag,
}

impl SuppressionSource {
    #[inline]
    fn bit(self) -> u8 {
        match self {
            Self::Gesture => 0b01,
            Self::Drag => 0b10,
        }
    }
}

/// Cloneable handle to one shared gate. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct InputSuppressor {
    holders: Rc<Cell<u8>>,
}

impl InputSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engage(&self, source: SuppressionSource) {
        self.holders.set(self.holders.get() | source.bit());
    }

    pub fn release(&self, source: SuppressionSource) {
        self.holders.set(self.holders.get() & !source.bit());
    }

    /// Returns true while hover detection on the static layer is disabled
    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.holders.get() != 0
    }

    #[inline]
    pub fn is_held_by(&self, source: SuppressionSource) -> bool {
        self.holders.get() & source.bit() != 0
    }
}
