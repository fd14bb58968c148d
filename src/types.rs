//! Core value types for the card canvas.
//!
//! Cards are owned by the host application. The canvas only reads them and
//! asks the host to move one through [`crate::host::CardHost::commit_move`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Unique card identifier, assigned by the host.
pub type CardId = u64;

/// A 2-D point or displacement. Whether it is logical or screen space is
/// decided by the API that hands it out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Width and height in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_CARD_WIDTH,
            crate::constants::DEFAULT_CARD_HEIGHT,
        )
    }
}

/// A positioned text card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Top-left corner in logical (canvas) coordinates
    pub coordinates: Point,
    pub text: String,
}

impl Card {
    pub fn new(id: CardId, coordinates: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            id,
            coordinates: coordinates.into(),
            text: text.into(),
        }
    }
}

/// Wheel delta as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDelta {
    /// Precise pixel delta (trackpads)
    Pixels(Point),
    /// Line delta (mouse wheels)
    Lines(Point),
}
