//! Coordinate transform between canvas-logical and screen space.
//!
//! A [`Transform`] maps logical points to screen points as
//! `screen = logical * k + (x, y)`. Scale is applied before translation.
//! The scale is validated on construction, so every division by `k` in this
//! crate operates on a positive finite number.

use crate::error::{CanvasError, CanvasResult};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Pan offset `(x, y)` in screen pixels and zoom scale `k`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransform")]
pub struct Transform {
    x: f64,
    y: f64,
    k: f64,
}

#[derive(Deserialize)]
struct RawTransform {
    x: f64,
    y: f64,
    k: f64,
}

impl TryFrom<RawTransform> for Transform {
    type Error = CanvasError;

    fn try_from(raw: RawTransform) -> CanvasResult<Self> {
        Transform::new(raw.x, raw.y, raw.k)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    /// Build a transform, rejecting `k <= 0` and non-finite components.
    pub fn new(x: f64, y: f64, k: f64) -> CanvasResult<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(CanvasError::DegenerateScale { k });
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(CanvasError::NonFiniteTransform);
        }
        Ok(Self { x, y, k })
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[inline]
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Logical point to screen point.
    #[inline]
    pub fn to_screen(&self, logical: Point) -> Point {
        logical * self.k + self.offset()
    }

    /// Screen point to logical point.
    #[inline]
    pub fn to_logical(&self, screen: Point) -> Point {
        (screen - self.offset()) / self.k
    }

    /// Screen-space displacement to logical-space displacement.
    #[inline]
    pub fn to_logical_delta(&self, screen_delta: Point) -> Point {
        screen_delta / self.k
    }

    #[inline]
    pub fn to_screen_delta(&self, logical_delta: Point) -> Point {
        logical_delta * self.k
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn translated(&self, screen_delta: Point) -> CanvasResult<Self> {
        Self::new(self.x + screen_delta.x, self.y + screen_delta.y, self.k)
    }

    /// Change the scale to `k` while keeping the logical point under
    /// `anchor` (screen space) fixed on screen.
    pub fn scaled_around(&self, k: f64, anchor: Point) -> CanvasResult<Self> {
        let logical = self.to_logical(anchor);
        let offset = anchor - logical * k;
        Self::new(offset.x, offset.y, k)
    }

    /// `self ∘ inner`: apply `inner` first, then `self`.
    /// Fails when the product scale overflows or underflows.
    pub fn compose(&self, inner: &Transform) -> CanvasResult<Self> {
        Self::new(
            inner.x * self.k + self.x,
            inner.y * self.k + self.y,
            self.k * inner.k,
        )
    }

    /// The screen-to-logical mapping as a transform. Fails for scales whose
    /// reciprocal is not representable.
    pub fn inverse(&self) -> CanvasResult<Self> {
        Self::new(-self.x / self.k, -self.y / self.k, 1.0 / self.k)
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a screen delta to a logical delta (for drag commits)
    #[inline]
    pub fn delta_screen_to_canvas(delta: Point, transform: &Transform) -> Point {
        transform.to_logical_delta(delta)
    }

    /// Convert a screen position to a canvas position
    #[inline]
    pub fn screen_to_canvas(screen_pos: Point, transform: &Transform) -> Point {
        transform.to_logical(screen_pos)
    }

    /// Convert a canvas position to a screen position
    #[inline]
    pub fn canvas_to_screen(canvas_pos: Point, transform: &Transform) -> Point {
        transform.to_screen(canvas_pos)
    }
}
