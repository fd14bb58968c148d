//! Viewport controller - pan/zoom state and gesture handling.
//!
//! The controller is the only writer of the canvas [`Transform`]. It keeps the
//! value in a single cell; other components hold a [`TransformReader`] and
//! read the latest value at the moment they need it, or subscribe to changes.
//!
//! While a pan/zoom gesture is in progress the controller holds the
//! [`InputSuppressor`] so hover detection on the static layer is gated.
//!
//! ## Gesture Flow
//!
//! ```text
//! Start -> (Pan | Zoom | Set)* -> End      (background drag, pinch)
//! Wheel                                     (atomic: start, apply, end)
//! ```

use crate::constants::{DEFAULT_ZOOM, MIN_ZOOM_FACTOR_DELTA};
use crate::error::{CanvasError, CanvasResult};
use crate::input::{InputSuppressor, SuppressionSource, Transform};
use crate::profile_scope;
use crate::subscription::{Subscribers, Subscription};
use crate::types::{Point, ScrollDelta};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Inclusive scale bounds, `0 < min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl ZoomLimits {
    pub fn new(min: f64, max: f64) -> CanvasResult<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(CanvasError::InvalidZoomRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a requested scale into range. NaN yields `None`; infinities clamp
    /// to the nearest bound.
    pub fn clamp(&self, k: f64) -> Option<f64> {
        if k.is_nan() {
            return None;
        }
        Some(k.clamp(self.min, self.max))
    }
}

/// Wheel tuning, see [`crate::settings::Settings`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelConfig {
    pub pixel_zoom_sensitivity: f64,
    pub line_zoom_sensitivity: f64,
    pub line_scroll_step: f64,
}

impl WheelConfig {
    /// Every field divides or multiplies a wheel delta, so all must be
    /// positive and finite.
    pub fn new(
        pixel_zoom_sensitivity: f64,
        line_zoom_sensitivity: f64,
        line_scroll_step: f64,
    ) -> CanvasResult<Self> {
        for (name, value) in [
            ("wheel_zoom_sensitivity", pixel_zoom_sensitivity),
            ("line_zoom_sensitivity", line_zoom_sensitivity),
            ("line_scroll_step", line_scroll_step),
        ] {
            ensure_positive(name, value)?;
        }
        Ok(Self {
            pixel_zoom_sensitivity,
            line_zoom_sensitivity,
            line_scroll_step,
        })
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> CanvasResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CanvasError::InvalidSetting { name, value })
    }
}

/// Normalized pan/zoom gesture stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Background drag or pinch began
    Start,
    /// Pan by a screen-space delta
    Pan(Point),
    /// Multiply the scale by `factor`, keeping `anchor` (screen) fixed
    Zoom { factor: f64, anchor: Point },
    /// Replace the transform (scale is clamped into range)
    Set(Transform),
    /// Gesture finished
    End,
}

/// Read-only handle to the current transform.
#[derive(Clone, Debug)]
pub struct TransformReader {
    cell: Rc<Cell<Transform>>,
}

impl TransformReader {
    #[inline]
    pub fn get(&self) -> Transform {
        self.cell.get()
    }
}

pub struct ViewportController {
    cell: Rc<Cell<Transform>>,
    limits: ZoomLimits,
    wheel: WheelConfig,
    suppressor: InputSuppressor,
    gesture_active: bool,
    subscribers: Subscribers<Transform>,
}

impl ViewportController {
    pub fn new(limits: ZoomLimits, wheel: WheelConfig, suppressor: InputSuppressor) -> Self {
        // identity, unless the limits exclude the default zoom
        let initial = limits
            .clamp(DEFAULT_ZOOM)
            .and_then(|k| Transform::new(0.0, 0.0, k).ok())
            .unwrap_or(Transform::IDENTITY);
        Self {
            cell: Rc::new(Cell::new(initial)),
            limits,
            wheel,
            suppressor,
            gesture_active: false,
            subscribers: Subscribers::new(),
        }
    }

    pub fn from_settings(
        settings: &crate::settings::Settings,
        suppressor: InputSuppressor,
    ) -> CanvasResult<Self> {
        Ok(Self::new(
            settings.zoom_limits()?,
            settings.wheel_config()?,
            suppressor,
        ))
    }

    #[inline]
    pub fn current_transform(&self) -> Transform {
        self.cell.get()
    }

    pub fn reader(&self) -> TransformReader {
        TransformReader {
            cell: Rc::clone(&self.cell),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&Transform) + 'static) -> Subscription<Transform> {
        self.subscribers.subscribe(callback)
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Apply one gesture event. Returns true if the transform changed.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> bool {
        profile_scope!("viewport_gesture");

        match event {
            GestureEvent::Start => {
                self.begin_gesture();
                false
            }
            GestureEvent::Pan(delta) => self.pan_by(delta),
            GestureEvent::Zoom { factor, anchor } => self.zoom_around(factor, anchor),
            GestureEvent::Set(transform) => self.set_transform(transform),
            GestureEvent::End => {
                self.end_gesture();
                false
            }
        }
    }

    pub fn begin_gesture(&mut self) {
        if !self.gesture_active {
            debug!("Pan/zoom gesture started");
        }
        self.gesture_active = true;
        self.suppressor.engage(SuppressionSource::Gesture);
    }

    pub fn end_gesture(&mut self) {
        if self.gesture_active {
            debug!("Pan/zoom gesture ended");
        }
        self.gesture_active = false;
        self.suppressor.release(SuppressionSource::Gesture);
    }

    pub fn pan_by(&mut self, delta: Point) -> bool {
        let next = self.current_transform().translated(delta);
        self.publish_result(next)
    }

    /// Zoom by `factor` keeping the logical point under `anchor` in place.
    pub fn zoom_around(&mut self, factor: f64, anchor: Point) -> bool {
        let current = self.current_transform();
        let Some(k) = self.limits.clamp(current.k() * factor) else {
            warn!(factor, "Rejected non-finite zoom factor");
            return false;
        };
        let next = current.scaled_around(k, anchor);
        self.publish_result(next)
    }

    /// Replace the transform, clamping its scale into the configured range.
    pub fn set_transform(&mut self, transform: Transform) -> bool {
        let Some(k) = self.limits.clamp(transform.k()) else {
            return false;
        };
        let next = if k == transform.k() {
            Ok(transform)
        } else {
            Transform::new(transform.x(), transform.y(), k)
        };
        self.publish_result(next)
    }

    /// Wheel: zoom around the pointer with the modifier held, pan otherwise.
    pub fn handle_wheel(&mut self, delta: ScrollDelta, position: Point, zoom_modifier: bool) -> bool {
        let was_active = self.gesture_active;
        self.begin_gesture();

        let changed = if zoom_modifier {
            let factor = match delta {
                ScrollDelta::Pixels(d) => 1.0 - d.y / self.wheel.pixel_zoom_sensitivity,
                ScrollDelta::Lines(d) => 1.0 - d.y / self.wheel.line_zoom_sensitivity,
            };
            if (factor - 1.0).abs() > MIN_ZOOM_FACTOR_DELTA && factor > 0.0 {
                self.zoom_around(factor, position)
            } else {
                trace!(factor, "Ignoring negligible wheel zoom");
                false
            }
        } else {
            match delta {
                ScrollDelta::Pixels(d) => self.pan_by(d),
                ScrollDelta::Lines(d) => self.pan_by(d * self.wheel.line_scroll_step),
            }
        };

        if !was_active {
            self.end_gesture();
        }
        changed
    }

    /// Swap in new limits and wheel tuning, re-clamping the current scale.
    pub fn reconfigure(&mut self, limits: ZoomLimits, wheel: WheelConfig) -> bool {
        self.limits = limits;
        self.wheel = wheel;
        self.set_transform(self.current_transform())
    }

    fn publish_result(&mut self, next: CanvasResult<Transform>) -> bool {
        match next {
            Ok(next) => self.publish(next),
            Err(e) => {
                warn!(error = %e, "Rejected transform update");
                false
            }
        }
    }

    fn publish(&mut self, next: Transform) -> bool {
        if next == self.current_transform() {
            return false;
        }
        self.cell.set(next);
        trace!(x = next.x(), y = next.y(), k = next.k(), "Transform updated");
        self.subscribers.notify(&next);
        true
    }
}
