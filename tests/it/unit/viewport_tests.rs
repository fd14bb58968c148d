//! Unit tests for the viewport controller.

use crate::helpers::assert_point_near;
use cardcanvas::input::SuppressionSource;
use cardcanvas::viewport::WheelConfig;
use cardcanvas::{
    GestureEvent, InputSuppressor, Point, ScrollDelta, Settings, Transform, ViewportController,
    ZoomLimits,
};

fn controller() -> (ViewportController, InputSuppressor) {
    let gate = InputSuppressor::new();
    let vc = ViewportController::from_settings(&Settings::default(), gate.clone()).unwrap();
    (vc, gate)
}

#[test]
fn test_gesture_stream_pans_and_zooms() {
    let (mut vc, gate) = controller();

    vc.handle_gesture(GestureEvent::Start);
    assert!(vc.is_gesture_active());
    assert!(vc.handle_gesture(GestureEvent::Pan(Point::new(10.0, -5.0))));
    assert!(vc.handle_gesture(GestureEvent::Zoom {
        factor: 2.0,
        anchor: Point::new(10.0, -5.0),
    }));
    assert!(gate.is_held_by(SuppressionSource::Gesture));
    vc.handle_gesture(GestureEvent::End);

    // the anchor was the pan origin, so the offset is unchanged
    assert_eq!(vc.current_transform(), Transform::new(10.0, -5.0, 2.0).unwrap());
    assert!(!vc.is_gesture_active());
    assert!(!gate.is_suppressed());
}

#[test]
fn test_zoom_keeps_logical_point_under_anchor() {
    let (mut vc, _) = controller();
    vc.pan_by(Point::new(37.0, 11.0));
    let anchor = Point::new(320.0, 240.0);
    let logical = vc.current_transform().to_logical(anchor);

    for factor in [1.7, 0.4, 3.0] {
        vc.zoom_around(factor, anchor);
        assert_point_near(vc.current_transform().to_screen(logical), anchor);
    }
}

#[test]
fn test_clamped_zoom_still_keeps_anchor() {
    let (mut vc, _) = controller();
    let anchor = Point::new(50.0, 50.0);
    let logical = vc.current_transform().to_logical(anchor);

    vc.zoom_around(100.0, anchor);
    assert_eq!(vc.current_transform().k(), vc.limits().max());
    assert_point_near(vc.current_transform().to_screen(logical), anchor);
}

#[test]
fn test_zoom_at_limit_reports_no_change() {
    let (mut vc, _) = controller();
    vc.zoom_around(100.0, Point::ZERO);
    assert!(!vc.zoom_around(2.0, Point::ZERO));
}

#[test]
fn test_nan_zoom_factor_rejected() {
    let (mut vc, _) = controller();
    assert!(!vc.zoom_around(f64::NAN, Point::ZERO));
    assert_eq!(vc.current_transform(), Transform::IDENTITY);
}

#[test]
fn test_set_transform_clamps_scale() {
    let (mut vc, _) = controller();
    vc.handle_gesture(GestureEvent::Set(Transform::new(5.0, 6.0, 50.0).unwrap()));
    assert_eq!(vc.current_transform(), Transform::new(5.0, 6.0, 8.0).unwrap());
}

#[test]
fn test_wheel_pixels_pan_without_modifier() {
    let (mut vc, gate) = controller();
    assert!(vc.handle_wheel(ScrollDelta::Pixels(Point::new(-3.0, 12.0)), Point::ZERO, false));
    assert_eq!(vc.current_transform().offset(), Point::new(-3.0, 12.0));
    assert!(!gate.is_suppressed());
}

#[test]
fn test_wheel_lines_zoom_out_with_modifier() {
    let (mut vc, _) = controller();
    // 1 - 5 / 50
    assert!(vc.handle_wheel(ScrollDelta::Lines(Point::new(0.0, 5.0)), Point::ZERO, true));
    assert!((vc.current_transform().k() - 0.9).abs() < 1e-12);
}

#[test]
fn test_negligible_wheel_zoom_ignored() {
    let (mut vc, _) = controller();
    assert!(!vc.handle_wheel(ScrollDelta::Pixels(Point::new(0.0, 0.1)), Point::ZERO, true));
    assert_eq!(vc.current_transform(), Transform::IDENTITY);
}

#[test]
fn test_custom_wheel_tuning() {
    let gate = InputSuppressor::new();
    let wheel = WheelConfig {
        pixel_zoom_sensitivity: 100.0,
        line_zoom_sensitivity: 10.0,
        line_scroll_step: 5.0,
    };
    let mut vc = ViewportController::new(ZoomLimits::new(0.5, 4.0).unwrap(), wheel, gate);

    vc.handle_wheel(ScrollDelta::Lines(Point::new(2.0, 0.0)), Point::ZERO, false);
    assert_eq!(vc.current_transform().offset(), Point::new(10.0, 0.0));

    vc.handle_wheel(ScrollDelta::Pixels(Point::new(0.0, -100.0)), Point::ZERO, true);
    assert_eq!(vc.current_transform().k(), 2.0);
}

#[test]
fn test_limits_excluding_one_start_clamped() {
    let gate = InputSuppressor::new();
    let limits = ZoomLimits::new(2.0, 4.0).unwrap();
    let vc = ViewportController::new(limits, Settings::default().wheel_config().unwrap(), gate);
    assert_eq!(vc.current_transform().k(), 2.0);
}

#[test]
fn test_zoom_limits_clamp_rejects_only_nan() {
    let limits = ZoomLimits::new(0.5, 4.0).unwrap();
    assert_eq!(limits.clamp(f64::NAN), None);
    assert_eq!(limits.clamp(f64::INFINITY), Some(4.0));
    assert_eq!(limits.clamp(f64::NEG_INFINITY), Some(0.5));
    assert_eq!(limits.clamp(2.0), Some(2.0));
}
