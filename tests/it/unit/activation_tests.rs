//! Unit tests for the activation tracker state machine.

use cardcanvas::input::SuppressionSource;
use cardcanvas::settings::Settings;
use cardcanvas::{
    ActivationState, ActivationTracker, Card, InputSuppressor, Point, Transition,
    ViewportController,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Fixture {
    tracker: ActivationTracker,
    viewport: ViewportController,
    gate: InputSuppressor,
    cards: Vec<Card>,
}

fn fixture() -> Fixture {
    let gate = InputSuppressor::new();
    let viewport = ViewportController::from_settings(&Settings::default(), gate.clone()).unwrap();
    let tracker = ActivationTracker::new(gate.clone(), viewport.reader());
    let cards = vec![
        Card::new(1, (0.0, 0.0), "one"),
        Card::new(2, (200.0, 0.0), "two"),
        Card::new(3, (400.0, 0.0), "three"),
    ];
    Fixture {
        tracker,
        viewport,
        gate,
        cards,
    }
}

#[test]
fn test_starts_idle() {
    let f = fixture();
    assert_eq!(f.tracker.state(), ActivationState::Idle);
    assert!(f.tracker.drag_session().is_none());
}

#[test]
fn test_hover_enter_activates() {
    let mut f = fixture();
    assert_eq!(f.tracker.hover_enter(1, &f.cards), Transition::Changed);
    assert_eq!(f.tracker.state(), ActivationState::Hovering(1));
}

#[test]
fn test_hover_enter_same_card_is_unchanged() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    assert_eq!(f.tracker.hover_enter(1, &f.cards), Transition::Unchanged);
}

#[test]
fn test_hover_enter_other_card_switches() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    assert_eq!(f.tracker.hover_enter(2, &f.cards), Transition::Changed);
    assert_eq!(f.tracker.state(), ActivationState::Hovering(2));
}

#[test]
fn test_hover_enter_unknown_card_resets() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    assert_eq!(f.tracker.hover_enter(99, &f.cards), Transition::Changed);
    assert_eq!(f.tracker.state(), ActivationState::Idle);
}

#[test]
fn test_hover_enter_suppressed_is_ignored() {
    let mut f = fixture();
    f.gate.engage(SuppressionSource::Gesture);
    assert_eq!(f.tracker.hover_enter(1, &f.cards), Transition::Ignored);
    assert!(f.tracker.state().is_idle());
}

#[test]
fn test_stale_hover_leave_is_ignored() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.hover_enter(2, &f.cards);
    assert_eq!(f.tracker.hover_leave(1), Transition::Ignored);
    assert_eq!(f.tracker.state(), ActivationState::Hovering(2));
    assert_eq!(f.tracker.hover_leave(2), Transition::Changed);
    assert!(f.tracker.state().is_idle());
}

#[test]
fn test_drag_start_requires_hover_on_same_card() {
    let mut f = fixture();
    assert_eq!(f.tracker.drag_start(1), Transition::Ignored);

    f.tracker.hover_enter(1, &f.cards);
    assert_eq!(f.tracker.drag_start(2), Transition::Ignored);
    assert_eq!(f.tracker.state(), ActivationState::Hovering(1));
    assert!(!f.gate.is_suppressed());
}

#[test]
fn test_drag_start_engages_suppression() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    assert_eq!(f.tracker.drag_start(1), Transition::Changed);
    assert!(f.gate.is_held_by(SuppressionSource::Drag));
    assert_eq!(
        f.tracker.state(),
        ActivationState::Dragging {
            card_id: 1,
            live_delta: Point::ZERO
        }
    );
}

#[test]
fn test_hover_and_leave_ignored_while_dragging() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);

    assert_eq!(f.tracker.hover_enter(2, &f.cards), Transition::Ignored);
    assert_eq!(f.tracker.hover_leave(1), Transition::Ignored);
    assert_eq!(f.tracker.state().dragged_card(), Some(1));
}

#[test]
fn test_drag_move_updates_live_delta() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);

    assert_eq!(f.tracker.drag_move(Point::new(5.0, 0.0)), Transition::Changed);
    assert_eq!(f.tracker.drag_move(Point::new(5.0, 0.0)), Transition::Unchanged);
    assert_eq!(f.tracker.state().live_delta(), Point::new(5.0, 0.0));
    assert_eq!(f.tracker.drag_session().map(|s| s.move_count()), Some(2));
}

#[test]
fn test_drag_move_outside_drag_is_ignored() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    assert_eq!(f.tracker.drag_move(Point::new(5.0, 5.0)), Transition::Ignored);
}

#[test]
fn test_drag_end_commits_scaled_delta() {
    let mut f = fixture();
    f.viewport.zoom_around(2.0, Point::ZERO);
    f.tracker.hover_enter(2, &f.cards);
    f.tracker.drag_start(2);

    assert_eq!(f.tracker.drag_end(Point::new(20.0, 10.0), &mut f.cards), Transition::Changed);
    assert_eq!(f.cards[1].coordinates, Point::new(210.0, 5.0));
    assert_eq!(f.tracker.state(), ActivationState::Hovering(2));
    assert!(!f.gate.is_suppressed());
}

#[test]
fn test_drag_end_zero_delta_leaves_card() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);
    f.tracker.drag_move(Point::new(30.0, 30.0));

    f.tracker.drag_end(Point::ZERO, &mut f.cards);
    assert_eq!(f.cards[0].coordinates, Point::ZERO);
    assert_eq!(f.tracker.state(), ActivationState::Hovering(1));
}

#[test]
fn test_drag_end_overflowing_coordinates_not_committed() {
    let mut f = fixture();
    f.viewport.zoom_around(0.01, Point::ZERO);
    assert_eq!(f.viewport.current_transform().k(), 0.1);
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);

    assert_eq!(f.tracker.drag_end(Point::new(1e308, 0.0), &mut f.cards), Transition::Changed);
    assert_eq!(f.cards[0].coordinates, Point::ZERO);
    assert_eq!(f.tracker.state(), ActivationState::Hovering(1));
    assert!(!f.gate.is_suppressed());
}

#[test]
fn test_drag_end_without_drag_is_ignored() {
    let mut f = fixture();
    assert_eq!(f.tracker.drag_end(Point::new(1.0, 1.0), &mut f.cards), Transition::Ignored);
    assert_eq!(f.cards[0].coordinates, Point::ZERO);
}

#[test]
fn test_drag_end_after_card_removed_goes_idle() {
    let mut f = fixture();
    f.tracker.hover_enter(3, &f.cards);
    f.tracker.drag_start(3);
    f.cards.retain(|card| card.id != 3);

    assert_eq!(f.tracker.drag_end(Point::new(9.0, 9.0), &mut f.cards), Transition::Changed);
    assert!(f.tracker.state().is_idle());
    assert!(!f.gate.is_suppressed());
}

#[test]
fn test_reset_from_drag_releases_claim() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);

    assert_eq!(f.tracker.reset(), Transition::Changed);
    assert!(f.tracker.state().is_idle());
    assert!(!f.gate.is_suppressed());
    assert_eq!(f.tracker.reset(), Transition::Unchanged);
}

#[test]
fn test_reset_keeps_gesture_claim() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);
    f.viewport.begin_gesture();

    f.tracker.reset();
    assert!(f.gate.is_held_by(SuppressionSource::Gesture));
    assert!(!f.gate.is_held_by(SuppressionSource::Drag));
}

#[test]
fn test_retain_existing_resets_only_when_active_card_gone() {
    let mut f = fixture();
    f.tracker.hover_enter(1, &f.cards);

    f.cards.retain(|card| card.id != 2);
    assert_eq!(f.tracker.retain_existing(&f.cards), Transition::Unchanged);

    f.cards.retain(|card| card.id != 1);
    assert_eq!(f.tracker.retain_existing(&f.cards), Transition::Changed);
    assert!(f.tracker.state().is_idle());
}

#[test]
fn test_subscribers_see_each_transition() {
    let mut f = fixture();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in = Rc::clone(&seen);
    let _sub = f.tracker.subscribe(move |state| seen_in.borrow_mut().push(*state));

    f.tracker.hover_enter(1, &f.cards);
    f.tracker.hover_enter(1, &f.cards);
    f.tracker.drag_start(1);
    f.tracker.drag_end(Point::ZERO, &mut f.cards);
    f.tracker.hover_leave(1);

    assert_eq!(
        *seen.borrow(),
        vec![
            ActivationState::Hovering(1),
            ActivationState::Dragging {
                card_id: 1,
                live_delta: Point::ZERO
            },
            ActivationState::Hovering(1),
            ActivationState::Idle,
        ]
    );
}
