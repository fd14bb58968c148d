//! Activation tracker - owner of the single active card.
//!
//! Arbitrates between hover and drag. Hover-enter events are dropped while
//! the [`InputSuppressor`] is engaged; starting a drag engages it and ending
//! the drag releases it. A drag can only start from `Hovering` on the same
//! card, and a completed non-zero drag is committed to the host through
//! [`CardHost::commit_move`] using the scale current at commit time.

use crate::host::CardHost;
use crate::input::drag::{DragOutcome, DragSession};
use crate::input::state::ActivationState;
use crate::input::suppressor::{InputSuppressor, SuppressionSource};
use crate::subscription::{Subscribers, Subscription};
use crate::types::{CardId, Point};
use crate::viewport::TransformReader;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Hovering(CardId),
    Dragging(DragSession),
}

/// Result of feeding one event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// State changed
    Changed,
    /// Event was valid but left the state as it was
    Unchanged,
    /// Event was dropped (suppressed, out of order, or stale)
    Ignored,
}

impl Transition {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

pub struct ActivationTracker {
    phase: Phase,
    suppressor: InputSuppressor,
    transform: TransformReader,
    subscribers: Subscribers<ActivationState>,
}

impl ActivationTracker {
    pub fn new(suppressor: InputSuppressor, transform: TransformReader) -> Self {
        Self {
            phase: Phase::Idle,
            suppressor,
            transform,
            subscribers: Subscribers::new(),
        }
    }

    pub fn state(&self) -> ActivationState {
        match &self.phase {
            Phase::Idle => ActivationState::Idle,
            Phase::Hovering(id) => ActivationState::Hovering(*id),
            Phase::Dragging(session) => ActivationState::Dragging {
                card_id: session.card_id(),
                live_delta: session.live_delta(),
            },
        }
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&ActivationState) + 'static,
    ) -> Subscription<ActivationState> {
        self.subscribers.subscribe(callback)
    }

    /// Pointer entered a static card.
    pub fn hover_enter(&mut self, card_id: CardId, host: &impl CardHost) -> Transition {
        if self.suppressor.is_suppressed() {
            trace!(card_id, "Hover-enter suppressed");
            return Transition::Ignored;
        }
        if host.card(card_id).is_none() {
            debug!(card_id, "Hover-enter for a card the host no longer has");
            return self.reset();
        }
        match self.phase {
            Phase::Hovering(current) if current == card_id => Transition::Unchanged,
            // a drag holds the suppressor, so the check above drops these
            Phase::Dragging(_) => Transition::Ignored,
            _ => {
                debug!(card_id, "Card activated");
                self.set_phase(Phase::Hovering(card_id))
            }
        }
    }

    /// Pointer left the active card's overlay.
    pub fn hover_leave(&mut self, card_id: CardId) -> Transition {
        match self.phase {
            Phase::Hovering(current) if current == card_id => {
                debug!(card_id, "Card deactivated");
                self.set_phase(Phase::Idle)
            }
            _ => Transition::Ignored,
        }
    }

    /// Drag started on the handle of `card_id`.
    pub fn drag_start(&mut self, card_id: CardId) -> Transition {
        match self.phase {
            Phase::Hovering(current) if current == card_id => {
                self.suppressor.engage(SuppressionSource::Drag);
                debug!(card_id, "Drag started");
                self.set_phase(Phase::Dragging(DragSession::start(card_id)))
            }
            _ => {
                trace!(card_id, state = ?self.state(), "Drag-start without prior hover");
                Transition::Ignored
            }
        }
    }

    /// Screen-space displacement since the drag started.
    pub fn drag_move(&mut self, screen_delta: Point) -> Transition {
        let Phase::Dragging(session) = &mut self.phase else {
            return Transition::Ignored;
        };
        let before = session.live_delta();
        session.on_move(screen_delta);
        if session.live_delta() == before {
            return Transition::Unchanged;
        }
        let state = self.state();
        self.subscribers.notify(&state);
        Transition::Changed
    }

    /// Drag finished with the final displacement since start. Non-zero
    /// finite deltas are committed as `card + delta / k` when the result is
    /// finite. The card stays
    /// active as `Hovering` since the pointer is still over it.
    pub fn drag_end(&mut self, screen_delta: Point, host: &mut impl CardHost) -> Transition {
        let Phase::Dragging(session) = std::mem::take(&mut self.phase) else {
            return Transition::Ignored;
        };
        self.suppressor.release(SuppressionSource::Drag);

        let outcome = session.finish(screen_delta);
        let card_id = outcome.card_id();
        let Some(origin) = host.card(card_id).map(|card| card.coordinates) else {
            debug!(card_id, "Dragged card disappeared before commit");
            self.subscribers.notify(&ActivationState::Idle);
            return Transition::Changed;
        };

        match outcome {
            DragOutcome::Click { .. } => {
                debug!(card_id, "Drag ended without displacement");
            }
            DragOutcome::Moved { .. } => {
                let transform = self.transform.get();
                if let Some(delta) = outcome.logical_delta(&transform) {
                    let coordinates = origin + delta;
                    if !coordinates.is_finite() {
                        debug!(card_id, k = transform.k(), "Drag overflowed, not committed");
                        return self.set_phase(Phase::Hovering(card_id));
                    }
                    debug!(
                        card_id,
                        x = coordinates.x,
                        y = coordinates.y,
                        k = transform.k(),
                        "Committing card move"
                    );
                    host.commit_move(card_id, coordinates);
                }
            }
        }
        self.set_phase(Phase::Hovering(card_id))
    }

    /// Return to `Idle` from any state, releasing a drag claim.
    pub fn reset(&mut self) -> Transition {
        if matches!(self.phase, Phase::Dragging(_)) {
            self.suppressor.release(SuppressionSource::Drag);
        }
        if matches!(self.phase, Phase::Idle) {
            return Transition::Unchanged;
        }
        debug!("Activation reset");
        self.set_phase(Phase::Idle)
    }

    /// Reset if the active card is no longer in the host's list.
    pub fn retain_existing(&mut self, host: &impl CardHost) -> Transition {
        match self.state().active_card() {
            Some(id) if host.card(id).is_none() => self.reset(),
            _ => Transition::Unchanged,
        }
    }

    fn set_phase(&mut self, phase: Phase) -> Transition {
        self.phase = phase;
        let state = self.state();
        self.subscribers.notify(&state);
        Transition::Changed
    }
}
