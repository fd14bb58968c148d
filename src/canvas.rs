//! Canvas - wires the viewport, activation tracker, static layer and overlay.
//!
//! The canvas owns every interaction component but not the cards: each call
//! borrows the host for the duration of one event. Events are applied
//! synchronously and in order; after any event the next [`Canvas::frame`]
//! reflects all of its effects.
//!
//! ## Performance Notes
//!
//! Pointer and drag events run at input frequency. Only the overlay pair is
//! re-derived per frame; the static layer is rebuilt on [`Canvas::sync_cards`]
//! and after a committed drag, never on hover or drag-move.

use crate::error::CanvasResult;
use crate::host::CardHost;
use crate::input::{ActivationState, ActivationTracker, InputSuppressor, Transform, Transition};
use crate::perf::{GestureHook, GestureSpan};
use crate::profile_scope;
use crate::render::{CardLayer, OverlayCoordinator, OverlayFrame, StaticNode};
use crate::settings::Settings;
use crate::subscription::Subscription;
use crate::types::{CardId, Point, ScrollDelta};
use crate::viewport::{GestureEvent, ViewportController};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Normalized input stream consumed by [`Canvas::handle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasEvent {
    /// Pointer entered a static card
    HoverEnter(CardId),
    /// Pointer left the overlay of a card
    HoverLeave(CardId),
    /// Raw pointer position (screen); hit-tested into enter/leave
    PointerMoved(Point),
    /// Drag began on the handle of a card
    DragStart(CardId),
    /// Screen-space displacement since drag start
    DragMove(Point),
    /// Final screen-space displacement since drag start
    DragEnd(Point),
    /// Pan/zoom gesture stream
    Gesture(GestureEvent),
    Wheel {
        delta: ScrollDelta,
        position: Point,
        zoom_modifier: bool,
    },
    /// External cancellation
    Reset,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub transform: Transform,
    /// Shared with the layer; unchanged while `layer_revision` is unchanged
    pub static_nodes: Rc<[StaticNode]>,
    pub layer_revision: u64,
    /// False while pan/zoom or drag gates hover detection
    pub static_layer_interactive: bool,
    pub overlay: OverlayFrame,
}

impl Frame {
    /// Absolute screen `(left, top)` of every static node.
    pub fn static_screen_positions(&self) -> impl Iterator<Item = (CardId, Point)> + '_ {
        self.static_nodes
            .iter()
            .map(|node| (node.card_id, node.screen_position(&self.transform)))
    }

    /// A static node takes pointer input only while the layer is ungated and
    /// the node is not occluded by the cover.
    pub fn is_static_interactive(&self, card_id: CardId) -> bool {
        self.static_layer_interactive && self.overlay.active_card() != Some(card_id)
    }
}

pub struct Canvas {
    settings: Settings,
    suppressor: InputSuppressor,
    viewport: ViewportController,
    tracker: ActivationTracker,
    layer: CardLayer,
    hook: Option<Arc<dyn GestureHook>>,
    pending_spans: Vec<GestureSpan>,
}

impl Canvas {
    /// Fails on settings that cannot drive the coordinate math.
    pub fn new(settings: Settings, host: &impl CardHost) -> CanvasResult<Self> {
        settings.validate()?;
        let suppressor = InputSuppressor::new();
        let viewport = ViewportController::from_settings(&settings, suppressor.clone())?;
        let tracker = ActivationTracker::new(suppressor.clone(), viewport.reader());
        let layer = CardLayer::new(host.cards(), settings.card_size, suppressor.clone());
        debug!(cards = host.cards().len(), "Canvas created");

        Ok(Self {
            settings,
            suppressor,
            viewport,
            tracker,
            layer,
            hook: None,
            pending_spans: Vec::new(),
        })
    }

    /// Apply one input event. Returns true if the next frame differs.
    pub fn handle(&mut self, event: CanvasEvent, host: &mut impl CardHost) -> bool {
        profile_scope!("canvas_handle");

        match event {
            CanvasEvent::HoverEnter(card_id) => {
                let tracker = &mut self.tracker;
                let transition = self
                    .layer
                    .pointer_enter(card_id, |id| tracker.hover_enter(id, &*host))
                    .unwrap_or(Transition::Ignored);
                self.open_span_if(transition, GestureSpan::Hover)
            }
            CanvasEvent::HoverLeave(card_id) => self.tracker.hover_leave(card_id).changed(),
            CanvasEvent::PointerMoved(screen) => self.pointer_moved(screen, &*host),
            CanvasEvent::DragStart(card_id) => {
                let transition = self.tracker.drag_start(card_id);
                self.open_span_if(transition, GestureSpan::DragStart)
            }
            CanvasEvent::DragMove(delta) => self.tracker.drag_move(delta).changed(),
            CanvasEvent::DragEnd(delta) => self.drag_end(delta, host),
            CanvasEvent::Gesture(gesture) => {
                let moved = self.viewport.handle_gesture(gesture);
                if moved {
                    self.open_span(GestureSpan::ZoomPan);
                }
                // start/end flip the static layer's interactivity
                moved || matches!(gesture, GestureEvent::Start | GestureEvent::End)
            }
            CanvasEvent::Wheel {
                delta,
                position,
                zoom_modifier,
            } => {
                let moved = self.viewport.handle_wheel(delta, position, zoom_modifier);
                if moved {
                    self.open_span(GestureSpan::ZoomPan);
                }
                moved
            }
            CanvasEvent::Reset => self.tracker.reset().changed(),
        }
    }

    /// Derive the current frame. Closes any open gesture spans.
    pub fn frame(&mut self, host: &impl CardHost) -> Frame {
        profile_scope!("canvas_frame");

        let transform = self.viewport.current_transform();
        let state = self.tracker.state();
        let frame = Frame {
            transform,
            static_nodes: self.layer.nodes(),
            layer_revision: self.layer.revision(),
            static_layer_interactive: self.layer.is_interactive(),
            overlay: OverlayCoordinator::project(&state, &transform, host),
        };
        self.close_spans();
        frame
    }

    /// The host's list changed: rebuild the static layer and drop the
    /// activation if its card is gone.
    pub fn sync_cards(&mut self, host: &impl CardHost) {
        self.layer.sync(host.cards());
        if self.tracker.retain_existing(host).changed() {
            debug!("Active card removed by host, activation reset");
        }
    }

    /// Apply reloaded settings. Invalid settings leave everything as is.
    pub fn apply_settings(&mut self, settings: Settings, host: &impl CardHost) -> CanvasResult<()> {
        settings.validate()?;
        let limits = settings.zoom_limits()?;
        self.viewport.reconfigure(limits, settings.wheel_config()?);
        if settings.card_size != self.settings.card_size {
            self.layer.set_card_size(settings.card_size, host.cards());
        }
        info!(
            min_zoom = limits.min(),
            max_zoom = limits.max(),
            "Canvas settings applied"
        );
        self.settings = settings;
        Ok(())
    }

    pub fn set_gesture_hook(&mut self, hook: Arc<dyn GestureHook>) {
        self.hook = Some(hook);
    }

    pub fn clear_gesture_hook(&mut self) {
        self.hook = None;
        self.pending_spans.clear();
    }

    pub fn subscribe_transform(
        &self,
        callback: impl Fn(&Transform) + 'static,
    ) -> Subscription<Transform> {
        self.viewport.subscribe(callback)
    }

    pub fn subscribe_activation(
        &self,
        callback: impl Fn(&ActivationState) + 'static,
    ) -> Subscription<ActivationState> {
        self.tracker.subscribe(callback)
    }

    pub fn state(&self) -> ActivationState {
        self.tracker.state()
    }

    pub fn transform(&self) -> Transform {
        self.viewport.current_transform()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressor.is_suppressed()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn layer(&self) -> &CardLayer {
        &self.layer
    }

    fn pointer_moved(&mut self, screen: Point, host: &impl CardHost) -> bool {
        if !self.layer.is_interactive() {
            trace!("Pointer move while gated");
            return false;
        }
        let transform = self.viewport.current_transform();
        let active = self.tracker.state().active_card();

        // the overlay pair sits above every static node
        if let Some(active) = active {
            if self.layer.contains(active, screen, &transform) {
                return false;
            }
        }

        match self.layer.card_at(screen, &transform) {
            Some(hit) => {
                let tracker = &mut self.tracker;
                let transition = self
                    .layer
                    .pointer_enter(hit, |id| tracker.hover_enter(id, host))
                    .unwrap_or(Transition::Ignored);
                self.open_span_if(transition, GestureSpan::Hover)
            }
            None => active.is_some_and(|id| self.tracker.hover_leave(id).changed()),
        }
    }

    fn drag_end(&mut self, delta: Point, host: &mut impl CardHost) -> bool {
        let dragged = self.tracker.state().dragged_card();
        let before = dragged.and_then(|id| host.card(id)).map(|card| card.coordinates);

        let transition = self.tracker.drag_end(delta, host);

        let after = dragged.and_then(|id| host.card(id)).map(|card| card.coordinates);
        if before != after {
            self.layer.sync(host.cards());
        }
        self.open_span_if(transition, GestureSpan::DragEnd)
    }

    fn open_span_if(&mut self, transition: Transition, span: GestureSpan) -> bool {
        if transition.changed() {
            self.open_span(span);
        }
        transition.changed()
    }

    fn open_span(&mut self, span: GestureSpan) {
        let Some(hook) = &self.hook else {
            return;
        };
        hook.span_start(span);
        if !self.pending_spans.contains(&span) {
            self.pending_spans.push(span);
        }
    }

    fn close_spans(&mut self) {
        let Some(hook) = &self.hook else {
            return;
        };
        for span in self.pending_spans.drain(..) {
            hook.span_end(span);
        }
    }
}
