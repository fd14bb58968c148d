//! Headless demo: scatter random cards, replay a hover/drag/zoom session and
//! print the resulting frame.
//!
//! ```text
//! cardcanvas [CARD_COUNT]
//! RUST_LOG=cardcanvas=debug cardcanvas 50
//! ```

use anyhow::{Context, Result, bail};
use cardcanvas::perf::GestureProfiler;
use cardcanvas::{Canvas, CanvasEvent, Card, CardHost, Frame, Point, ScrollDelta, Settings};
use rand::Rng;
use tracing::info;

const DEFAULT_CARD_COUNT: usize = 24;
const SCATTER_WIDTH: f64 = 1600.0;
const SCATTER_HEIGHT: f64 = 900.0;

fn main() -> Result<()> {
    cardcanvas::logging::init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("Invalid card count: {arg}"))?,
        None => DEFAULT_CARD_COUNT,
    };
    if count == 0 {
        bail!("Card count must be at least 1");
    }

    let mut cards = random_cards(count);
    let mut canvas = Canvas::new(Settings::load(), &cards).context("Failed to create canvas")?;

    let profiler = GestureProfiler::global();
    canvas.set_gesture_hook(profiler.clone());
    let _activation = canvas.subscribe_activation(|state| info!(?state, "Activation changed"));

    run_session(&mut canvas, &mut cards)?;

    let frame = canvas.frame(&cards);
    print_summary(&frame, &cards);
    profiler.log_summary();
    Ok(())
}

fn random_cards(count: usize) -> Vec<Card> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let position = Point::new(
                rng.gen_range(0.0..SCATTER_WIDTH),
                rng.gen_range(0.0..SCATTER_HEIGHT),
            );
            Card::new(i as u64 + 1, position, format!("Card {}", i + 1))
        })
        .collect()
}

/// Zoom in, hover the first card, drag it and release.
fn run_session(canvas: &mut Canvas, cards: &mut Vec<Card>) -> Result<()> {
    canvas.handle(
        CanvasEvent::Wheel {
            delta: ScrollDelta::Pixels(Point::new(0.0, -250.0)),
            position: Point::ZERO,
            zoom_modifier: true,
        },
        cards,
    );
    canvas.frame(&*cards);

    let size = canvas.layer().card_size();
    let first = cards.first().context("No cards to interact with")?;
    let center = Point::new(
        first.coordinates.x + size.width / 2.0,
        first.coordinates.y + size.height / 2.0,
    );
    let pointer = canvas.transform().to_screen(center);

    canvas.handle(CanvasEvent::PointerMoved(pointer), cards);
    canvas.frame(&*cards);
    let Some(target) = canvas.state().active_card() else {
        bail!("Pointer at {pointer:?} did not activate a card");
    };
    let origin = cards
        .card(target)
        .map(|card| card.coordinates)
        .context("Active card missing from host")?;

    canvas.handle(CanvasEvent::DragStart(target), cards);
    for step in 1..=10 {
        let delta = Point::new(step as f64 * 8.0, step as f64 * 3.0);
        canvas.handle(CanvasEvent::DragMove(delta), cards);
        canvas.frame(&*cards);
    }
    canvas.handle(CanvasEvent::DragEnd(Point::new(80.0, 30.0)), cards);
    canvas.frame(&*cards);

    if let Some(card) = cards.card(target) {
        info!(
            card_id = target,
            from = ?origin,
            to = ?card.coordinates,
            "Card moved"
        );
    }
    Ok(())
}

fn print_summary(frame: &Frame, cards: &[Card]) {
    let t = frame.transform;
    println!("cards:     {}", cards.len());
    println!("transform: x={:.1} y={:.1} k={:.2}", t.x(), t.y(), t.k());
    println!("revision:  {}", frame.layer_revision);
    match frame.overlay.active_card() {
        Some(id) => {
            let handle = &frame.overlay.handle;
            println!(
                "active:    card {} handle at ({:.1}, {:.1})",
                id, handle.screen.x, handle.screen.y
            );
        }
        None => println!("active:    none"),
    }
}
