// End-to-end flow through the spawned engine: input table in, frames out,
// control events respected.

use skyduel::domain::BOUNDS;
use skyduel::frameworks::runtime::{spawn_engine, Engine};
use skyduel::interface_adapters::TraceRenderer;
use skyduel::use_cases::types::Action;
use skyduel::use_cases::{ControlEvent, MatchPhase, MatchSession};
use std::time::Duration;

const PERIOD: Duration = Duration::from_millis(2);
const SETTLE: Duration = Duration::from_millis(80);

fn engine(seed: u64) -> Engine {
    let session = MatchSession::new(seed);
    spawn_engine(session, Box::new(TraceRenderer::new()), PERIOD)
}

#[tokio::test]
async fn frames_advance_and_stay_in_bounds() {
    let engine = engine(42);
    engine.input.set(0, Action::Thrust, true);
    engine.input.set(1, Action::Thrust, true);
    engine.input.set(0, Action::TurnLeft, true);

    let mut frames = engine.frames.clone();
    let mut last_tick = 0u64;
    while last_tick < 25 {
        frames.changed().await.expect("simulator alive");
        let frame = frames.borrow_and_update().clone();
        assert!(frame.tick >= last_tick, "tick counter never goes backwards");
        last_tick = frame.tick;

        for pair in frame.entities.windows(2) {
            assert!(pair[0].altitude <= pair[1].altitude, "draw order by altitude");
        }
        for status in &frame.players {
            assert!(status.altitude >= 0.0 && status.altitude <= BOUNDS[2]);
            assert!((0.0..=1.0).contains(&status.reloads[0]));
            assert!((0.0..=1.0).contains(&status.reloads[1]));
        }
        for entity in &frame.entities {
            assert!(entity.x >= 0.0 && entity.x <= BOUNDS[0]);
            assert!(entity.y >= 0.0 && entity.y <= BOUNDS[1]);
        }
    }

    engine.shutdown().await;
}

#[tokio::test]
async fn toggle_pause_freezes_and_resumes_the_match() {
    let engine = engine(43);
    tokio::time::sleep(SETTLE).await;

    engine
        .control
        .send(ControlEvent::TogglePause)
        .await
        .expect("simulator alive");
    tokio::time::sleep(SETTLE).await;

    let frozen = engine.frames.borrow().tick;
    tokio::time::sleep(SETTLE).await;
    assert_eq!(
        engine.frames.borrow().tick,
        frozen,
        "a paused match does not simulate"
    );

    engine
        .control
        .send(ControlEvent::TogglePause)
        .await
        .expect("simulator alive");
    tokio::time::sleep(SETTLE).await;
    assert!(
        engine.frames.borrow().tick > frozen,
        "resuming picks the tick counter back up"
    );

    engine.shutdown().await;
}

#[tokio::test]
async fn new_match_keeps_the_engine_flying() {
    let engine = engine(44);
    tokio::time::sleep(SETTLE).await;

    engine
        .control
        .send(ControlEvent::NewMatch)
        .await
        .expect("simulator alive");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(*engine.phases.borrow(), MatchPhase::Flying);
    let tick = engine.frames.borrow().tick;
    tokio::time::sleep(SETTLE).await;
    assert!(
        engine.frames.borrow().tick > tick,
        "the fresh match keeps simulating"
    );

    engine.shutdown().await;
}
