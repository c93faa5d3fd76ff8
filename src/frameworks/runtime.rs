// Framework bootstrap: logging, task wiring and shutdown.

use crate::frameworks::clock::{self, StepGate, TickerGate};
use crate::frameworks::config;
use crate::interface_adapters::pilot::demo_pilot;
use crate::interface_adapters::{InputTable, Renderer, TraceRenderer};
use crate::use_cases::{ControlEvent, Frame, MatchPhase, MatchSession};

use std::io::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Handles to a running engine: the ticker and simulator tasks plus the
/// channels the outside world talks to them through.
pub struct Engine {
    pub input: Arc<InputTable>,
    pub frames: watch::Receiver<Frame>,
    pub phases: watch::Receiver<MatchPhase>,
    pub control: mpsc::Sender<ControlEvent>,
    shutdown: Arc<Notify>,
    ticker: JoinHandle<()>,
    simulator: JoinHandle<()>,
}

impl Engine {
    /// Stops both tasks and waits for them to unwind.
    pub async fn shutdown(self) {
        self.shutdown.notify_waiters();
        let _ = self.ticker.await;
        let _ = self.simulator.await;
    }
}

/// Spawns the ticker and simulator pair around an existing session.
pub fn spawn_engine(
    session: MatchSession,
    renderer: Box<dyn Renderer + Send>,
    period: Duration,
) -> Engine {
    let input = Arc::new(InputTable::new());
    let shutdown = Arc::new(Notify::new());

    // frames: the latest captured frame, for observers and the demo pilot.
    let first_frame = Frame::capture(session.world(), 0, session.phase());
    let (frame_tx, frames) = watch::channel(first_frame);

    // phases: high-level match state changes only.
    let (phase_tx, phases) = watch::channel(session.phase());

    // control: out-of-band events (pause, new match) into the simulator.
    let (control, control_rx) = mpsc::channel(config::CONTROL_CHANNEL_CAPACITY);

    let (ticker_gate, step_gate) = clock::tick_gate();
    let ticker = tokio::spawn(ticker_task(ticker_gate, period, shutdown.clone()));
    let simulator = tokio::spawn(simulator_task(
        step_gate,
        session,
        input.clone(),
        renderer,
        frame_tx,
        phase_tx,
        control_rx,
        shutdown.clone(),
    ));

    Engine {
        input,
        frames,
        phases,
        control,
        shutdown,
        ticker,
        simulator,
    }
}

/// Boots the engine from environment configuration and runs until Ctrl-C.
pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let seed = config::rng_seed();
    info!(seed, "starting match");
    let session = MatchSession::new(seed);

    let renderer: Box<dyn Renderer + Send> = match config::record_path() {
        Some(path) => {
            info!(path, "recording frames");
            Box::new(TraceRenderer::with_record(&path)?)
        }
        None => Box::new(TraceRenderer::new()),
    };

    let period = config::tick_interval();
    info!(period_ms = period.as_millis() as u64, "tick period");
    let engine = spawn_engine(session, renderer, period);

    if config::demo_enabled() {
        tokio::spawn(demo_pilot(
            engine.input.clone(),
            engine.frames.clone(),
            engine.control.clone(),
            engine.shutdown.clone(),
        ));
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    engine.shutdown().await;
    Ok(())
}

/// Paces the simulator; one step grant per period, no catch-up bursts.
async fn ticker_task(mut gate: TickerGate, period: Duration, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            result = gate.cycle(period) => {
                if result.is_err() {
                    debug!("simulator gone, ticker stopping");
                    break;
                }
            }
        }
    }
}

/// Owns the session: applies control events, snapshots input, runs one tick
/// per grant and publishes the frame.
#[allow(clippy::too_many_arguments)]
async fn simulator_task(
    mut gate: StepGate,
    mut session: MatchSession,
    input: Arc<InputTable>,
    mut renderer: Box<dyn Renderer + Send>,
    frame_tx: watch::Sender<Frame>,
    phase_tx: watch::Sender<MatchPhase>,
    mut control_rx: mpsc::Receiver<ControlEvent>,
    shutdown: Arc<Notify>,
) {
    let mut tick: u64 = 0;
    let mut paused = false;
    loop {
        let step = tokio::select! {
            _ = shutdown.notified() => break,
            granted = gate.granted() => match granted {
                Ok(step) => step,
                Err(_) => {
                    debug!("ticker gone, simulator stopping");
                    break;
                }
            },
        };

        while let Ok(event) = control_rx.try_recv() {
            match event {
                ControlEvent::TogglePause => {
                    if matches!(session.phase(), MatchPhase::Over { .. }) {
                        session.new_match();
                        paused = false;
                    } else {
                        paused = !paused;
                        info!(paused, "pause toggled");
                    }
                }
                ControlEvent::NewMatch => {
                    session.new_match();
                    paused = false;
                }
            }
        }

        if !paused {
            let keys = input.snapshot();
            let report = session.tick(keys);
            tick += 1;
            for mark in report.marks {
                renderer.register_object_mark(&session.world().terrain, mark);
            }
        }

        let frame = Frame::capture(session.world(), tick, session.phase());
        if let Err(error) = renderer.render(&session.world().terrain, &frame) {
            warn!(%error, "frame dropped");
        }
        let _ = frame_tx.send(frame);
        phase_tx.send_if_modified(|phase| {
            let changed = *phase != session.phase();
            *phase = session.phase();
            changed
        });

        gate.complete(step);
    }
}
