// Scripted demo pilot.
//
// Drives both seats from a fixed script so the engine can be watched end to
// end without real input hardware: both craft thrust, weave and fire, and a
// decided match is restarted after a short pause on the wreck.

use crate::interface_adapters::input::InputTable;
use crate::use_cases::snapshot::Frame;
use crate::use_cases::types::{Action, ControlEvent, MatchPhase};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Notify};
use tracing::info;

const WEAVE_PERIOD: Duration = Duration::from_secs(2);
const RESTART_DELAY: Duration = Duration::from_secs(3);

pub async fn demo_pilot(
    input: Arc<InputTable>,
    mut frame_rx: watch::Receiver<Frame>,
    control_tx: mpsc::Sender<ControlEvent>,
    shutdown: Arc<Notify>,
) {
    info!("demo pilot at the controls");
    press_script(&input);

    let mut weave = tokio::time::interval(WEAVE_PERIOD);
    let mut turning_right = false;
    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            _ = weave.tick() => {
                turning_right = !turning_right;
                input.set(0, Action::TurnRight, turning_right);
                input.set(0, Action::TurnLeft, !turning_right);
                input.set(1, Action::TurnLeft, turning_right);
            }
            changed = frame_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let over = matches!(frame_rx.borrow().phase, MatchPhase::Over { .. });
                if over {
                    input.clear();
                    tokio::time::sleep(RESTART_DELAY).await;
                    if control_tx.send(ControlEvent::TogglePause).await.is_err() {
                        break;
                    }
                    // Skip the frames that piled up while we watched the wreck.
                    frame_rx.mark_unchanged();
                    press_script(&input);
                }
            }
        }
    }
}

fn press_script(input: &InputTable) {
    for player in 0..2 {
        input.set(player, Action::Thrust, true);
    }
    input.set(0, Action::FirePrimary, true);
    input.set(1, Action::FireSecondary, true);
}
