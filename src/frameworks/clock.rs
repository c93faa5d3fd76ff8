// Fixed-rate double-handshake scheduler.
//
// Two actors share the gate: the ticker sleeps one period and grants exactly
// one step; the simulator blocks for the grant, runs one tick, and reports
// completion. The ticker will not start the next period's countdown until
// the previous step completed, so a slow tick delays the schedule instead of
// queueing a backlog. Steps are never double-fired to catch up.
//
// Each side of the handshake is a `watch` channel carrying a step counter,
// so both actors block on channel wakeups instead of polling flags.

use std::time::Duration;
use tokio::sync::watch;

/// The far side of the gate hung up; the match is shutting down.
#[derive(Debug, PartialEq)]
pub struct GateClosed;

/// Ticker half: paces the simulation.
pub struct TickerGate {
    grant_tx: watch::Sender<u64>,
    done_rx: watch::Receiver<u64>,
}

/// Simulator half: receives permission to run exactly one step.
pub struct StepGate {
    grant_rx: watch::Receiver<u64>,
    done_tx: watch::Sender<u64>,
}

/// Creates a connected gate pair.
pub fn tick_gate() -> (TickerGate, StepGate) {
    let (grant_tx, grant_rx) = watch::channel(0u64);
    let (done_tx, done_rx) = watch::channel(0u64);
    (
        TickerGate { grant_tx, done_rx },
        StepGate { grant_rx, done_tx },
    )
}

impl TickerGate {
    /// Sleeps one period, grants the next step, then blocks until the
    /// simulator reports that step complete.
    pub async fn cycle(&mut self, period: Duration) -> Result<(), GateClosed> {
        tokio::time::sleep(period).await;
        let granted = *self.grant_tx.borrow() + 1;
        self.grant_tx.send(granted).map_err(|_| GateClosed)?;
        while *self.done_rx.borrow_and_update() < granted {
            self.done_rx.changed().await.map_err(|_| GateClosed)?;
        }
        Ok(())
    }
}

impl StepGate {
    /// Blocks until a step not yet completed has been granted and returns
    /// its number. Calling again before `complete` returns the same step.
    pub async fn granted(&mut self) -> Result<u64, GateClosed> {
        let completed = *self.done_tx.borrow();
        loop {
            let granted = *self.grant_rx.borrow_and_update();
            if granted > completed {
                return Ok(granted);
            }
            self.grant_rx.changed().await.map_err(|_| GateClosed)?;
        }
    }

    /// Reports a granted step as complete, releasing the ticker.
    pub fn complete(&self, step: u64) {
        let _ = self.done_tx.send(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const PERIOD: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn grants_arrive_one_per_cycle_in_order() {
        let (mut ticker, mut step) = tick_gate();
        let ticker_task = tokio::spawn(async move {
            for _ in 0..3 {
                ticker.cycle(PERIOD).await.expect("simulator alive");
            }
        });

        for expected in 1..=3u64 {
            let step_no = step.granted().await.expect("ticker alive");
            assert_eq!(step_no, expected);
            step.complete(step_no);
        }
        ticker_task.await.expect("ticker task");
    }

    #[tokio::test]
    async fn ticker_blocks_until_step_completes() {
        let (mut ticker, mut step) = tick_gate();
        let ticker_task = tokio::spawn(async move {
            ticker.cycle(PERIOD).await.expect("first cycle");
            ticker.cycle(PERIOD).await.expect("second cycle");
        });

        let step_no = step.granted().await.expect("first grant");
        assert_eq!(step_no, 1);

        // The step is not complete: even after several periods the ticker
        // must still be parked in its first cycle.
        tokio::time::sleep(PERIOD * 10).await;
        assert!(!ticker_task.is_finished(), "ticker ran ahead of the step");

        step.complete(step_no);
        let step_no = step.granted().await.expect("second grant");
        assert_eq!(step_no, 2, "exactly one grant per cycle, no backlog");
        step.complete(step_no);
        ticker_task.await.expect("ticker task");
    }

    #[tokio::test]
    async fn repeated_wait_returns_same_step_until_completed() {
        let (mut ticker, mut step) = tick_gate();
        tokio::spawn(async move {
            let _ = ticker.cycle(PERIOD).await;
        });

        let first = step.granted().await.expect("grant");
        let again = step.granted().await.expect("same grant");
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn dropping_the_simulator_closes_the_gate() {
        let (mut ticker, step) = tick_gate();
        drop(step);
        assert_eq!(ticker.cycle(PERIOD).await, Err(GateClosed));
    }
}
