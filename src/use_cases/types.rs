// Use-case level inputs/outputs for the match loop.

use crate::domain::state::Mark;
pub use crate::domain::state::{Action, KeySnapshot};
use serde::Serialize;

/// Out-of-band control events, separate from the per-tick key-state table.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// Pause/resume; when the match is over this starts a new match instead.
    TogglePause,
    /// Force a new match regardless of the current phase.
    NewMatch,
}

/// High-level state of the current match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MatchPhase {
    Flying,
    Over {
        /// Index of the surviving player, or None when both died.
        winner: Option<usize>,
    },
}

/// What one simulated tick produced for the outside world.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub phase: MatchPhase,
    /// Terrain scars to hand to the renderer's mark hook, in death order.
    pub marks: Vec<Mark>,
}
