// Use-case layer: match lifecycle and per-tick orchestration.

pub mod session;
pub mod snapshot;
pub mod types;

pub use session::MatchSession;
pub use snapshot::{EntityKind, EntityView, Frame, PlayerStatus};
pub use types::{ControlEvent, MatchPhase, TickReport};
