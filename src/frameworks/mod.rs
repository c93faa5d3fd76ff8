// Framework layer: runtime configuration, scheduling and task wiring.

pub mod clock;
pub mod config;
pub mod runtime;
