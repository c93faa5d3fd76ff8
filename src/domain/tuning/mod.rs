// Gameplay tuning, kept separate from runtime configuration.

pub mod player;
pub mod weapons;

pub use player::PlayerTuning;
pub use weapons::{BulletTuning, RocketTuning};
