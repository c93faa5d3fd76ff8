// Domain layer: core simulation types and rules.

pub mod shape;
pub mod state;
pub mod systems;
pub mod terrain;
pub mod tuning;

pub use shape::{Hull, Rect};
pub use state::{Action, Explosion, KeySnapshot, Kinematics, Mark, Player, Shot, World, BOUNDS};
pub use terrain::{Terrain, TerrainParams, LAND_MAX, LAND_MIN, LAND_SIZE};
