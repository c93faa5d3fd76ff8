// Per-tick simulation systems.

pub mod collision;
pub mod movement;
pub mod weapons;
