/// Gameplay tuning for the two weapons.

#[derive(Debug, Clone, Copy)]
pub struct BulletTuning {
    /// Horizontal speed, units per sub-step.
    pub speed: f32,

    /// Shield taken from a player on a hit.
    pub damage: f32,

    /// Radius of the pock mark a bullet leaves on the land.
    pub mark_radius: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: 10.0,
            damage: 0.05,
            mark_radius: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RocketTuning {
    /// Horizontal speed, units per sub-step. Held constant by guidance.
    pub speed: f32,

    /// Fixed climb/dive rate chosen by comparing altitudes to the target.
    pub climb_rate: f32,

    /// Heading correction toward the target bearing per guidance sub-step,
    /// in radians.
    pub turn_rate: f32,

    /// Shield taken from a player on a hit.
    pub damage: f32,

    /// Blast radius spawned when the rocket dies.
    pub explosion_radius: f32,
}

impl Default for RocketTuning {
    fn default() -> Self {
        Self {
            speed: 4.0,
            climb_rate: 3.0,
            turn_rate: 0.02,
            damage: 0.3,
            explosion_radius: 30.0,
        }
    }
}
