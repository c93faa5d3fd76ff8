/// Gameplay tuning for player-controlled craft.
///
/// Keep this separate from runtime configuration (tick rates, channel
/// capacities, etc.).

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Heading change per tick while a turn key is held, in radians.
    pub turn_rate: f32,

    /// Vertical velocity while ascending, units per tick.
    pub climb_rate: f32,

    /// Vertical velocity while descending, units per tick.
    pub dive_rate: f32,

    /// Horizontal velocity retained per tick when neither vertical key is
    /// held.
    pub drag: f32,

    /// Horizontal acceleration per tick while thrusting or braking.
    pub acceleration: f32,

    /// Horizontal speed cap, units per tick.
    pub max_speed: f32,

    /// Velocity scale applied repeatedly to get back under the cap without
    /// changing heading.
    pub speed_trim: f32,

    /// Clearance above the land at spawn.
    pub spawn_altitude: f32,

    /// Blast radius left by a dying craft.
    pub death_explosion_radius: f32,

    /// Reload regained per tick for the primary weapon.
    pub primary_reload_rate: f32,

    /// Reload regained per tick for the secondary weapon.
    pub secondary_reload_rate: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            turn_rate: 0.1,
            climb_rate: 30.0,
            dive_rate: 40.0,
            drag: 0.95,
            acceleration: 0.4,
            max_speed: 9.0,
            speed_trim: 0.93,
            spawn_altitude: 650.0,
            death_explosion_radius: 50.0,
            primary_reload_rate: 0.1,
            secondary_reload_rate: 0.007,
        }
    }
}
