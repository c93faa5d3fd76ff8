// Domain-level simulation entities.
//
// The entity kinds form a closed set (player, bullet, rocket, explosion);
// shared kinematic behavior lives on the common position/velocity record
// instead of a type hierarchy.

use crate::domain::shape::Hull;
use crate::domain::terrain::{Terrain, TerrainParams, LAND_MAX, LAND_SIZE};
use crate::domain::tuning::player::PlayerTuning;
use rand::Rng;

/// Per-player control actions, in key-state table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnLeft = 0,
    TurnRight = 1,
    Thrust = 2,
    Brake = 3,
    Ascend = 4,
    Descend = 5,
    FirePrimary = 6,
    FireSecondary = 7,
}

impl Action {
    pub const COUNT: usize = 8;
}

/// One consistent view of the full key-state table, copied at the start of
/// a tick.
pub type KeySnapshot = [[bool; Action::COUNT]; 2];

/// A scar to be painted onto the land where a shot or craft died against it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Mark {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Upper coordinate limits of every moving entity, per axis.
pub const BOUNDS: [f32; 3] = [
    (LAND_SIZE - 1) as f32,
    (LAND_SIZE - 1) as f32,
    LAND_MAX * 1.2,
];

/// Position and velocity of a moving entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kinematics {
    pub pos: [f32; 3],
    pub vel: [f32; 3],
}

impl Kinematics {
    /// Adds the velocity to the position, clamping each axis into
    /// `[0, BOUNDS]`. Returns true if the horizontal part of the step was
    /// cut, which means the entity reached the edge of the land.
    pub fn step(&mut self) -> bool {
        let mut cut = false;
        for axis in 0..3 {
            self.pos[axis] += self.vel[axis];
            if self.pos[axis] < 0.0 {
                self.pos[axis] = 0.0;
                if axis < 2 {
                    cut = true;
                }
            }
            if self.pos[axis] >= BOUNDS[axis] {
                self.pos[axis] = BOUNDS[axis];
                if axis < 2 {
                    cut = true;
                }
            }
        }
        cut
    }

    /// Horizontal position, the part outlines care about.
    pub fn xy(&self) -> [f32; 2] {
        [self.pos[0], self.pos[1]]
    }

    /// Altitude above sea level.
    pub fn altitude(&self) -> f32 {
        self.pos[2]
    }
}

/// A player-controlled craft.
#[derive(Debug, Clone)]
pub struct Player {
    pub kin: Kinematics,
    /// Heading angle, kept in `[-pi, pi]`.
    pub direction: f32,
    /// 0 means gone, 1 means undamaged. May transiently go below 0, which
    /// is the death trigger.
    pub shield: f32,
    /// Reload state of the primary and secondary weapon, each in `[0, 1]`.
    pub reloads: [f32; 2],
    /// Present once the player is dead and exploding.
    pub explosion_radius: Option<f32>,
    pub hull: Hull,
}

impl Player {
    /// Spawns a player at a random spot, a fixed clearance above the land.
    pub fn spawn(terrain: &Terrain, tuning: &PlayerTuning, rng: &mut impl Rng) -> Player {
        let x = rng.gen_range(0.0..BOUNDS[0]);
        let y = rng.gen_range(0.0..BOUNDS[1]);
        let z = (terrain.height_at(x, y) + tuning.spawn_altitude).clamp(0.0, BOUNDS[2]);
        Player {
            kin: Kinematics {
                pos: [x, y, z],
                vel: [0.0; 3],
            },
            direction: 0.0,
            shield: 1.0,
            reloads: [1.0, 1.0],
            explosion_radius: None,
            hull: Hull::aircraft(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.explosion_radius.is_none()
    }
}

/// A fired shot: a ballistic bullet or a target-following rocket.
#[derive(Debug, Clone)]
pub enum Shot {
    /// Point projectile, no outline.
    Bullet { kin: Kinematics },
    /// Shaped projectile homing on a player's live position.
    Rocket {
        kin: Kinematics,
        hull: Hull,
        /// Index of the targeted player; the guidance re-reads that
        /// player's position every sub-step.
        target: usize,
    },
}

impl Shot {
    pub fn kin(&self) -> &Kinematics {
        match self {
            Shot::Bullet { kin } | Shot::Rocket { kin, .. } => kin,
        }
    }

    pub fn kin_mut(&mut self) -> &mut Kinematics {
        match self {
            Shot::Bullet { kin } | Shot::Rocket { kin, .. } => kin,
        }
    }

    pub fn is_rocket(&self) -> bool {
        matches!(self, Shot::Rocket { .. })
    }
}

/// A shrinking blast left behind by a dead rocket or craft.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub kin: Kinematics,
    pub radius: f32,
}

/// Authoritative entity collections for the current match. Owns every
/// player, shot and explosion; systems borrow them one tick at a time.
pub struct World {
    pub terrain: Terrain,
    pub players: [Player; 2],
    pub shots: Vec<Shot>,
    pub explosions: Vec<Explosion>,
}

impl World {
    /// Builds a fresh match: new land, two players above it, nothing else
    /// in the air.
    pub fn new_match(
        terrain_params: TerrainParams,
        tuning: &PlayerTuning,
        rng: &mut impl Rng,
    ) -> World {
        let terrain = Terrain::generate(terrain_params, rng);
        let players = [
            Player::spawn(&terrain, tuning, rng),
            Player::spawn(&terrain, tuning, rng),
        ];
        World {
            terrain,
            players,
            shots: Vec::new(),
            explosions: Vec::new(),
        }
    }
}
