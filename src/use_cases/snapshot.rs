// Render-facing view of one tick, captured after simulation so the render
// side never reads entities mid-mutation.

use crate::domain::state::{Shot, World};
use crate::use_cases::types::MatchPhase;
use serde::Serialize;

/// What kind of entity a view row describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EntityKind {
    Player { index: usize },
    Bullet,
    Rocket,
    Explosion,
}

/// One drawable entity. Rows are pre-sorted by altitude so a painter-style
/// renderer can draw them in order; ties keep their capture order.
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub altitude: f32,
    /// Heading for shaped entities, radians. Bullets and explosions are
    /// round; theirs is 0.
    pub direction: f32,
    /// Blast radius for explosions, 0 otherwise.
    pub radius: f32,
}

/// Status-panel data for one player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatus {
    pub altitude: f32,
    pub ground_height: f32,
    pub shield: f32,
    pub reloads: [f32; 2],
    pub alive: bool,
}

/// A full frame for the render side.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub phase: MatchPhase,
    pub players: [PlayerStatus; 2],
    pub entities: Vec<EntityView>,
}

impl Frame {
    /// Captures the world as of the given tick.
    pub fn capture(world: &World, tick: u64, phase: MatchPhase) -> Frame {
        let mut entities = Vec::with_capacity(2 + world.shots.len() + world.explosions.len());

        for (index, player) in world.players.iter().enumerate() {
            entities.push(EntityView {
                kind: EntityKind::Player { index },
                x: player.kin.pos[0],
                y: player.kin.pos[1],
                altitude: player.kin.altitude(),
                direction: player.direction,
                radius: 0.0,
            });
        }
        for shot in &world.shots {
            let kin = shot.kin();
            entities.push(EntityView {
                kind: if shot.is_rocket() {
                    EntityKind::Rocket
                } else {
                    EntityKind::Bullet
                },
                x: kin.pos[0],
                y: kin.pos[1],
                altitude: kin.altitude(),
                direction: match shot {
                    Shot::Rocket { kin, .. } => kin.vel[1].atan2(kin.vel[0]),
                    Shot::Bullet { .. } => 0.0,
                },
                radius: 0.0,
            });
        }
        for explosion in &world.explosions {
            entities.push(EntityView {
                kind: EntityKind::Explosion,
                x: explosion.kin.pos[0],
                y: explosion.kin.pos[1],
                altitude: explosion.kin.altitude(),
                direction: 0.0,
                radius: explosion.radius,
            });
        }

        // Stable: equal altitudes keep capture order within the frame.
        entities.sort_by(|a, b| a.altitude.total_cmp(&b.altitude));

        let players = [
            PlayerStatus::capture(world, 0),
            PlayerStatus::capture(world, 1),
        ];

        Frame {
            tick,
            phase,
            players,
            entities,
        }
    }
}

impl PlayerStatus {
    fn capture(world: &World, index: usize) -> PlayerStatus {
        let player = &world.players[index];
        let [x, y] = player.kin.xy();
        PlayerStatus {
            altitude: player.kin.altitude(),
            ground_height: world.terrain.height_at(x, y),
            shield: player.shield,
            reloads: player.reloads,
            alive: player.is_alive(),
        }
    }
}
