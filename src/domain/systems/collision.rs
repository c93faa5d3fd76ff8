// Terrain, craft-vs-craft and shot-vs-craft hit tests.

use crate::domain::state::{Player, Shot};
use crate::domain::terrain::Terrain;

/// Entities further apart than this vertically never collide, no matter how
/// their outlines overlap on the map.
pub const ALTITUDE_GATE: f32 = 200.0;

/// True if the land at the point's map cell rises above its altitude.
pub fn below_terrain(terrain: &Terrain, pos: [f32; 3]) -> bool {
    terrain.height_at(pos[0], pos[1]) > pos[2]
}

/// Craft-vs-craft crash test: outline overlap gated by altitude proximity.
pub fn players_crashed(a: &Player, b: &Player) -> bool {
    (a.kin.altitude() - b.kin.altitude()).abs() < ALTITUDE_GATE
        && a.hull.intersects(a.kin.xy(), &b.hull.bounds(b.kin.xy()))
}

/// Shot-vs-craft hit test. Bullets are points and use containment; rockets
/// have an outline and use bounds overlap. Both are altitude-gated.
pub fn shot_hits_player(shot: &Shot, player: &Player) -> bool {
    if (shot.kin().altitude() - player.kin.altitude()).abs() >= ALTITUDE_GATE {
        return false;
    }
    match shot {
        Shot::Bullet { kin } => player.hull.contains(player.kin.xy(), kin.pos[0], kin.pos[1]),
        Shot::Rocket { kin, hull, .. } => player
            .hull
            .intersects(player.kin.xy(), &hull.bounds(kin.xy())),
    }
}
