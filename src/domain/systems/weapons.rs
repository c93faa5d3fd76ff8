// Weapon handling: bullet launch, rocket guidance, shot lifecycle and
// explosion decay.

use crate::domain::state::{Explosion, Kinematics, Mark, Player, Shot, World};
use crate::domain::systems::collision;
use crate::domain::tuning::weapons::{BulletTuning, RocketTuning};
use std::f32::consts::PI;
use tracing::{debug, info};

/// Shots move and are hit-tested in sub-steps within a tick, so a fast shot
/// cannot tunnel through a craft between ticks.
pub const SUB_STEPS: usize = 4;

/// Upper bound on the launch loop that walks a new shot clear of its firer.
const CLEARANCE_ATTEMPTS: usize = 50;

/// Radius shrink per tick of every explosion.
const EXPLOSION_DECAY: f32 = 2.3;

/// Launches a bullet along the firer's heading and resets the primary
/// reload.
///
/// The vertical velocity is solved so the bullet's altitude converges on the
/// target's current altitude over the horizontal distance between them. The
/// target's own velocity is deliberately ignored; this single-shot lead
/// estimate is part of the weapon's feel, not a defect.
pub fn fire_bullet(firer: &mut Player, target_pos: [f32; 3], tuning: &BulletTuning) -> Shot {
    let mut kin = Kinematics {
        pos: firer.kin.pos,
        vel: [0.0; 3],
    };
    let horizontal = (target_pos[0] - kin.pos[0]).hypot(target_pos[1] - kin.pos[1]);
    kin.vel[2] = tuning.speed * (target_pos[2] - kin.pos[2]) / horizontal;
    kin.vel[0] = tuning.speed * firer.direction.cos();
    kin.vel[1] = tuning.speed * firer.direction.sin();

    // Walk the bullet out of the firer's own outline so stepping the firer
    // onto it next tick cannot hurt the firer.
    let mut attempts = 0;
    while firer.hull.contains(firer.kin.xy(), kin.pos[0], kin.pos[1])
        && attempts < CLEARANCE_ATTEMPTS
    {
        for _ in 0..SUB_STEPS {
            kin.step();
        }
        attempts += 1;
    }

    firer.reloads[0] = 0.0;
    debug!(vz = kin.vel[2], "bullet fired");
    Shot::Bullet { kin }
}

/// Launches a rocket along the firer's heading, bound to the targeted
/// player's live position, and resets the secondary reload.
pub fn fire_rocket(firer: &mut Player, target: usize, tuning: &RocketTuning) -> Shot {
    let hull = crate::domain::shape::Hull::rocket();
    let mut kin = Kinematics {
        pos: firer.kin.pos,
        vel: [
            tuning.speed * firer.direction.cos(),
            tuning.speed * firer.direction.sin(),
            0.0,
        ],
    };

    let mut attempts = 0;
    while firer
        .hull
        .intersects(firer.kin.xy(), &hull.bounds(kin.xy()))
        && attempts < CLEARANCE_ATTEMPTS
    {
        kin.step();
        attempts += 1;
    }

    firer.reloads[1] = 0.0;
    debug!(target, "rocket fired");
    Shot::Rocket { kin, hull, target }
}

/// One guidance sub-step: fixed climb or dive toward the target's altitude,
/// and a fixed heading correction toward the bearing to the target. The
/// correction has no proportional gain, so the heading oscillates around the
/// bearing once close; within one increment it snaps instead of overshooting.
pub fn guide_rocket(kin: &mut Kinematics, target_pos: [f32; 3], tuning: &RocketTuning) {
    kin.vel[2] = if kin.pos[2] < target_pos[2] {
        tuning.climb_rate
    } else {
        -tuning.climb_rate
    };

    let heading = kin.vel[1].atan2(kin.vel[0]);
    let bearing = (target_pos[1] - kin.pos[1]).atan2(target_pos[0] - kin.pos[0]);
    let mut diff = heading - bearing;
    if diff < -PI {
        diff += 2.0 * PI;
    } else if diff > PI {
        diff -= 2.0 * PI;
    }
    let corrected = if diff.abs() <= tuning.turn_rate {
        heading - diff
    } else if diff < 0.0 {
        heading + tuning.turn_rate
    } else {
        heading - tuning.turn_rate
    };
    kin.vel[0] = tuning.speed * corrected.cos();
    kin.vel[1] = tuning.speed * corrected.sin();
}

/// Steps every shot through its sub-steps, resolving terrain, boundary and
/// player hits. Dead shots are removed; dying rockets leave an explosion;
/// terrain deaths append a mark.
pub fn tick_shots(
    world: &mut World,
    bullet_tuning: &BulletTuning,
    rocket_tuning: &RocketTuning,
    marks: &mut Vec<Mark>,
) {
    let World {
        terrain,
        players,
        shots,
        explosions,
    } = world;

    let mut index = 0;
    while index < shots.len() {
        let mut dead = false;
        for _ in 0..SUB_STEPS {
            if let Shot::Rocket { kin, target, .. } = &mut shots[index] {
                // Live position, re-read every sub-step.
                let target_pos = players[*target].kin.pos;
                guide_rocket(kin, target_pos, rocket_tuning);
            }

            // Terrain is tested where the shot is now; the boundary cut
            // comes out of the step itself.
            let hits_land = {
                let kin = shots[index].kin();
                collision::below_terrain(terrain, kin.pos) || kin.pos[2] == 0.0
            };
            let cut = shots[index].kin_mut().step();
            let is_rocket = shots[index].is_rocket();
            let mut died = cut || hits_land;

            if !died {
                for (victim, player) in players.iter_mut().enumerate() {
                    if collision::shot_hits_player(&shots[index], player) {
                        died = true;
                        // Recenter the shot on the craft it hit; that point
                        // is the authoritative death location.
                        let hit_pos = player.kin.pos;
                        let kin = shots[index].kin_mut();
                        kin.pos[0] = hit_pos[0];
                        kin.pos[1] = hit_pos[1];
                        player.shield -= if is_rocket {
                            rocket_tuning.damage
                        } else {
                            bullet_tuning.damage
                        };
                        info!(victim, shield = player.shield, is_rocket, "player hit");
                    }
                }
            }

            if died {
                let kin = *shots[index].kin();
                if is_rocket {
                    explosions.push(Explosion {
                        kin,
                        radius: rocket_tuning.explosion_radius,
                    });
                }
                if hits_land {
                    marks.push(Mark {
                        x: kin.pos[0],
                        y: kin.pos[1],
                        radius: if is_rocket {
                            rocket_tuning.explosion_radius
                        } else {
                            bullet_tuning.mark_radius
                        },
                    });
                }
                dead = true;
                break;
            }
        }

        if dead {
            shots.remove(index);
        } else {
            index += 1;
        }
    }
}

/// Shrinks every explosion and drops the ones that burned out.
pub fn decay_explosions(explosions: &mut Vec<Explosion>) {
    for explosion in explosions.iter_mut() {
        explosion.radius -= EXPLOSION_DECAY;
    }
    explosions.retain(|e| e.radius >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shape::Hull;
    use crate::domain::terrain::{Terrain, TerrainParams};
    use crate::domain::tuning::player::PlayerTuning;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_world() -> World {
        // Tiny land, zero jitter; heights still random but irrelevant when
        // entities fly high above the ceiling of the land range.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut world = World::new_match(
            TerrainParams {
                base_points: 11,
                sector_size: 250,
                min_height: -800.0,
                max_height: -700.0,
                jitter: 0.0,
            },
            &PlayerTuning::default(),
            &mut rng,
        );
        world.players[0].kin.pos = [500.0, 500.0, 1000.0];
        world.players[1].kin.pos = [1500.0, 500.0, 1000.0];
        for p in &mut world.players {
            p.kin.vel = [0.0; 3];
            p.direction = 0.0;
        }
        world
    }

    #[test]
    fn bullet_vertical_solve_is_zero_at_equal_altitude() {
        let mut world = flat_world();
        let target_pos = world.players[1].kin.pos;
        let shot = fire_bullet(&mut world.players[0], target_pos, &BulletTuning::default());
        assert_eq!(shot.kin().vel[2], 0.0);
        assert_eq!(world.players[0].reloads[0], 0.0);
    }

    #[test]
    fn bullet_vertical_solve_aims_at_target_altitude() {
        let mut world = flat_world();
        world.players[1].kin.pos[2] = 1500.0;
        let target_pos = world.players[1].kin.pos;
        let tuning = BulletTuning::default();
        let shot = fire_bullet(&mut world.players[0], target_pos, &tuning);
        // 500 climb over 1000 horizontal at speed 10 -> vz = 5.
        assert!((shot.kin().vel[2] - 5.0).abs() < 1e-3);
    }

    #[test]
    fn new_bullet_is_clear_of_its_firer() {
        let mut world = flat_world();
        let target_pos = world.players[1].kin.pos;
        let shot = fire_bullet(&mut world.players[0], target_pos, &BulletTuning::default());
        let firer = &world.players[0];
        assert!(!firer
            .hull
            .contains(firer.kin.xy(), shot.kin().pos[0], shot.kin().pos[1]));
    }

    #[test]
    fn new_rocket_is_clear_of_its_firer() {
        let mut world = flat_world();
        let shot = fire_rocket(&mut world.players[0], 1, &RocketTuning::default());
        let firer = &world.players[0];
        match &shot {
            Shot::Rocket { kin, hull, .. } => {
                assert!(!firer.hull.intersects(firer.kin.xy(), &hull.bounds(kin.xy())));
            }
            Shot::Bullet { .. } => unreachable!(),
        }
        assert_eq!(world.players[0].reloads[1], 0.0);
    }

    #[test]
    fn guidance_reduces_bearing_error_by_one_increment() {
        let tuning = RocketTuning::default();
        let mut kin = Kinematics {
            pos: [0.0, 0.0, 1000.0],
            // Heading 0.5 rad off the +x bearing to the target.
            vel: [tuning.speed * 0.5f32.cos(), tuning.speed * 0.5f32.sin(), 0.0],
        };
        let target = [1000.0, 0.0, 1000.0];
        guide_rocket(&mut kin, target, &tuning);
        let heading = kin.vel[1].atan2(kin.vel[0]);
        assert!((heading - (0.5 - tuning.turn_rate)).abs() < 1e-4);
    }

    #[test]
    fn guidance_snaps_when_within_one_increment() {
        let tuning = RocketTuning::default();
        let error = tuning.turn_rate / 2.0;
        let mut kin = Kinematics {
            pos: [0.0, 0.0, 1000.0],
            vel: [tuning.speed * error.cos(), tuning.speed * error.sin(), 0.0],
        };
        guide_rocket(&mut kin, [1000.0, 0.0, 1000.0], &tuning);
        let heading = kin.vel[1].atan2(kin.vel[0]);
        assert!(heading.abs() < 1e-5, "heading {heading} should snap to 0");
    }

    #[test]
    fn guidance_climbs_and_dives_at_fixed_rate() {
        let tuning = RocketTuning::default();
        let mut kin = Kinematics {
            pos: [0.0, 0.0, 500.0],
            vel: [tuning.speed, 0.0, 0.0],
        };
        guide_rocket(&mut kin, [1000.0, 0.0, 1000.0], &tuning);
        assert_eq!(kin.vel[2], tuning.climb_rate);
        kin.pos[2] = 1500.0;
        guide_rocket(&mut kin, [1000.0, 0.0, 1000.0], &tuning);
        assert_eq!(kin.vel[2], -tuning.climb_rate);
    }

    #[test]
    fn bullet_hit_damages_player_and_recenters() {
        let mut world = flat_world();
        world.shots.push(Shot::Bullet {
            kin: Kinematics {
                pos: [1470.0, 500.0, 1000.0],
                vel: [10.0, 0.0, 0.0],
            },
        });
        let mut marks = Vec::new();
        tick_shots(
            &mut world,
            &BulletTuning::default(),
            &RocketTuning::default(),
            &mut marks,
        );
        assert!(world.shots.is_empty(), "bullet dies on the hit");
        assert!((world.players[1].shield - 0.95).abs() < 1e-5);
        assert!(marks.is_empty());
    }

    #[test]
    fn rocket_death_on_terrain_spawns_explosion_and_mark() {
        let mut world = flat_world();
        // A rocket already below the land dies on its first sub-step.
        world.shots.push(Shot::Rocket {
            kin: Kinematics {
                pos: [800.0, 800.0, -790.0],
                vel: [0.0; 3],
            },
            hull: Hull::rocket(),
            target: 1,
        });
        let rocket_tuning = RocketTuning::default();
        let mut marks = Vec::new();
        tick_shots(
            &mut world,
            &BulletTuning::default(),
            &rocket_tuning,
            &mut marks,
        );
        assert!(world.shots.is_empty());
        assert_eq!(world.explosions.len(), 1);
        assert_eq!(world.explosions[0].radius, rocket_tuning.explosion_radius);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].radius, rocket_tuning.explosion_radius);
    }

    #[test]
    fn diving_bullet_clamps_to_sea_level_and_dies() {
        let mut world = flat_world();
        // Over deep water the land never rises above the shot, so the only
        // way down ends at the altitude clamp floor.
        world.shots.push(Shot::Bullet {
            kin: Kinematics {
                pos: [800.0, 800.0, 5.0],
                vel: [2.0, 0.0, -10.0],
            },
        });
        let tuning = BulletTuning::default();
        let mut marks = Vec::new();
        tick_shots(&mut world, &tuning, &RocketTuning::default(), &mut marks);

        assert!(world.shots.is_empty(), "a shot at altitude 0 is dead");
        assert!(world.explosions.is_empty());
        assert_eq!(marks.len(), 1, "sea-level death counts as hitting land");
        assert_eq!(marks[0].radius, tuning.mark_radius);
    }

    #[test]
    fn boundary_cut_kills_a_bullet() {
        let mut world = flat_world();
        world.shots.push(Shot::Bullet {
            kin: Kinematics {
                pos: [2495.0, 500.0, 1000.0],
                vel: [10.0, 0.0, 0.0],
            },
        });
        let mut marks = Vec::new();
        tick_shots(
            &mut world,
            &BulletTuning::default(),
            &RocketTuning::default(),
            &mut marks,
        );
        assert!(world.shots.is_empty());
        assert!(marks.is_empty(), "an edge death leaves no mark");
    }

    #[test]
    fn explosions_shrink_and_burn_out() {
        let mut explosions = vec![
            Explosion {
                kin: Kinematics::default(),
                radius: 30.0,
            },
            Explosion {
                kin: Kinematics::default(),
                radius: 1.0,
            },
        ];
        decay_explosions(&mut explosions);
        assert_eq!(explosions.len(), 1);
        assert!((explosions[0].radius - 27.7).abs() < 1e-4);
    }
}
