// Match lifecycle and the per-tick simulation order.

use crate::domain::state::{Action, Explosion, KeySnapshot, Mark, World};
use crate::domain::systems::{collision, movement, weapons};
use crate::domain::terrain::TerrainParams;
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::weapons::{BulletTuning, RocketTuning};
use crate::use_cases::types::{MatchPhase, TickReport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Owns the world of the current match and advances it one tick at a time.
/// Only the simulator task touches it; `new_match` must never run
/// concurrently with a tick, which single ownership already guarantees.
pub struct MatchSession {
    world: World,
    phase: MatchPhase,
    rng: ChaCha8Rng,
    terrain_params: TerrainParams,
    player_tuning: PlayerTuning,
    bullet_tuning: BulletTuning,
    rocket_tuning: RocketTuning,
}

impl MatchSession {
    /// Builds a session with default tuning and a first match generated
    /// from the seed.
    pub fn new(seed: u64) -> MatchSession {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let terrain_params = TerrainParams::default();
        let player_tuning = PlayerTuning::default();
        let world = World::new_match(terrain_params, &player_tuning, &mut rng);
        MatchSession {
            world,
            phase: MatchPhase::Flying,
            rng,
            terrain_params,
            player_tuning,
            bullet_tuning: BulletTuning::default(),
            rocket_tuning: RocketTuning::default(),
        }
    }

    /// Regenerates the land and both players and clears everything in the
    /// air.
    pub fn new_match(&mut self) {
        info!("generating land");
        self.world = World::new_match(self.terrain_params, &self.player_tuning, &mut self.rng);
        self.phase = MatchPhase::Flying;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Runs one simulation tick against a consistent key-state snapshot.
    ///
    /// Order: explosion decay, game-over short-circuit, craft crash, terrain
    /// and shield deaths, player controls and weapon fire, shot stepping.
    /// Explosions keep shrinking after the match is decided, so a finished
    /// match still animates down to a quiet scene.
    pub fn tick(&mut self, keys: KeySnapshot) -> TickReport {
        let mut marks = Vec::new();

        weapons::decay_explosions(&mut self.world.explosions);

        // A decided match only animates; nothing moves, nothing fires.
        if self.world.players.iter().any(|p| !p.is_alive()) {
            return TickReport {
                phase: self.phase,
                marks,
            };
        }

        if self.check_crash() {
            return self.finish_tick(marks);
        }
        self.check_terrain_deaths(&mut marks);
        self.tick_players(&keys);
        weapons::tick_shots(
            &mut self.world,
            &self.bullet_tuning,
            &self.rocket_tuning,
            &mut marks,
        );

        self.finish_tick(marks)
    }

    /// Craft-vs-craft collision ends the match on the spot: both players die.
    fn check_crash(&mut self) -> bool {
        let [a, b] = &self.world.players;
        if !collision::players_crashed(a, b) {
            return false;
        }
        info!("players crashed into each other");
        for index in 0..2 {
            self.kill_player(index);
        }
        true
    }

    /// A player dies from a depleted shield or from striking the land. Only
    /// a terrain death scars the land; a shield death just falls out of the
    /// sky. At most one player can die here per tick.
    fn check_terrain_deaths(&mut self, marks: &mut Vec<Mark>) {
        for index in 0..2 {
            let player = &self.world.players[index];
            let shield_death = player.shield < 0.0;
            let terrain_death = collision::below_terrain(&self.world.terrain, player.kin.pos);
            if shield_death || terrain_death {
                if !shield_death {
                    let [x, y] = player.kin.xy();
                    marks.push(Mark {
                        x,
                        y,
                        radius: self.player_tuning.death_explosion_radius,
                    });
                }
                info!(player = index, shield_death, "player down");
                self.kill_player(index);
                break;
            }
        }
    }

    fn kill_player(&mut self, index: usize) {
        let player = &mut self.world.players[index];
        player.explosion_radius = Some(self.player_tuning.death_explosion_radius);
        player.shield = 0.0;
        self.world.explosions.push(Explosion {
            kin: player.kin,
            radius: self.player_tuning.death_explosion_radius,
        });
    }

    /// Controls, stepping, weapon fire and reload regeneration for each
    /// living player.
    fn tick_players(&mut self, keys: &KeySnapshot) {
        for index in 0..2 {
            if !self.world.players[index].is_alive() {
                continue;
            }
            let player_keys = &keys[index];

            movement::tick_player(
                &mut self.world.players[index],
                player_keys,
                &self.player_tuning,
            );

            // The player must step before firing: new shots are walked out
            // of the firer's outline, and stepping afterwards could move the
            // firer back onto its own shot.
            let opponent = 1 - index;
            if player_keys[Action::FirePrimary as usize]
                && self.world.players[index].reloads[0] == 1.0
            {
                let target_pos = self.world.players[opponent].kin.pos;
                let shot = weapons::fire_bullet(
                    &mut self.world.players[index],
                    target_pos,
                    &self.bullet_tuning,
                );
                self.world.shots.push(shot);
            }
            if player_keys[Action::FireSecondary as usize]
                && self.world.players[index].reloads[1] == 1.0
            {
                let shot = weapons::fire_rocket(
                    &mut self.world.players[index],
                    opponent,
                    &self.rocket_tuning,
                );
                self.world.shots.push(shot);
            }

            let player = &mut self.world.players[index];
            player.reloads[0] =
                (player.reloads[0] + self.player_tuning.primary_reload_rate).min(1.0);
            player.reloads[1] =
                (player.reloads[1] + self.player_tuning.secondary_reload_rate).min(1.0);
        }
    }

    fn finish_tick(&mut self, marks: Vec<Mark>) -> TickReport {
        let alive = [
            self.world.players[0].is_alive(),
            self.world.players[1].is_alive(),
        ];
        let phase = match alive {
            [true, true] => MatchPhase::Flying,
            [true, false] => MatchPhase::Over { winner: Some(0) },
            [false, true] => MatchPhase::Over { winner: Some(1) },
            [false, false] => MatchPhase::Over { winner: None },
        };
        if phase != self.phase {
            info!(?phase, "match phase changed");
            self.phase = phase;
        }
        TickReport { phase, marks }
    }
}
