// Flight control: turns the per-tick key states into player motion.

use crate::domain::state::{Action, Player};
use crate::domain::tuning::player::PlayerTuning;
use std::f32::consts::PI;

/// Applies one tick of control input to a player and steps its position.
///
/// Vertical movement is three-phased (climb, dive, or none); there is no
/// vertical acceleration. Horizontal drag only applies while neither
/// vertical key is held.
pub fn tick_player(player: &mut Player, keys: &[bool; Action::COUNT], tuning: &PlayerTuning) {
    if keys[Action::TurnRight as usize] {
        player.direction += tuning.turn_rate;
    }
    if keys[Action::TurnLeft as usize] {
        player.direction -= tuning.turn_rate;
    }
    if player.direction < -PI {
        player.direction += 2.0 * PI;
    }
    if player.direction > PI {
        player.direction -= 2.0 * PI;
    }

    player.kin.vel[2] = 0.0;
    if keys[Action::Ascend as usize] {
        player.kin.vel[2] += tuning.climb_rate;
    }
    if keys[Action::Descend as usize] {
        player.kin.vel[2] -= tuning.dive_rate;
    }
    if !keys[Action::Ascend as usize] && !keys[Action::Descend as usize] {
        player.kin.vel[0] *= tuning.drag;
        player.kin.vel[1] *= tuning.drag;
    }

    if keys[Action::Thrust as usize] {
        player.kin.vel[0] += tuning.acceleration * player.direction.cos();
        player.kin.vel[1] += tuning.acceleration * player.direction.sin();
    }
    if keys[Action::Brake as usize] {
        player.kin.vel[0] -= tuning.acceleration * player.direction.cos();
        player.kin.vel[1] -= tuning.acceleration * player.direction.sin();
    }

    // Trim the horizontal velocity back under the cap without changing its
    // heading.
    while player.kin.vel[0].hypot(player.kin.vel[1]) > tuning.max_speed {
        player.kin.vel[0] *= tuning.speed_trim;
        player.kin.vel[1] *= tuning.speed_trim;
    }

    player.kin.step();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::terrain::{Terrain, TerrainParams};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_player() -> Player {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let terrain = Terrain::generate(
            TerrainParams {
                base_points: 2,
                sector_size: 10,
                ..TerrainParams::default()
            },
            &mut rng,
        );
        let mut player = Player::spawn(&terrain, &PlayerTuning::default(), &mut rng);
        player.kin.pos = [1000.0, 1000.0, 1000.0];
        player.kin.vel = [0.0; 3];
        player
    }

    fn keys_with(actions: &[Action]) -> [bool; Action::COUNT] {
        let mut keys = [false; Action::COUNT];
        for a in actions {
            keys[*a as usize] = true;
        }
        keys
    }

    #[test]
    fn turning_wraps_direction() {
        let tuning = PlayerTuning::default();
        let mut player = test_player();
        player.direction = PI - 0.05;
        tick_player(&mut player, &keys_with(&[Action::TurnRight]), &tuning);
        assert!(player.direction < 0.0, "wrapped past pi: {}", player.direction);

        player.direction = -PI + 0.05;
        tick_player(&mut player, &keys_with(&[Action::TurnLeft]), &tuning);
        assert!(player.direction > 0.0, "wrapped past -pi: {}", player.direction);
    }

    #[test]
    fn thrust_accelerates_along_heading() {
        let tuning = PlayerTuning::default();
        let mut player = test_player();
        player.direction = 0.0;
        tick_player(&mut player, &keys_with(&[Action::Thrust, Action::Ascend]), &tuning);
        assert!((player.kin.vel[0] - tuning.acceleration).abs() < 1e-5);
        assert!(player.kin.vel[1].abs() < 1e-5);
    }

    #[test]
    fn horizontal_speed_never_exceeds_cap() {
        let tuning = PlayerTuning::default();
        let mut player = test_player();
        for _ in 0..200 {
            tick_player(&mut player, &keys_with(&[Action::Thrust, Action::Ascend]), &tuning);
            let speed = player.kin.vel[0].hypot(player.kin.vel[1]);
            assert!(speed <= tuning.max_speed + 1e-3, "speed {speed}");
        }
    }

    #[test]
    fn drag_only_applies_without_vertical_input() {
        let tuning = PlayerTuning::default();
        let mut player = test_player();
        player.kin.vel = [4.0, 0.0, 0.0];
        tick_player(&mut player, &keys_with(&[Action::Ascend]), &tuning);
        assert_eq!(player.kin.vel[0], 4.0);
        assert_eq!(player.kin.vel[2], tuning.climb_rate);

        tick_player(&mut player, &keys_with(&[]), &tuning);
        assert!((player.kin.vel[0] - 4.0 * tuning.drag).abs() < 1e-5);
        assert_eq!(player.kin.vel[2], 0.0);
    }

    #[test]
    fn descend_outweighs_ascend_when_both_held() {
        let tuning = PlayerTuning::default();
        let mut player = test_player();
        tick_player(
            &mut player,
            &keys_with(&[Action::Ascend, Action::Descend]),
            &tuning,
        );
        assert_eq!(player.kin.vel[2], tuning.climb_rate - tuning.dive_rate);
    }
}
