//! Idle/demo mode: a simple AI that plays the game
//!
//! Jumps when a spider gets close and steers onto the nearest spider while
//! airborne. Only reads state, so demo runs stay deterministic.

use super::state::GameState;
use super::tick::TickInput;

/// Jump once a spider is this close horizontally (centre to centre)
const JUMP_TRIGGER_DISTANCE: f32 = 110.0;
/// Ignore steering errors smaller than this
const STEER_DEADZONE: f32 = 4.0;

/// Build the input the AI would press this tick
pub fn drive(state: &GameState, base: &TickInput) -> TickInput {
    let mut input = TickInput {
        restart: base.restart,
        ..Default::default()
    };

    let Some(player) = state.player.as_ref() else {
        return input;
    };
    let px = player.body.center().x;

    let nearest = state.spiders.iter().min_by(|a, b| {
        let da = (a.body.center().x - px).abs();
        let db = (b.body.center().x - px).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });
    let Some(spider) = nearest else {
        return input;
    };

    let dx = spider.body.center().x - px;
    if player.on_ground {
        // Hold still until a spider walks into range, then hop
        input.jump = dx.abs() < JUMP_TRIGGER_DISTANCE;
    } else if player.is_falling() {
        // Lead the target by where it will be when we come down
        let lead = spider.speed * spider.direction.sign() * 4.0;
        let dx = dx + lead;
        input.left = dx < -STEER_DEADZONE;
        input.right = dx > STEER_DEADZONE;
    } else {
        input.left = dx < -STEER_DEADZONE;
        input.right = dx > STEER_DEADZONE;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spider::{Direction, Spider};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state_with_spider_at(x: f32) -> GameState {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        let id = state.next_entity_id();
        state.spiders = vec![Spider::new(id, x, 1.0, Direction::Left, &state.tuning)];
        state
    }

    #[test]
    fn test_jumps_when_spider_near() {
        let state = state_with_spider_at(180.0);
        let input = drive(&state, &TickInput::default());
        assert!(input.jump);
    }

    #[test]
    fn test_waits_when_spider_far() {
        let state = state_with_spider_at(600.0);
        let input = drive(&state, &TickInput::default());
        assert!(!input.jump);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_steers_while_airborne() {
        let mut state = state_with_spider_at(600.0);
        let player = state.player.as_mut().unwrap();
        player.on_ground = false;
        player.body.vel.y = -3.0;
        let input = drive(&state, &TickInput::default());
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_passes_restart_through() {
        let mut state = state_with_spider_at(600.0);
        state.player = None;
        let base = TickInput {
            restart: true,
            idle_mode: true,
            ..Default::default()
        };
        let input = drive(&state, &base);
        assert!(input.restart);
        assert!(!input.idle_mode);
    }
}
