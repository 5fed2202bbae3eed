//! Idle/demo mode - a simple AI that flaps through the gaps

use super::state::{GamePhase, GameState};
use crate::consts::PIPE_WIDTH;

/// How far above the gap floor the bird's bottom edge is allowed to sink
const FLOOR_MARGIN: f32 = 14.0;

/// Decide whether the autopilot presses the button this tick
///
/// Starts and restarts on its own. While running it aims at the gap of the
/// nearest pipe the bird has not fully cleared, and flaps when the next tick
/// would drop the bird below that gap's floor (less a margin). It never flaps
/// while still rising, which keeps it out of the top pipe.
pub fn should_activate(state: &GameState) -> bool {
    match state.phase {
        GamePhase::NotStarted | GamePhase::RestartReady => true,
        GamePhase::Ended => false,
        GamePhase::Running => {
            let bird = &state.avatar;
            if bird.velocity < 0.0 {
                return false;
            }

            let target_floor = state
                .obstacles
                .iter()
                .find(|o| o.x + PIPE_WIDTH > bird.pos.x)
                .map(|o| o.top_bottom + state.tuning.pipe_gap)
                .unwrap_or(state.floor_y() * 0.6);

            let next_velocity = bird.velocity + bird.gravity;
            let next_bottom = bird.bottom() + next_velocity;
            next_bottom > target_floor - FLOOR_MARGIN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_starts_and_restarts() {
        let mut state = GameState::new(1);
        assert!(should_activate(&state));
        state.phase = GamePhase::Ended;
        assert!(!should_activate(&state));
        state.phase = GamePhase::RestartReady;
        assert!(should_activate(&state));
    }

    #[test]
    fn test_flaps_when_sinking_below_gap() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Running;
        state.obstacles = vec![Obstacle::new(200.0, 100.0)];

        // Gap floor at 250; bird bottom at 238.4 and falling
        state.avatar.pos.y = 200.0;
        state.avatar.velocity = 2.0;
        assert!(should_activate(&state));

        // Comfortably inside the gap
        state.avatar.pos.y = 150.0;
        assert!(!should_activate(&state));

        // Low but still rising
        state.avatar.pos.y = 220.0;
        state.avatar.velocity = -3.0;
        assert!(!should_activate(&state));
    }

    #[test]
    fn test_ignores_cleared_pipes() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Running;
        // First pipe is behind the bird; the second one's gap is high
        state.obstacles = vec![Obstacle::new(-20.0, 300.0), Obstacle::new(200.0, 90.0)];
        state.avatar.pos.y = 200.0;
        state.avatar.velocity = 1.0;
        assert!(should_activate(&state));
    }

    #[test]
    fn test_keeps_bird_airborne_until_first_pipe() {
        let mut state = GameState::new(2024);
        let mut now = 0.0;
        // The first pipe reaches the bird after roughly 110 ticks
        for _ in 0..100 {
            now += 1000.0 / 60.0;
            let input = TickInput {
                now_ms: now,
                autopilot: true,
                ..Default::default()
            };
            tick(&mut state, &input);
            assert_ne!(state.phase, GamePhase::Ended);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }
}
