//! Property tests for the simulation core

use proptest::prelude::*;

use pipe_flap::consts::{BIRD_HEIGHT, FLOOR_Y, PIPE_WIDTH};
use pipe_flap::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Ticks 16 ms apart, pressing wherever the pattern says so
fn inputs(presses: &[bool]) -> impl Iterator<Item = TickInput> + '_ {
    presses.iter().enumerate().map(|(i, &activate)| TickInput {
        activate,
        now_ms: i as f64 * 16.0,
        autopilot: false,
    })
}

proptest! {
    #[test]
    fn bird_stays_on_screen(seed in any::<u64>(), presses in prop::collection::vec(any::<bool>(), 1..600)) {
        let mut state = GameState::new(seed);
        for input in inputs(&presses) {
            tick(&mut state, &input);
            prop_assert!(state.avatar.pos.y >= 0.0);
            prop_assert!(state.avatar.pos.y <= FLOOR_Y - BIRD_HEIGHT + 1e-3);
        }
    }

    #[test]
    fn pipes_stay_ordered_and_in_band(seed in any::<u64>(), presses in prop::collection::vec(prop::bool::weighted(0.08), 1..1500)) {
        let mut state = GameState::new(seed);
        let (min, max) = (state.tuning.min_top_bottom(), state.tuning.max_top_bottom());
        for input in inputs(&presses) {
            let front_before = state.obstacles.first().cloned();
            tick(&mut state, &input);

            for pair in state.obstacles.windows(2) {
                prop_assert!(pair[0].x <= pair[1].x);
            }
            for obstacle in &state.obstacles {
                prop_assert!(obstacle.top_bottom >= min && obstacle.top_bottom <= max);
                prop_assert!(obstacle.x >= -PIPE_WIDTH - state.tuning.scroll_speed);
            }
            // Anything that left the list left from the front
            if let (Some(before), Some(after)) = (front_before, state.obstacles.first()) {
                prop_assert!(after.x >= before.x - state.tuning.scroll_speed - 1e-3);
            }
        }
    }

    #[test]
    fn score_counts_each_pipe_once(seed in any::<u64>(), presses in prop::collection::vec(prop::bool::weighted(0.07), 1..2000)) {
        let mut state = GameState::new(seed);
        let speed = state.tuning.scroll_speed;
        let bird_center = state.avatar.center_x();
        // Pipes that scrolled off the front; all of them were passed on the way
        let mut evicted = 0u32;
        let mut last_score = 0;
        for input in inputs(&presses) {
            let front_before = state.obstacles.first().map(|o| o.x);
            tick(&mut state, &input);

            if state.events.contains(&GameEvent::Restarted) {
                evicted = 0;
                last_score = 0;
            } else if let Some(front) = front_before {
                let still_there = state
                    .obstacles
                    .first()
                    .is_some_and(|o| o.x == front || o.x == front - speed);
                if !still_there {
                    evicted += 1;
                }
            }

            let passed_on_screen = state
                .obstacles
                .iter()
                .filter(|o| o.center_x(PIPE_WIDTH) < bird_center)
                .count() as u32;
            prop_assert_eq!(state.score, evicted + passed_on_screen);
            prop_assert!(state.score >= last_score);
            last_score = state.score;
        }
    }

    #[test]
    fn restart_fully_resets(seed in any::<u64>(), flaps in 0usize..40) {
        let mut state = GameState::new(seed);
        let mut now = 0.0;
        let press = |state: &mut GameState, activate: bool, now: f64| {
            tick(state, &TickInput { activate, now_ms: now, autopilot: false });
        };

        press(&mut state, true, now);
        let mut i = 0;
        while state.phase == GamePhase::Running {
            now += 16.0;
            press(&mut state, i < flaps && i % 12 == 0, now);
            i += 1;
        }
        prop_assert_eq!(state.phase, GamePhase::Ended);

        now += 1_000.0;
        press(&mut state, true, now);
        prop_assert_eq!(state.phase, GamePhase::NotStarted);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.avatar.pos.y, 150.0);
        prop_assert_eq!(state.avatar.velocity, 0.0);
        prop_assert!(state.obstacles.is_empty());
        prop_assert_eq!(state.frame_count, 0);
    }
}
