//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Each call
//! consumes at most one activate input, so a single input never moves the
//! session through more than one phase transition.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::avatar::Impact;
use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, GameState};
use super::track::{advance, apply_scoring, scroll_ground, spawn_if_due};
use crate::consts::PIPE_WIDTH;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Flap / start / restart (space, click or tap)
    pub activate: bool,
    /// Current time in milliseconds on a monotonic clock
    pub now_ms: f64,
    /// Demo mode - the autopilot decides when to activate
    #[serde(default)]
    pub autopilot: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    if state.phase == GamePhase::Ended && state.restart_eligible(input.now_ms) {
        state.phase = GamePhase::RestartReady;
        log::debug!("Restart ready");
    }

    let activate = input.activate || (input.autopilot && autopilot::should_activate(state));
    if activate {
        handle_activate(state);
    }

    match state.phase {
        GamePhase::Running => run_frame(state, input.now_ms),
        GamePhase::NotStarted => {
            // Attract screen: ground keeps moving behind the title
            scroll_ground(
                &mut state.ground_x,
                state.tuning.scroll_speed,
                state.tuning.ground_tile_width,
            );
        }
        GamePhase::Ended | GamePhase::RestartReady => {}
    }
}

/// Apply one activate input: exactly one transition per call
fn handle_activate(state: &mut GameState) {
    match state.phase {
        GamePhase::NotStarted => {
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Started);
            log::debug!("Run started");
        }
        GamePhase::Running => {
            state.avatar.jump();
            state.events.push(GameEvent::Jumped);
        }
        GamePhase::Ended => {
            // Too soon after death; swallow the input
        }
        GamePhase::RestartReady => {
            state.reset();
            state.events.push(GameEvent::Restarted);
            log::debug!("Session reset");
        }
    }
}

/// One running frame: bird, pipes, scoring, ground, then collision
fn run_frame(state: &mut GameState, now_ms: f64) {
    let floor_y = state.floor_y();
    if state.avatar.update(floor_y) == Some(Impact::Ground) {
        end_run(state, now_ms);
        return;
    }

    spawn_if_due(state);
    advance(&mut state.obstacles, state.tuning.scroll_speed, PIPE_WIDTH);

    let awarded = apply_scoring(&state.avatar, &mut state.obstacles, PIPE_WIDTH);
    for _ in 0..awarded {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    scroll_ground(
        &mut state.ground_x,
        state.tuning.scroll_speed,
        state.tuning.ground_tile_width,
    );

    let bird = state.avatar.bounds();
    if check_collision(&bird, &state.obstacles, PIPE_WIDTH, state.tuning.pipe_gap) {
        end_run(state, now_ms);
        return;
    }

    state.frame_count += 1;
}

fn end_run(state: &mut GameState, now_ms: f64) {
    state.phase = GamePhase::Ended;
    state.ended_at_ms = Some(now_ms);
    state.events.push(GameEvent::Died { score: state.score });
    log::info!("Run ended with score {}", state.score);
}
