//! Pipe track: spawning, scrolling, eviction and scoring
//!
//! Pipes enter at the right edge on a fixed tick period and all move left at
//! the same speed, so the list is always ordered oldest-first by `x` and only
//! the front can ever leave the screen.

use rand::Rng;

use super::avatar::Avatar;
use super::state::{GameState, Obstacle};
use crate::consts::SCREEN_WIDTH;

/// Spawn a pipe pair at the right edge if this running tick is a spawn tick
///
/// The first gap is placed uniformly in the allowed band; later gaps walk up
/// to `spawn_max_offset` from the previous one and are clamped back into the
/// band. Returns whether a pipe was spawned.
pub fn spawn_if_due(state: &mut GameState) -> bool {
    if !state.frame_count.is_multiple_of(state.tuning.spawn_period) {
        return false;
    }

    let min = state.tuning.min_top_bottom();
    let max = state.tuning.max_top_bottom().max(min);
    // `tuning` is a public field, so it may have been edited after validation
    let max_offset = state.tuning.spawn_max_offset.abs();
    let previous = state.obstacles.last().map(|o| o.top_bottom);

    let rng = state.rng_mut();
    let top_bottom = match previous {
        Some(prev) => {
            let offset = rng.random_range(-max_offset..=max_offset);
            (prev + offset).clamp(min, max)
        }
        None => rng.random_range(min..=max),
    };

    log::trace!(
        "Spawned pipe at tick {} with gap top {:.1}",
        state.frame_count,
        top_bottom
    );
    state.obstacles.push(Obstacle::new(SCREEN_WIDTH, top_bottom));
    true
}

/// Scroll every pipe left and drop the front one once it is fully off screen
pub fn advance(obstacles: &mut Vec<Obstacle>, speed: f32, pipe_width: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    if obstacles.first().is_some_and(|o| o.x < -pipe_width) {
        obstacles.remove(0);
    }
}

/// Award a point for every unscored pipe whose center the bird has passed
///
/// Checks all live pipes, not just the nearest, so none can be skipped.
/// Returns the number of points awarded.
pub fn apply_scoring(avatar: &Avatar, obstacles: &mut [Obstacle], pipe_width: f32) -> u32 {
    let bird_center = avatar.center_x();
    let mut awarded = 0;
    for obstacle in obstacles.iter_mut().filter(|o| !o.scored) {
        if bird_center > obstacle.center_x(pipe_width) {
            obstacle.scored = true;
            awarded += 1;
        }
    }
    awarded
}

/// Scroll the ground strip, wrapping at one tile width
pub fn scroll_ground(ground_x: &mut f32, speed: f32, tile_width: f32) {
    *ground_x -= speed;
    if *ground_x <= -tile_width {
        *ground_x += tile_width;
    }
}
