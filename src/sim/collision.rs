//! Axis-aligned collision between the bird and pipe pairs
//!
//! A pipe pair is solid everywhere in its column except the gap, so a hit is
//! "overlaps the column horizontally but does not fit inside the gap".
//! All comparisons are strict: touching an edge is not a hit.

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned bounding box (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict horizontal overlap
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// Whether `other`'s vertical span lies inside this box's (edges may touch)
    #[inline]
    pub fn contains_y(&self, other: &Aabb) -> bool {
        other.min.y >= self.min.y && other.max.y <= self.max.y
    }
}

/// Whether the bird hits this pipe pair
pub fn hits_obstacle(bird: &Aabb, obstacle: &Obstacle, pipe_width: f32, gap: f32) -> bool {
    let opening = obstacle.gap_bounds(pipe_width, gap);
    bird.overlaps_x(&opening) && !opening.contains_y(bird)
}

/// Check the bird against every live pipe pair, front to back
///
/// Stops at the first hit. Ground and ceiling are handled by the bird's own
/// motion clamp, not here.
pub fn check_collision(bird: &Aabb, obstacles: &[Obstacle], pipe_width: f32, gap: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| hits_obstacle(bird, obstacle, pipe_width, gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BIRD_HEIGHT, BIRD_WIDTH, PIPE_WIDTH};

    const GAP: f32 = 150.0;

    fn bird_at(x: f32, y: f32, h: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::new(BIRD_WIDTH, h))
    }

    fn pipe(x: f32, top_bottom: f32) -> Obstacle {
        Obstacle {
            x,
            top_bottom,
            scored: false,
        }
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        let bird = bird_at(50.0, 100.0, BIRD_HEIGHT);
        let obstacles = [pipe(40.0, 80.0)];
        assert!(!check_collision(&bird, &obstacles, PIPE_WIDTH, GAP));
    }

    #[test]
    fn test_top_pipe_hit() {
        let bird = bird_at(50.0, 79.0, BIRD_HEIGHT);
        assert!(check_collision(&bird, &[pipe(40.0, 80.0)], PIPE_WIDTH, GAP));
    }

    #[test]
    fn test_bottom_pipe_hit() {
        let bird = bird_at(50.0, 200.0, BIRD_HEIGHT);
        assert!(check_collision(&bird, &[pipe(40.0, 80.0)], PIPE_WIDTH, GAP));
    }

    #[test]
    fn test_edges_touching_are_not_hits() {
        // Bottom edge exactly on the gap floor (80 + 150 = 218 + 32)
        let bird = bird_at(50.0, 198.0, 32.0);
        assert!(!check_collision(&bird, &[pipe(40.0, 80.0)], PIPE_WIDTH, GAP));
        // One pixel lower is a hit
        let bird = bird_at(50.0, 199.0, 32.0);
        assert!(check_collision(&bird, &[pipe(40.0, 80.0)], PIPE_WIDTH, GAP));

        // Top edge exactly on the gap ceiling
        let bird = bird_at(50.0, 80.0, 32.0);
        assert!(!check_collision(&bird, &[pipe(40.0, 80.0)], PIPE_WIDTH, GAP));
        let bird = bird_at(50.0, 79.0, 32.0);
        assert!(check_collision(&bird, &[pipe(40.0, 80.0)], PIPE_WIDTH, GAP));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        // Way outside the gap vertically, but the pipe has not arrived yet
        let bird = bird_at(50.0, 0.0, 32.0);
        let right_edge = 50.0 + BIRD_WIDTH;
        assert!(!check_collision(&bird, &[pipe(right_edge, 200.0)], PIPE_WIDTH, GAP));
        assert!(check_collision(&bird, &[pipe(right_edge - 1.0, 200.0)], PIPE_WIDTH, GAP));

        // Pipe has fully passed: its right edge sits on the bird's left edge
        assert!(!check_collision(&bird, &[pipe(-14.0, 200.0)], 64.0, GAP));
        assert!(check_collision(&bird, &[pipe(-13.0, 200.0)], 64.0, GAP));
    }

    #[test]
    fn test_any_pipe_in_list_hits() {
        let bird = bird_at(50.0, 100.0, BIRD_HEIGHT);
        let obstacles = [pipe(-20.0, 80.0), pipe(60.0, 300.0), pipe(300.0, 80.0)];
        assert!(check_collision(&bird, &obstacles, PIPE_WIDTH, GAP));
    }
}
