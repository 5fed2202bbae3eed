//! The player's bird: vertical motion under gravity and flap impulse

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::Tuning;
use crate::consts::*;

/// Which screen bound stopped the bird this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Hit the top of the screen - motion stops, run continues
    Ceiling,
    /// Hit the ground - run ends
    Ground,
}

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub velocity: f32,
    pub gravity: f32,
    /// Velocity applied by a flap
    pub lift: f32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(BIRD_START_X, BIRD_START_Y),
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
            velocity: 0.0,
            gravity: tuning.gravity,
            lift: tuning.lift,
        }
    }

    /// Integrate one tick of gravity and clamp to `[0, floor_y - height]`
    ///
    /// Velocity is zeroed whenever a bound is hit. A ground hit is reported so
    /// the caller can end the run.
    pub fn update(&mut self, floor_y: f32) -> Option<Impact> {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
            return Some(Impact::Ceiling);
        }
        if self.pos.y + self.size.y > floor_y {
            self.pos.y = floor_y - self.size.y;
            self.velocity = 0.0;
            return Some(Impact::Ground);
        }
        None
    }

    /// Flap: replace the current velocity with the lift impulse
    #[inline]
    pub fn jump(&mut self) {
        self.velocity = self.lift;
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Nose angle for drawing (degrees, positive is nose-up)
    ///
    /// Rising tilts up gently and caps at 60; falling dives twice as fast
    /// and caps at -70.
    pub fn tilt_degrees(&self) -> f32 {
        if self.velocity < 0.0 {
            (-self.velocity * 3.0).min(60.0)
        } else {
            (-self.velocity * 6.0).max(-70.0)
        }
    }
}
