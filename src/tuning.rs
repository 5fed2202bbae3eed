//! Data-driven game balance
//!
//! Every number that shapes how a run plays lives here so it can be
//! swapped out from a JSON file without touching the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_HEIGHT, PIPE_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Balance parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to the bird's velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Velocity set by a flap (negative is up)
    pub lift: f32,
    /// Pipe and ground scroll speed (pixels/tick)
    pub scroll_speed: f32,
    /// Vertical opening between the top and bottom pipe
    pub pipe_gap: f32,
    /// Ticks between pipe spawns
    pub spawn_period: u64,
    /// Largest vertical step between consecutive gaps
    pub spawn_max_offset: f32,
    /// Fraction of the pipe height that must stay visible above/below the gap
    pub pipe_margin_frac: f32,
    /// Delay after a death before input restarts (milliseconds)
    pub restart_delay_ms: f64,
    /// Width of one ground tile; the scroll offset wraps at this
    pub ground_tile_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            lift: -10.0,
            scroll_speed: 3.0,
            pipe_gap: 150.0,
            spawn_period: 70,
            spawn_max_offset: 100.0,
            pipe_margin_frac: 0.2,
            restart_delay_ms: 500.0,
            ground_tile_width: SCREEN_WIDTH,
        }
    }
}

/// Errors from loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a tuning file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.lift < 0.0) {
            return invalid("lift", "must be negative (upward)");
        }
        if !(self.scroll_speed > 0.0) {
            return invalid("scroll_speed", "must be positive");
        }
        if !(self.pipe_gap > 0.0) {
            return invalid("pipe_gap", "must be positive");
        }
        if self.spawn_period == 0 {
            return invalid("spawn_period", "must be at least one tick");
        }
        if !(self.spawn_max_offset >= 0.0) {
            return invalid("spawn_max_offset", "must not be negative");
        }
        if !(0.0..0.5).contains(&self.pipe_margin_frac) {
            return invalid("pipe_margin_frac", "must be in [0, 0.5)");
        }
        if !(self.restart_delay_ms >= 0.0) {
            return invalid("restart_delay_ms", "must not be negative");
        }
        if !(self.ground_tile_width > 0.0) {
            return invalid("ground_tile_width", "must be positive");
        }
        if self.max_top_bottom() < self.min_top_bottom() {
            return invalid("pipe_gap", "leaves no room for the gap above the ground");
        }
        Ok(())
    }

    /// Highest allowed gap top (keeps part of the top pipe on screen)
    #[inline]
    pub fn min_top_bottom(&self) -> f32 {
        PIPE_HEIGHT * self.pipe_margin_frac
    }

    /// Lowest allowed gap top (keeps part of the bottom pipe above the ground)
    #[inline]
    pub fn max_top_bottom(&self) -> f32 {
        SCREEN_HEIGHT - self.pipe_gap - PIPE_HEIGHT * self.pipe_margin_frac - GROUND_HEIGHT
    }
}
