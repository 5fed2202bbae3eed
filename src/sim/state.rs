//! Game state and core simulation types
//!
//! Everything a run needs lives in one `GameState`; the step function in
//! `tick` is its only writer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::Aabb;
use crate::consts::*;
use crate::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first flap
    NotStarted,
    /// Active gameplay
    Running,
    /// Bird is dead; input is ignored until the restart delay passes
    Ended,
    /// Bird is dead and the next input resets the session
    RestartReady,
}

impl GamePhase {
    /// Whether the run is over (with or without restart eligibility)
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Ended | GamePhase::RestartReady)
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Jumped,
    Scored { score: u32 },
    Died { score: u32 },
    Restarted,
}

/// A pipe pair: solid above `top_bottom` and below `top_bottom + gap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top pipe, i.e. the top of the gap
    pub top_bottom: f32,
    /// Whether this pair has already awarded its point
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, top_bottom: f32) -> Self {
        Self {
            x,
            top_bottom,
            scored: false,
        }
    }

    #[inline]
    pub fn center_x(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width / 2.0
    }

    /// The open region between the two pipes
    pub fn gap_bounds(&self, pipe_width: f32, gap: f32) -> Aabb {
        Aabb::from_pos_size(
            Vec2::new(self.x, self.top_bottom),
            Vec2::new(pipe_width, gap),
        )
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG; keeps its stream across restarts
    rng: Pcg32,
    /// Balance parameters
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Pipes cleared this run
    pub score: u32,
    /// Running ticks this run (drives spawn timing)
    pub frame_count: u64,
    /// Ticks since the session was created (drives animation, never reset)
    pub time_ticks: u64,
    /// Ground scroll offset in `(-tile_width, 0]`
    pub ground_x: f32,
    /// The player's bird
    pub avatar: Avatar,
    /// Live pipe pairs, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    /// When the run ended (ms, caller's clock)
    pub ended_at_ms: Option<f64>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a session with custom balance; rejects tuning the simulation can't run
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            avatar: Avatar::new(&tuning),
            tuning,
            phase: GamePhase::NotStarted,
            score: 0,
            frame_count: 0,
            time_ticks: 0,
            ground_x: 0.0,
            obstacles: Vec::new(),
            ended_at_ms: None,
            events: Vec::new(),
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Put the run back on the title screen
    ///
    /// The RNG and `time_ticks` carry on so consecutive runs differ.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.frame_count = 0;
        self.ground_x = 0.0;
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.clear();
        self.ended_at_ms = None;
    }

    /// Whether enough time has passed since death for input to restart
    pub fn restart_eligible(&self, now_ms: f64) -> bool {
        self.phase.is_over()
            && self
                .ended_at_ms
                .is_some_and(|ended| now_ms >= ended + self.tuning.restart_delay_ms)
    }

    /// Top edge of the ground
    #[inline]
    pub fn floor_y(&self) -> f32 {
        FLOOR_Y
    }
}
