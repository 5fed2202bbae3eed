//! Input recordings that reproduce a session exactly
//!
//! A replay is the seed, the tuning and every tick's input. Because the
//! simulation is deterministic, re-running those inputs rebuilds the same
//! state bit for bit.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::{Tuning, TuningError};

/// Failure to load, save or rebuild a replay
#[derive(Debug)]
pub enum ReplayError {
    /// The JSON could not be read or written
    Json(serde_json::Error),
    /// The recorded tuning is not playable
    Tuning(TuningError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Json(e) => write!(f, "replay serialization failed: {}", e),
            ReplayError::Tuning(e) => write!(f, "replay has unusable tuning: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Json(e) => Some(e),
            ReplayError::Tuning(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Json(e)
    }
}

impl From<TuningError> for ReplayError {
    fn from(e: TuningError) -> Self {
        ReplayError::Tuning(e)
    }
}

/// A recorded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u64,
    pub tuning: Tuning,
    pub inputs: Vec<TickInput>,
}

impl Replay {
    /// Start recording a session that has not been ticked yet
    pub fn new(state: &GameState) -> Self {
        Self {
            seed: state.seed,
            tuning: state.tuning.clone(),
            inputs: Vec::new(),
        }
    }

    /// Tick the session and remember the input
    pub fn record(&mut self, state: &mut GameState, input: TickInput) {
        tick(state, &input);
        self.inputs.push(input);
    }

    /// Rebuild the session from scratch and return its final state
    pub fn run(&self) -> Result<GameState, ReplayError> {
        let mut state = GameState::with_tuning(self.seed, self.tuning.clone())?;
        for input in &self.inputs {
            tick(&mut state, input);
        }
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a replay; its tuning must pass the same checks as a tuning file
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let replay: Replay = serde_json::from_str(json)?;
        replay.tuning.validate()?;
        Ok(replay)
    }
}
