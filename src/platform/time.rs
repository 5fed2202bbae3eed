//! Fixed-step frame pacing
//!
//! The display callback fires at whatever rate the screen refreshes; the
//! simulation always steps at `SIM_DT`. On a 60 Hz display that is exactly
//! one step per refresh.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap honoured; anything longer (tab switch, debugger) is clamped
const MAX_FRAME_MS: f64 = 100.0;
/// Absorbs timestamp rounding so a 16.666 ms frame still counts as one step
const STEP_EPSILON_MS: f64 = 0.01;

/// Converts display-callback timestamps into a number of simulation steps
#[derive(Debug, Clone)]
pub struct FrameDriver {
    step_ms: f64,
    max_substeps: u32,
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_step(SIM_DT as f64 * 1000.0, MAX_SUBSTEPS)
    }

    pub fn with_step(step_ms: f64, max_substeps: u32) -> Self {
        Self {
            step_ms,
            max_substeps,
            accumulator_ms: 0.0,
            last_time_ms: None,
        }
    }

    /// Feed the callback timestamp; returns how many steps to run now
    ///
    /// The first call always runs one step. When the step cap is hit the
    /// leftover time is dropped instead of being carried into later frames.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => self.step_ms,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator_ms += dt;

        let mut steps = 0;
        while self.accumulator_ms + STEP_EPSILON_MS >= self.step_ms {
            if steps == self.max_substeps {
                log::debug!("Dropping {:.1} ms of backlog", self.accumulator_ms);
                self.accumulator_ms = 0.0;
                break;
            }
            self.accumulator_ms -= self.step_ms;
            steps += 1;
        }
        self.accumulator_ms = self.accumulator_ms.max(0.0);
        steps
    }

    /// Forget the last timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_time_ms = None;
    }
}
