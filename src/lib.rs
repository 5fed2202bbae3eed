//! Pipe Flap - a side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, obstacles, scoring, collisions, session)
//! - `renderer`: Draw-list construction and the Canvas 2D backend
//! - `platform`: Frame driver and input debouncing
//! - `audio`: Procedural sound cues for simulation events
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one nominal 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 432.0;
    pub const SCREEN_HEIGHT: f32 = 644.0;
    /// Ground strip height, measured up from the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 146.0;
    /// Top edge of the ground strip
    pub const FLOOR_Y: f32 = SCREEN_HEIGHT - GROUND_HEIGHT;

    /// Bird sprite is 56x48, drawn at 80%
    pub const BIRD_WIDTH: f32 = 56.0 * 0.8;
    pub const BIRD_HEIGHT: f32 = 48.0 * 0.8;
    pub const BIRD_START_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = 150.0;
    /// Number of flap animation frames
    pub const BIRD_FRAMES: u8 = 8;
    /// Ticks each flap frame is held
    pub const BIRD_FRAME_TICKS: u64 = 5;

    /// Pipe sprite is 78x530, drawn at 80%
    pub const PIPE_WIDTH: f32 = 78.0 * 0.8;
    pub const PIPE_HEIGHT: f32 = 530.0 * 0.8;

    /// Score digit sprite size
    pub const DIGIT_WIDTH: f32 = 24.0;
    pub const DIGIT_HEIGHT: f32 = 36.0;
    pub const SCORE_Y: f32 = 20.0;
}
