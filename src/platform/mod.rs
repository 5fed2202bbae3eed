//! Platform abstraction layer
//!
//! Browser-independent pieces of the outer loop:
//! - Frame pacing (fixed-step accumulator)
//! - Input debouncing

pub mod input;
pub mod time;

pub use input::InputGate;
pub use time::FrameDriver;
