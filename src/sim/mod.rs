//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time enters only through `TickInput::now_ms`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod avatar;
pub mod collision;
pub mod replay;
pub mod state;
pub mod tick;
pub mod track;

pub use avatar::{Avatar, Impact};
pub use collision::{Aabb, check_collision};
pub use replay::{Replay, ReplayError};
pub use state::{GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, tick};
