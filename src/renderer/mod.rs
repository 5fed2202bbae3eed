//! Rendering module
//!
//! `scene` builds a backend-agnostic draw list; `canvas` plays it onto an
//! HTML canvas with the 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCommand, SpriteId, build_scene};
