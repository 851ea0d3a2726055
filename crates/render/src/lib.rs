//! Rendering adapter: a renderer-agnostic interface over the stage.
//!
//! # Invariants
//! - Renderers read the stage; they never mutate it.
//! - Everything a backend draws derives from `FrameDescription::from_stage`.

mod frame;
mod renderer;

pub use frame::{FrameDescription, LitFrame, SHADOW_LIFT, TrailVertex, planar_shadow_matrix};
pub use renderer::{DebugTextRenderer, Renderer};
