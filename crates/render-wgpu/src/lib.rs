//! wgpu render backend for the hover cube.
//!
//! Draws the cube with per-face colors and a wireframe overlay. The lit
//! variants add a ground plane and the cube's planar shadow, the trail
//! variant an alpha-blended cursor trail in screen space.
//!
//! # Invariants
//! - The renderer never mutates the stage.
//! - Every frame is drawn from a fresh `FrameDescription`.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
