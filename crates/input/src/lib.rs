//! Input: window and slider input mapped to discrete events, the pointer
//! mapper behind picking and edge panning, and the cursor trail history.
//!
//! # Invariants
//! - Consumers see `InputEvent`s, never raw window events.
//! - Pointer mapping is pure; the caller owns all resulting state.

pub mod event;
pub mod pointer;
pub mod slider;
pub mod trail;

pub use event::InputEvent;
pub use pointer::{PointerMapper, PointerSample};
pub use slider::SliderRange;
pub use trail::{CursorTrail, MAX_TRAIL_CAPACITY, TrailConfig, TrailPoint};
