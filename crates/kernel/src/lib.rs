//! Stage kernel: interaction state, the highlight state machine and the per-frame driver.
//!
//! # Invariants
//! - After every frame at most one material slot differs from the default color,
//!   and it is the slot of the highlighted face.
//! - Camera position and highlight state change only inside `Stage::step`.
//! - Replaying the same message sequence yields the same stage.

pub mod config;
pub mod highlight;
pub mod interaction;
pub mod stage;

pub use config::{ConfigError, LightingConfig, StageConfig, Variant};
pub use highlight::{HighlightState, HighlightTransition, Highlighter};
pub use interaction::InteractionState;
pub use stage::{FrameStats, Message, Stage, StageEvent};
