//! Shared value types used across the facehover workspace.

mod types;

pub use types::{Color, ColorParseError, Rotation, Viewport};
