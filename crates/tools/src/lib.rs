//! Developer tooling: read-only stage inspection for the desktop overlay and the CLI.

mod inspector;

pub use inspector::{FaceInfo, StageInspector, StageSummary};
