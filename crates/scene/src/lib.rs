//! Scene: the cube's geometry catalog, its material slots, the perspective
//! camera and ray picking against the mesh.
//!
//! # Invariants
//! - Face groups are fixed once the geometry is built.
//! - Picking is recomputed on every call; nothing is cached.
//! - A hit whose triangle belongs to no group is reported as
//!   `PickOutcome::InconsistentGeometry`, never as a miss.

mod camera;
mod geometry;
mod material;
mod pick;
mod ray;

pub use camera::PerspectiveCamera;
pub use geometry::{BoxGeometry, FACE_COUNT, FACE_NAMES, FaceGroup, GeometryError, TRIANGLE_STRIDE};
pub use material::MaterialSlots;
pub use pick::{FacePicker, PickOutcome};
pub use ray::Ray;
