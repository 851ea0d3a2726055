use glam::Vec3;
use std::collections::BTreeSet;

/// Number of faces on a cuboid, and therefore of face groups and material slots.
pub const FACE_COUNT: usize = 6;

/// Indices per triangle in the shared index buffer.
pub const TRIANGLE_STRIDE: usize = 3;

/// Outward normal plus the two in-plane axes of each face, in group order.
///
/// `u × v == normal`, so corners emitted in `(-u,-v) (u,-v) (u,v) (-u,v)` order
/// wind counter-clockwise seen from outside.
const FACES: [(Vec3, Vec3, Vec3); FACE_COUNT] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Human-readable face names, indexed like the face groups.
pub const FACE_NAMES: [&str; FACE_COUNT] = ["+X", "-X", "+Y", "-Y", "+Z", "-Z"];

/// A contiguous range of the index buffer drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGroup {
    /// Offset of the first index of the group.
    pub start: usize,
    /// Number of indices in the group.
    pub count: usize,
    pub material_index: usize,
}

impl FaceGroup {
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Whether an index-buffer position falls inside `[start, start + count)`.
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end()
    }
}

/// Ways a group list can fail to partition the index buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("gap before index {start}: previous group ended at {expected}")]
    Gap { start: usize, expected: usize },
    #[error("group at index {start} overlaps the previous group ending at {expected}")]
    Overlap { start: usize, expected: usize },
    #[error("groups cover {covered} indices but the index buffer holds {len}")]
    Coverage { covered: usize, len: usize },
    #[error("group at index {start} uses material {material_index}, only {slots} slots exist")]
    MaterialOutOfRange {
        start: usize,
        material_index: usize,
        slots: usize,
    },
    #[error("material {0} is bound to more than one group")]
    DuplicateMaterial(usize),
}

/// Indexed cuboid mesh whose index buffer is split into one group per face.
///
/// Vertices are not shared between faces so every face keeps its own normal.
#[derive(Debug, Clone)]
pub struct BoxGeometry {
    size: Vec3,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u16>,
    groups: Vec<FaceGroup>,
}

impl BoxGeometry {
    /// Build a cuboid centred on the origin.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let size = Vec3::new(width, height, depth);
        let half = size * 0.5;
        let mut positions = Vec::with_capacity(FACE_COUNT * 4);
        let mut normals = Vec::with_capacity(FACE_COUNT * 4);
        let mut indices = Vec::with_capacity(FACE_COUNT * 6);
        let mut groups = Vec::with_capacity(FACE_COUNT);

        for (face, (normal, u, v)) in FACES.iter().enumerate() {
            let base = positions.len() as u16;
            for (su, sv) in [(-1.0_f32, -1.0_f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push((*normal + *u * su + *v * sv) * half);
                normals.push(*normal);
            }
            let start = indices.len();
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
            groups.push(FaceGroup {
                start,
                count: indices.len() - start,
                material_index: face,
            });
        }

        Self {
            size,
            positions,
            normals,
            indices,
            groups,
        }
    }

    /// The 1×1×1 cube.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Replace the face groups without validating them.
    pub fn with_groups(mut self, groups: Vec<FaceGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn groups(&self) -> &[FaceGroup] {
        &self.groups
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / TRIANGLE_STRIDE
    }

    /// Vertex positions of triangle `t`.
    pub fn triangle(&self, t: usize) -> Option<[Vec3; 3]> {
        let start = t.checked_mul(TRIANGLE_STRIDE)?;
        let tri = self.indices.get(start..start.checked_add(TRIANGLE_STRIDE)?)?;
        Some([
            self.positions[tri[0] as usize],
            self.positions[tri[1] as usize],
            self.positions[tri[2] as usize],
        ])
    }

    /// Resolve a triangle index to the material of the group containing it.
    ///
    /// Returns `None` if `t * 3` lies outside every group.
    pub fn material_index_for_triangle(&self, t: usize) -> Option<usize> {
        let position = t.checked_mul(TRIANGLE_STRIDE)?;
        self.groups
            .iter()
            .find(|group| group.contains(position))
            .map(|group| group.material_index)
    }

    /// Material index for every vertex, taken from the group that references it.
    /// Vertices outside every group default to material 0.
    pub fn vertex_materials(&self) -> Vec<u32> {
        let mut materials = vec![0u32; self.positions.len()];
        for group in &self.groups {
            let end = group.end().min(self.indices.len());
            for &index in self.indices.get(group.start..end).unwrap_or_default() {
                materials[index as usize] = group.material_index as u32;
            }
        }
        materials
    }

    /// Verify that the groups partition the index buffer and bind distinct,
    /// in-range materials.
    pub fn check_groups(&self) -> Result<(), GeometryError> {
        let mut sorted = self.groups.clone();
        sorted.sort_by_key(|group| group.start);

        let mut expected = 0;
        let mut seen = BTreeSet::new();
        for group in &sorted {
            if group.start > expected {
                return Err(GeometryError::Gap {
                    start: group.start,
                    expected,
                });
            }
            if group.start < expected {
                return Err(GeometryError::Overlap {
                    start: group.start,
                    expected,
                });
            }
            if group.material_index >= FACE_COUNT {
                return Err(GeometryError::MaterialOutOfRange {
                    start: group.start,
                    material_index: group.material_index,
                    slots: FACE_COUNT,
                });
            }
            if !seen.insert(group.material_index) {
                return Err(GeometryError::DuplicateMaterial(group.material_index));
            }
            expected = group.end();
        }

        if expected != self.indices.len() {
            return Err(GeometryError::Coverage {
                covered: expected,
                len: self.indices.len(),
            });
        }
        Ok(())
    }

    /// Unique triangle edges as vertex index pairs, for the wireframe overlay.
    pub fn wireframe_edges(&self) -> Vec<[u16; 2]> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(TRIANGLE_STRIDE) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::unit()
    }
}
