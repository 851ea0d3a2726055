use crate::camera::PerspectiveCamera;
use crate::geometry::BoxGeometry;
use crate::ray::Ray;
use glam::{Mat4, Vec2};

/// Result of picking the cube under a screen point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// The nearest triangle hit belongs to a face group.
    Hit {
        material_index: usize,
        triangle: usize,
        distance: f32,
    },
    /// Nothing under the pointer.
    Miss,
    /// A triangle was hit but no face group contains it.
    InconsistentGeometry { triangle: usize },
}

impl PickOutcome {
    pub fn material_index(&self) -> Option<usize> {
        match self {
            Self::Hit { material_index, .. } => Some(*material_index),
            Self::Miss | Self::InconsistentGeometry { .. } => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Nearest-hit picking against a single mesh. Nothing is cached between calls.
pub struct FacePicker;

impl FacePicker {
    /// Nearest front-facing triangle along a world-space ray, with its
    /// world-space distance.
    pub fn nearest_triangle(geometry: &BoxGeometry, model: Mat4, ray: &Ray) -> Option<(usize, f32)> {
        let local = ray.transformed(&model.inverse());
        let mut nearest: Option<(usize, f32)> = None;

        for t in 0..geometry.triangle_count() {
            let Some([a, b, c]) = geometry.triangle(t) else {
                continue;
            };
            let Some(s) = local.intersect_triangle(a, b, c, true) else {
                continue;
            };
            let distance = ray.origin.distance(model.transform_point3(local.at(s)));
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((t, distance));
            }
        }
        nearest
    }

    /// Pick along a world-space ray and resolve the hit to a material slot.
    pub fn pick(geometry: &BoxGeometry, model: Mat4, ray: &Ray) -> PickOutcome {
        let Some((triangle, distance)) = Self::nearest_triangle(geometry, model, ray) else {
            return PickOutcome::Miss;
        };
        match geometry.material_index_for_triangle(triangle) {
            Some(material_index) => PickOutcome::Hit {
                material_index,
                triangle,
                distance,
            },
            None => PickOutcome::InconsistentGeometry { triangle },
        }
    }

    /// Pick through a point in normalized device coordinates.
    pub fn pick_from_camera(
        geometry: &BoxGeometry,
        model: Mat4,
        camera: &PerspectiveCamera,
        ndc: Vec2,
    ) -> PickOutcome {
        let ray = camera.ray_through(ndc);
        Self::pick(geometry, model, &ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FaceGroup;
    use facehover_common::Rotation;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    // off the face diagonals, so exactly one triangle contains the hit
    const NEAR_CENTER: Vec2 = Vec2::new(0.1, 0.05);

    fn square_camera() -> PerspectiveCamera {
        PerspectiveCamera {
            aspect: 1.0,
            ..PerspectiveCamera::default()
        }
    }

    #[test]
    fn center_hits_front_face() {
        let geo = BoxGeometry::unit();
        let outcome = FacePicker::pick_from_camera(&geo, Mat4::IDENTITY, &square_camera(), NEAR_CENTER);
        match outcome {
            PickOutcome::Hit {
                material_index,
                distance,
                ..
            } => {
                assert_eq!(material_index, 4); // +Z faces the camera
                assert!(distance > 3.5 && distance < 3.55);
            }
            other => panic!("expected a hit, got {other:?}"),
        }
    }

    #[test]
    fn corner_misses() {
        let geo = BoxGeometry::unit();
        let outcome =
            FacePicker::pick_from_camera(&geo, Mat4::IDENTITY, &square_camera(), Vec2::new(0.9, 0.9));
        assert_eq!(outcome, PickOutcome::Miss);
        assert_eq!(outcome.material_index(), None);
    }

    #[test]
    fn rotated_cube_exposes_top_face() {
        let geo = BoxGeometry::unit();
        let rotation = Rotation {
            x: FRAC_PI_2,
            y: 0.0,
        };
        let outcome =
            FacePicker::pick_from_camera(&geo, rotation.matrix(), &square_camera(), NEAR_CENTER);
        assert_eq!(outcome.material_index(), Some(2));
        if let PickOutcome::Hit { triangle, .. } = outcome {
            assert!(geo.groups()[2].contains(triangle * 3));
        }
    }

    #[test]
    fn nearest_hit_wins_from_the_side() {
        let geo = BoxGeometry::unit();
        let ray = Ray::new(Vec3::new(5.0, 0.1, 0.1), Vec3::NEG_X);
        let outcome = FacePicker::pick(&geo, Mat4::IDENTITY, &ray);
        assert_eq!(outcome.material_index(), Some(0));
    }

    #[test]
    fn ray_from_inside_sees_nothing() {
        // every face culls from the inside
        let geo = BoxGeometry::unit();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(FacePicker::pick(&geo, Mat4::IDENTITY, &ray), PickOutcome::Miss);
    }

    #[test]
    fn missing_group_is_inconsistent() {
        let base = BoxGeometry::unit();
        let groups: Vec<FaceGroup> = base
            .groups()
            .iter()
            .copied()
            .filter(|g| g.material_index != 4)
            .collect();
        let geo = base.with_groups(groups);
        let outcome = FacePicker::pick_from_camera(&geo, Mat4::IDENTITY, &square_camera(), NEAR_CENTER);
        assert!(matches!(outcome, PickOutcome::InconsistentGeometry { triangle: 8 | 9 }));
        assert!(!outcome.is_hit());
    }
}
