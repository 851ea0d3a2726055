use glam::{Mat4, Vec3};

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray with a normalized direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform the ray by an affine matrix.
    ///
    /// The direction is not renormalized, so `t` keeps its meaning: `at(t)`
    /// of the result is the transform of `at(t)` of the input.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }

    /// Möller–Trumbore ray/triangle intersection.
    ///
    /// Returns the ray parameter of the hit. With `cull_back_faces`, triangles
    /// whose counter-clockwise side faces away from the ray are ignored.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3, cull_back_faces: bool) -> Option<f32> {
        const EPSILON: f32 = 1e-8;

        let edge1 = b - a;
        let edge2 = c - a;
        let h = self.direction.cross(edge2);
        let det = edge1.dot(h);

        if cull_back_faces {
            if det < EPSILON {
                return None;
            }
        } else if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        (t > EPSILON).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_triangle() -> [Vec3; 3] {
        // counter-clockwise seen from +Z
        [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn hits_front_face() {
        let [a, b, c] = facing_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_triangle(a, b, c, true).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
        assert!(ray.at(t).abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn culls_back_face() {
        let [a, b, c] = facing_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(ray.intersect_triangle(a, b, c, true).is_none());
        assert!(ray.intersect_triangle(a, b, c, false).is_some());
    }

    #[test]
    fn misses_outside_triangle() {
        let [a, b, c] = facing_triangle();
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersect_triangle(a, b, c, true).is_none());
    }

    #[test]
    fn ignores_hits_behind_origin() {
        let [a, b, c] = facing_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_triangle(a, b, c, false).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let [a, b, c] = facing_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(ray.intersect_triangle(a, b, c, false).is_none());
    }

    #[test]
    fn transform_preserves_parameter() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::from_rotation_y(0.7),
            Vec3::new(4.0, 0.0, 0.0),
        );
        let moved = ray.transformed(&m);
        let t = 1.5;
        assert!(moved.at(t).abs_diff_eq(m.transform_point3(ray.at(t)), 1e-5));
    }
}
