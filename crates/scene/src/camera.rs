use crate::ray::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Perspective camera looking down -Z with no rotation of its own.
///
/// Panning moves `position`; zoom narrows the field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view at zoom 1, in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 4.0),
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            zoom: 1.0,
        }
    }
}

impl PerspectiveCamera {
    /// Field of view after zoom: `2 * atan(tan(fov / 2) / zoom)`.
    pub fn effective_fov(&self) -> f32 {
        2.0 * ((self.fov * 0.5).tan() / self.zoom).atan()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.effective_fov(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let target = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, target - self.position)
    }

    /// Move toward `target` by `factor` of the remaining distance in X and Y.
    pub fn smooth_toward(&mut self, target: Vec2, factor: f32) {
        self.position.x += (target.x - self.position.x) * factor;
        self.position.y += (target.y - self.position.y) * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 4.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn zoom_narrows_field_of_view() {
        let mut cam = PerspectiveCamera::default();
        let base = cam.effective_fov();
        assert!((base - cam.fov).abs() < 1e-6);
        cam.zoom = 2.0;
        assert!(cam.effective_fov() < base);
        cam.zoom = 0.05;
        assert!(cam.effective_fov() > base);
        assert!(cam.effective_fov() < std::f32::consts::PI);
    }

    #[test]
    fn center_ray_points_forward() {
        let cam = PerspectiveCamera::default();
        let ray = cam.ray_through(Vec2::ZERO);
        assert_eq!(ray.origin, cam.position);
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn corner_ray_matches_frustum() {
        let cam = PerspectiveCamera {
            aspect: 1.0,
            ..PerspectiveCamera::default()
        };
        let ray = cam.ray_through(Vec2::new(1.0, 1.0));
        let half = (cam.fov * 0.5).tan();
        let expected = Vec3::new(half, half, -1.0).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn smoothing_moves_a_fraction_of_the_gap() {
        let mut cam = PerspectiveCamera::default();
        cam.smooth_toward(Vec2::new(1.0, -1.0), 0.1);
        assert!((cam.position.x - 0.1).abs() < 1e-6);
        assert!((cam.position.y + 0.1).abs() < 1e-6);
        assert_eq!(cam.position.z, 4.0);
    }
}
