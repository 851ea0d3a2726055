use facehover_kernel::Stage;
use facehover_scene::FACE_COUNT;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Height of the shadow above the ground plane, keeping the two from z-fighting.
pub const SHADOW_LIFT: f32 = 0.002;

/// Matrix flattening points onto a plane along a directional light.
///
/// The plane is `normal · p + d = 0` and `light` points toward the light.
/// The result is projective; divide by `w` after applying it.
pub fn planar_shadow_matrix(normal: Vec3, d: f32, light: Vec3) -> Mat4 {
    let plane = normal.extend(d);
    let light = light.extend(0.0);
    let dot = plane.dot(light);
    Mat4::from_cols(
        Vec4::X * dot - light * plane.x,
        Vec4::Y * dot - light * plane.y,
        Vec4::Z * dot - light * plane.z,
        Vec4::W * dot - light * plane.w,
    )
}

/// Lighting inputs for the lit variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitFrame {
    /// Unit vector toward the light.
    pub light_dir: Vec3,
    pub ambient: f32,
    /// Cube model matrix followed by the planar shadow projection.
    pub shadow: Mat4,
    /// Maps the unit quad in the XZ plane onto the ground.
    pub ground: Mat4,
    pub ground_color: [f32; 4],
    pub shadow_color: [f32; 4],
}

/// A trail point in normalized device coordinates with its fading color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailVertex {
    pub ndc: Vec2,
    pub color: [f32; 4],
}

/// Everything a backend needs to draw one frame. Colors are linear RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDescription {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub face_colors: [[f32; 4]; FACE_COUNT],
    pub wire_color: [f32; 4],
    pub background: [f32; 4],
    pub lighting: Option<LitFrame>,
    /// Oldest first.
    pub trail: Vec<TrailVertex>,
}

impl FrameDescription {
    pub fn from_stage(stage: &Stage) -> Self {
        let config = stage.config();
        let model = stage.model_matrix();

        let mut face_colors = [config.default_color.to_linear_rgba(1.0); FACE_COUNT];
        for (slot, color) in face_colors.iter_mut().zip(stage.materials().iter()) {
            *slot = color.to_linear_rgba(1.0);
        }

        let lighting = config.variant.lighting().then(|| {
            let lighting = &config.lighting;
            let light_dir = lighting.direction.normalize();
            let height = lighting.ground_height;
            LitFrame {
                light_dir,
                ambient: lighting.ambient,
                shadow: planar_shadow_matrix(Vec3::Y, -(height + SHADOW_LIFT), light_dir) * model,
                ground: Mat4::from_translation(Vec3::new(0.0, height, 0.0))
                    * Mat4::from_scale(Vec3::new(lighting.ground_size, 1.0, lighting.ground_size)),
                ground_color: lighting.ground_color.to_linear_rgba(1.0),
                shadow_color: lighting.shadow_color.to_linear_rgba(1.0),
            }
        });

        let trail = stage
            .trail()
            .map(|trail| {
                let color = config.trail.color;
                trail
                    .points()
                    .map(|point| TrailVertex {
                        ndc: point.ndc,
                        color: color.to_linear_rgba(point.alpha.clamp(0.0, 1.0)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            view_proj: stage.camera().view_projection(),
            model,
            face_colors,
            wire_color: config.wire_color.to_linear_rgba(1.0),
            background: config.background.to_linear_rgba(1.0),
            lighting,
            trail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facehover_input::InputEvent;
    use facehover_kernel::{StageConfig, Variant};

    fn stage(variant: Variant) -> Stage {
        let mut stage = Stage::new(StageConfig {
            variant,
            ..StageConfig::default()
        });
        stage.handle(InputEvent::Resized {
            width: 1000.0,
            height: 1000.0,
        });
        stage
    }

    #[test]
    fn shadow_lands_on_ground_plane() {
        let height = -1.2;
        let m = planar_shadow_matrix(Vec3::Y, -height, Vec3::new(2.0, 5.0, 3.0).normalize());
        for p in [
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::ZERO,
        ] {
            let s = m.project_point3(p);
            assert!((s.y - height).abs() < 1e-5, "{p} -> {s}");
        }
    }

    #[test]
    fn shadow_falls_away_from_light() {
        let m = planar_shadow_matrix(Vec3::Y, 1.0, Vec3::new(1.0, 1.0, 0.0));
        // from y = 1 to y = -1 along (-1, -1, 0)
        let s = m.project_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(s.abs_diff_eq(Vec3::new(-2.0, -1.0, 0.0), 1e-5));
    }

    #[test]
    fn overhead_light_drops_straight_down() {
        let m = planar_shadow_matrix(Vec3::Y, 2.0, Vec3::Y);
        let s = m.project_point3(Vec3::new(0.3, 0.7, -0.2));
        assert!(s.abs_diff_eq(Vec3::new(0.3, -2.0, -0.2), 1e-6));
    }

    #[test]
    fn basic_frame_has_no_extras() {
        let frame = FrameDescription::from_stage(&stage(Variant::Basic));
        assert!(frame.lighting.is_none());
        assert!(frame.trail.is_empty());
        assert_eq!(frame.face_colors, [[0.0, 1.0, 0.0, 1.0]; FACE_COUNT]);
        assert_eq!(frame.wire_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.model, Mat4::IDENTITY);
    }

    #[test]
    fn hovered_face_is_drawn_in_hover_color() {
        let mut stage = stage(Variant::Basic);
        stage.handle(InputEvent::RotationSpeedChanged(0.001));
        stage.handle(InputEvent::PointerMoved { x: 550.0, y: 520.0 });
        stage.step();
        let frame = FrameDescription::from_stage(&stage);
        assert_eq!(frame.face_colors[4], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.face_colors[0], [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn lit_frame_places_ground_and_shadow() {
        let frame = FrameDescription::from_stage(&stage(Variant::Lit));
        let lit = frame.lighting.unwrap();
        assert!((lit.light_dir.length() - 1.0).abs() < 1e-6);
        let corner = lit.ground.transform_point3(Vec3::new(0.5, 0.0, 0.5));
        assert!(corner.abs_diff_eq(Vec3::new(6.0, -1.2, 6.0), 1e-5));
        let top = lit.shadow.project_point3(Vec3::new(0.5, 0.5, 0.5));
        assert!((top.y - (-1.2 + SHADOW_LIFT)).abs() < 1e-5);
    }

    #[test]
    fn trail_vertices_carry_fading_alpha() {
        let mut stage = stage(Variant::Trail);
        stage.handle(InputEvent::PointerMoved { x: 100.0, y: 100.0 });
        stage.step();
        stage.handle(InputEvent::PointerMoved { x: 200.0, y: 100.0 });
        let frame = FrameDescription::from_stage(&stage);
        assert_eq!(frame.trail.len(), 2);
        assert!(frame.trail[0].color[3] < frame.trail[1].color[3]);
        assert_eq!(frame.trail[1].color[3], 1.0);
        assert!(frame.lighting.is_some());
    }
}
