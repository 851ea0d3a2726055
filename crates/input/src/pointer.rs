use facehover_common::Viewport;
use glam::Vec2;

/// Latest pointer position. No history is kept here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Normalized device coordinates, `[-1, 1]` on both axes, Y up.
    pub ndc: Vec2,
    /// Pixel position, Y down.
    pub raw: Vec2,
}

/// Maps pixel pointer positions to pick coordinates and edge-panning offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    /// Width of the panning band on each side, as a fraction of the viewport.
    pub edge_threshold: f32,
    /// Offset applied when the pointer sits on the viewport edge.
    pub max_offset: f32,
}

impl Default for PointerMapper {
    fn default() -> Self {
        Self {
            edge_threshold: 0.1,
            max_offset: 0.3,
        }
    }
}

impl PointerMapper {
    pub fn new(edge_threshold: f32, max_offset: f32) -> Self {
        Self {
            edge_threshold,
            max_offset,
        }
    }

    /// Convert a pixel position into a pointer sample.
    pub fn sample(&self, raw: Vec2, viewport: &Viewport) -> PointerSample {
        let fraction = viewport.fraction(raw);
        PointerSample {
            ndc: Vec2::new(fraction.x * 2.0 - 1.0, -fraction.y * 2.0 + 1.0),
            raw,
        }
    }

    /// Camera offset target for a pixel position.
    ///
    /// Left and bottom bands pan negative, right and top bands pan positive.
    /// Outside every band the axis offset is exactly zero.
    pub fn edge_offset(&self, raw: Vec2, viewport: &Viewport) -> Vec2 {
        let fraction = viewport.fraction(raw);
        Vec2::new(
            self.band_strength(fraction.x) * self.max_offset,
            // screen Y grows downward
            -self.band_strength(fraction.y) * self.max_offset,
        )
    }

    /// Signed strength in `[-1, 1]`: negative toward the low edge, positive
    /// toward the high edge, rising linearly across the band.
    fn band_strength(&self, fraction: f32) -> f32 {
        let t = self.edge_threshold;
        if t <= 0.0 {
            return 0.0;
        }
        if fraction < t {
            -((t - fraction) / t).min(1.0)
        } else if fraction > 1.0 - t {
            ((fraction - (1.0 - t)) / t).min(1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Viewport {
        Viewport::new(1000.0, 1000.0)
    }

    #[test]
    fn ndc_corners_and_center() {
        let mapper = PointerMapper::default();
        let v = square();
        assert_eq!(mapper.sample(Vec2::new(0.0, 0.0), &v).ndc, Vec2::new(-1.0, 1.0));
        assert_eq!(mapper.sample(Vec2::new(1000.0, 1000.0), &v).ndc, Vec2::new(1.0, -1.0));
        assert_eq!(mapper.sample(Vec2::new(500.0, 500.0), &v).ndc, Vec2::ZERO);
    }

    #[test]
    fn sample_keeps_raw_position() {
        let mapper = PointerMapper::default();
        let s = mapper.sample(Vec2::new(12.0, 34.0), &square());
        assert_eq!(s.raw, Vec2::new(12.0, 34.0));
    }

    #[test]
    fn center_has_no_offset() {
        let mapper = PointerMapper::default();
        assert_eq!(mapper.edge_offset(Vec2::new(500.0, 500.0), &square()), Vec2::ZERO);
    }

    #[test]
    fn top_left_corner_offset() {
        let mapper = PointerMapper::new(0.1, 0.3);
        let offset = mapper.edge_offset(Vec2::new(0.0, 0.0), &square());
        assert_eq!(offset, Vec2::new(-0.3, 0.3));
    }

    #[test]
    fn bottom_right_corner_offset() {
        let mapper = PointerMapper::new(0.1, 0.3);
        let offset = mapper.edge_offset(Vec2::new(1000.0, 1000.0), &square());
        assert!(offset.abs_diff_eq(Vec2::new(0.3, -0.3), 1e-6));
    }

    #[test]
    fn strength_scales_linearly_inside_band() {
        let mapper = PointerMapper::new(0.1, 0.3);
        let half = mapper.edge_offset(Vec2::new(50.0, 500.0), &square());
        assert!((half.x + 0.15).abs() < 1e-6);
        assert_eq!(half.y, 0.0);

        let boundary = mapper.edge_offset(Vec2::new(100.0, 500.0), &square());
        assert_eq!(boundary.x, 0.0);
    }

    #[test]
    fn offset_outside_viewport_is_capped() {
        let mapper = PointerMapper::new(0.1, 0.3);
        let offset = mapper.edge_offset(Vec2::new(-200.0, 500.0), &square());
        assert_eq!(offset.x, -0.3);
    }

    #[test]
    fn zero_threshold_disables_panning() {
        let mapper = PointerMapper::new(0.0, 0.3);
        assert_eq!(mapper.edge_offset(Vec2::new(0.0, 0.0), &square()), Vec2::ZERO);
    }
}
