use facehover_common::Viewport;
use facehover_input::{PointerSample, slider};
use glam::Vec2;

/// Live values written by input events and read by the frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub pointer: PointerSample,
    /// Camera offset the smoothing step is heading for.
    pub offset_target: Vec2,
    /// Radians added to each rotation axis per frame.
    pub rotation_speed: f32,
    pub zoom: f32,
    pub viewport: Viewport,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            pointer: PointerSample::default(),
            offset_target: Vec2::ZERO,
            rotation_speed: slider::ROTATION_SPEED.initial,
            zoom: slider::ZOOM.initial,
            viewport: Viewport::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered_at_slider_defaults() {
        let s = InteractionState::default();
        assert_eq!(s.pointer.ndc, Vec2::ZERO);
        assert_eq!(s.offset_target, Vec2::ZERO);
        assert_eq!(s.rotation_speed, 0.01);
        assert_eq!(s.zoom, 1.0);
    }
}
