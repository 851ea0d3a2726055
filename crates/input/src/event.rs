/// A discrete input message produced by the windowing layer.
///
/// The stage consumes events, never raw window events, so the desktop app
/// and the headless CLI drive it identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a pixel position, origin at the top-left.
    PointerMoved { x: f32, y: f32 },
    /// Pointer left the window.
    PointerLeft,
    /// Drawable area changed size, in pixels.
    Resized { width: f32, height: f32 },
    /// Rotation-speed slider moved, radians per frame.
    RotationSpeedChanged(f32),
    /// Zoom slider moved.
    ZoomChanged(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_moved_is_constructible() {
        let e = InputEvent::PointerMoved { x: 10.0, y: 20.0 };
        assert!(matches!(e, InputEvent::PointerMoved { x, .. } if x == 10.0));
    }

    #[test]
    fn slider_events_carry_values() {
        assert_eq!(
            InputEvent::RotationSpeedChanged(0.05),
            InputEvent::RotationSpeedChanged(0.05)
        );
        assert_ne!(InputEvent::ZoomChanged(1.0), InputEvent::ZoomChanged(2.0));
    }
}
