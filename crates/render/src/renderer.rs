use facehover_kernel::Stage;
use facehover_scene::FACE_NAMES;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the stage and produces output. It never mutates the
/// stage; highlight and camera state are kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the stage as it stands after the latest step.
    fn render(&self, stage: &Stage) -> Self::Output;
}

/// Human-readable dump of the stage, for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, stage: &Stage) -> String {
        let mut out = String::new();
        let rotation = stage.rotation();
        let camera = stage.camera();
        let p = camera.position;

        out.push_str(&format!(
            "=== Stage (frame={}, variant={}) ===\n",
            stage.frame(),
            stage.variant()
        ));
        out.push_str(&format!(
            "Rotation: x={:.3} y={:.3}\n",
            rotation.x, rotation.y
        ));
        out.push_str(&format!(
            "Camera: pos=({:.3}, {:.3}, {:.3}) zoom={:.2} fov={:.1}\n",
            p.x,
            p.y,
            p.z,
            camera.zoom,
            camera.effective_fov().to_degrees()
        ));
        match stage.hovered() {
            Some(i) => {
                let name = FACE_NAMES.get(i).copied().unwrap_or("?");
                out.push_str(&format!("Hovered: {name} ({i})\n"));
            }
            None => out.push_str("Hovered: none\n"),
        }
        for (i, color) in stage.materials().iter().enumerate() {
            let name = FACE_NAMES.get(i).copied().unwrap_or("?");
            out.push_str(&format!("  [{i}] {name:<2} {color}\n"));
        }
        if let Some(trail) = stage.trail() {
            out.push_str(&format!(
                "Trail: {}/{} points\n",
                trail.len(),
                trail.capacity()
            ));
        }

        out
    }
}
