use facehover_common::Color;
use facehover_kernel::{Stage, Variant};
use facehover_scene::FACE_NAMES;
use glam::Vec3;

/// Stage inspector for developer tooling.
///
/// Provides read-only queries against the stage for the debug overlay and
/// the CLI.
pub struct StageInspector;

impl StageInspector {
    /// Produce a summary of the stage.
    pub fn summary(stage: &Stage) -> StageSummary {
        let interaction = stage.interaction();
        StageSummary {
            frame: stage.frame(),
            variant: stage.variant(),
            hovered: stage.hovered(),
            rotation_speed: interaction.rotation_speed,
            zoom: interaction.zoom,
            camera: stage.camera().position,
            pending_events: stage.events().len(),
        }
    }

    /// Material and group details of one face.
    pub fn inspect_face(stage: &Stage, index: usize) -> Option<FaceInfo> {
        let color = stage.materials().get(index)?;
        let group = stage
            .geometry()
            .groups()
            .iter()
            .find(|g| g.material_index == index);
        Some(FaceInfo {
            index,
            name: FACE_NAMES.get(index).copied().unwrap_or("?"),
            color,
            indices: group.map(|g| (g.start, g.count)),
            highlighted: stage.hovered() == Some(index),
        })
    }

    /// Details of every material slot, in slot order.
    pub fn list_faces(stage: &Stage) -> Vec<FaceInfo> {
        (0..stage.materials().len())
            .filter_map(|i| Self::inspect_face(stage, i))
            .collect()
    }
}

/// Summary of stage state for the inspector.
#[derive(Debug, Clone)]
pub struct StageSummary {
    pub frame: u64,
    pub variant: Variant,
    pub hovered: Option<usize>,
    pub rotation_speed: f32,
    pub zoom: f32,
    pub camera: Vec3,
    pub pending_events: usize,
}

impl std::fmt::Display for StageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hovered = self
            .hovered
            .and_then(|i| FACE_NAMES.get(i).copied())
            .unwrap_or("none");
        write!(
            f,
            "Stage: frame={} variant={} hovered={} speed={:.3} zoom={:.2} camera=({:.2}, {:.2}) pending_events={}",
            self.frame,
            self.variant,
            hovered,
            self.rotation_speed,
            self.zoom,
            self.camera.x,
            self.camera.y,
            self.pending_events
        )
    }
}

/// Detailed info about a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceInfo {
    pub index: usize,
    pub name: &'static str,
    pub color: Color,
    /// Start and length of the face's index range, if any group binds it.
    pub indices: Option<(usize, usize)>,
    pub highlighted: bool,
}

impl std::fmt::Display for FaceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face [{}] {:<2} {}", self.index, self.name, self.color)?;
        match self.indices {
            Some((start, count)) => write!(f, " indices={start}..{}", start + count)?,
            None => f.write_str(" indices=none")?,
        }
        if self.highlighted {
            f.write_str(" (hovered)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facehover_input::InputEvent;
    use facehover_kernel::StageConfig;
    use facehover_scene::BoxGeometry;

    fn hovered_stage() -> Stage {
        let mut stage = Stage::new(StageConfig {
            rotation_speed: 0.001,
            ..StageConfig::default()
        });
        stage.handle(InputEvent::Resized {
            width: 1000.0,
            height: 1000.0,
        });
        stage.handle(InputEvent::PointerMoved { x: 550.0, y: 520.0 });
        stage.step();
        stage
    }

    #[test]
    fn summary_fresh_stage() {
        let stage = Stage::new(StageConfig::default());
        let summary = StageInspector::summary(&stage);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.hovered, None);
        assert_eq!(summary.zoom, 1.0);
        assert_eq!(summary.camera, Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn summary_after_hover() {
        let stage = hovered_stage();
        let summary = StageInspector::summary(&stage);
        assert_eq!(summary.frame, 1);
        assert_eq!(summary.hovered, Some(4));
        // resize + highlight
        assert_eq!(summary.pending_events, 2);
    }

    #[test]
    fn inspect_face_found() {
        let stage = hovered_stage();
        let info = StageInspector::inspect_face(&stage, 4).unwrap();
        assert_eq!(info.name, "+Z");
        assert_eq!(info.color, Color::from_hex(0xff0000));
        assert_eq!(info.indices, Some((24, 6)));
        assert!(info.highlighted);
        assert_eq!(info.to_string(), "Face [4] +Z #ff0000 indices=24..30 (hovered)");
    }

    #[test]
    fn inspect_face_out_of_range() {
        let stage = Stage::new(StageConfig::default());
        assert!(StageInspector::inspect_face(&stage, 6).is_none());
    }

    #[test]
    fn unbound_face_has_no_indices() {
        let base = BoxGeometry::unit();
        let groups = base.groups()[..5].to_vec();
        let stage = Stage::with_geometry(StageConfig::default(), base.with_groups(groups));
        let faces = StageInspector::list_faces(&stage);
        assert_eq!(faces.len(), 6);
        assert_eq!(faces[5].indices, None);
        assert!(faces[5].to_string().contains("indices=none"));
    }

    #[test]
    fn summary_display() {
        let stage = hovered_stage();
        let s = format!("{}", StageInspector::summary(&stage));
        assert!(s.contains("frame=1"));
        assert!(s.contains("hovered=+Z"));
        assert!(s.contains("variant=basic"));
    }
}
