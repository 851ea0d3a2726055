use crate::config::{StageConfig, Variant};
use crate::highlight::{HighlightState, HighlightTransition, Highlighter};
use crate::interaction::InteractionState;
use facehover_common::{Rotation, Viewport};
use facehover_input::{CursorTrail, InputEvent, PointerMapper, slider};
use facehover_scene::{BoxGeometry, FACE_COUNT, FacePicker, MaterialSlots, PerspectiveCamera, PickOutcome};
use glam::{Mat4, Vec2, Vec3};

/// A message processed by the stage, strictly one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Input(InputEvent),
    /// One display refresh.
    Tick,
}

/// A record of something the stage did that a host may want to surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageEvent {
    /// The highlighted face changed during `frame`.
    Highlight {
        frame: u64,
        transition: HighlightTransition,
    },
    /// A triangle was hit that no face group contains.
    InconsistentPick { frame: u64, triangle: usize },
    Resized { width: f32, height: f32 },
    RotationSpeedChanged(f32),
    ZoomChanged(f32),
}

/// What happened during one frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub outcome: PickOutcome,
    pub transition: Option<HighlightTransition>,
}

/// The cube scene plus the interaction state that drives it.
///
/// Input events mutate the interaction state; `step` advances one frame.
/// The stage exclusively owns camera position, rotation, highlight state and
/// the cursor trail.
#[derive(Debug, Clone)]
pub struct Stage {
    config: StageConfig,
    geometry: BoxGeometry,
    materials: MaterialSlots,
    rotation: Rotation,
    camera: PerspectiveCamera,
    mapper: PointerMapper,
    interaction: InteractionState,
    highlighter: Highlighter,
    trail: Option<CursorTrail>,
    frame: u64,
    last_outcome: PickOutcome,
    /// Append-only record of notable changes, drained by the host.
    event_log: Vec<StageEvent>,
}

impl Stage {
    /// Stage with the unit cube.
    pub fn new(config: StageConfig) -> Self {
        Self::with_geometry(config, BoxGeometry::unit())
    }

    /// Stage with caller-supplied geometry. Group problems are logged, not rejected.
    pub fn with_geometry(config: StageConfig, geometry: BoxGeometry) -> Self {
        if let Err(e) = geometry.check_groups() {
            tracing::warn!("cube geometry groups are inconsistent: {e}");
        }

        let interaction = InteractionState {
            rotation_speed: slider::ROTATION_SPEED.clamp(config.rotation_speed),
            zoom: slider::ZOOM.clamp(config.zoom),
            ..InteractionState::default()
        };
        let camera = PerspectiveCamera {
            position: config.camera_position,
            fov: config.fov_degrees.to_radians(),
            aspect: interaction.viewport.aspect(),
            near: config.near,
            far: config.far,
            zoom: interaction.zoom,
        };
        let trail = config
            .variant
            .trail()
            .then(|| CursorTrail::new(&config.trail));

        tracing::info!("stage ready: variant={}", config.variant);

        Self {
            materials: MaterialSlots::uniform(FACE_COUNT, config.default_color),
            highlighter: Highlighter::new(config.default_color, config.hover_color),
            mapper: PointerMapper::new(config.edge_threshold, config.max_offset),
            geometry,
            rotation: Rotation::default(),
            camera,
            interaction,
            trail,
            frame: 0,
            last_outcome: PickOutcome::Miss,
            event_log: Vec::new(),
            config,
        }
    }

    /// Rebuild a stage by feeding it a recorded message sequence.
    pub fn replay(config: StageConfig, messages: &[Message]) -> Self {
        let mut stage = Self::new(config);
        for message in messages {
            stage.dispatch(*message);
        }
        stage
    }

    /// Process one message. Ticks return their frame stats.
    pub fn dispatch(&mut self, message: Message) -> Option<FrameStats> {
        match message {
            Message::Input(event) => {
                self.handle(event);
                None
            }
            Message::Tick => Some(self.step()),
        }
    }

    /// Apply an input event to the interaction state.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                let raw = Vec2::new(x, y);
                let viewport = self.interaction.viewport;
                self.interaction.pointer = self.mapper.sample(raw, &viewport);
                self.interaction.offset_target = self.mapper.edge_offset(raw, &viewport);
                if let Some(trail) = &mut self.trail {
                    trail.push(self.interaction.pointer.ndc);
                }
            }
            InputEvent::PointerLeft => {
                tracing::debug!("pointer left, recentering camera");
                self.interaction.offset_target = Vec2::ZERO;
            }
            InputEvent::Resized { width, height } => {
                let viewport = Viewport::new(width, height);
                self.interaction.viewport = viewport;
                self.camera.aspect = viewport.aspect();
                self.event_log.push(StageEvent::Resized {
                    width: viewport.width(),
                    height: viewport.height(),
                });
            }
            InputEvent::RotationSpeedChanged(value) => {
                let speed = slider::ROTATION_SPEED.clamp(value);
                self.interaction.rotation_speed = speed;
                self.event_log.push(StageEvent::RotationSpeedChanged(speed));
            }
            InputEvent::ZoomChanged(value) => {
                let zoom = slider::ZOOM.clamp(value);
                self.interaction.zoom = zoom;
                self.camera.zoom = zoom;
                self.event_log.push(StageEvent::ZoomChanged(zoom));
            }
        }
    }

    /// Advance one frame: rotate, ease the camera, pick and highlight, fade the trail.
    ///
    /// Rendering and scheduling the next frame are left to the host.
    pub fn step(&mut self) -> FrameStats {
        self.frame += 1;
        let _span = tracing::info_span!("stage_step", frame = self.frame).entered();

        self.rotation.advance(self.interaction.rotation_speed);

        let target = self.config.home().truncate() + self.interaction.offset_target;
        self.camera.smooth_toward(target, self.config.smoothing);

        let outcome = FacePicker::pick_from_camera(
            &self.geometry,
            self.model_matrix(),
            &self.camera,
            self.interaction.pointer.ndc,
        );
        if let PickOutcome::InconsistentGeometry { triangle } = outcome {
            tracing::warn!("triangle {triangle} belongs to no face group, treating as a miss");
            self.event_log.push(StageEvent::InconsistentPick {
                frame: self.frame,
                triangle,
            });
        }

        let transition = self
            .highlighter
            .apply(outcome.material_index(), &mut self.materials);
        if let Some(transition) = transition {
            self.event_log.push(StageEvent::Highlight {
                frame: self.frame,
                transition,
            });
        }

        if let Some(trail) = &mut self.trail {
            trail.advance();
        }

        self.last_outcome = outcome;
        FrameStats {
            frame: self.frame,
            outcome,
            transition,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    pub fn materials(&self) -> &MaterialSlots {
        &self.materials
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Object-to-world transform of the cube.
    pub fn model_matrix(&self) -> Mat4 {
        self.rotation.matrix()
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Where the camera is heading this frame.
    pub fn camera_target(&self) -> Vec3 {
        self.config.home() + self.interaction.offset_target.extend(0.0)
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn highlight_state(&self) -> HighlightState {
        self.highlighter.state()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.highlighter.hovered()
    }

    pub fn trail(&self) -> Option<&CursorTrail> {
        self.trail.as_ref()
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_outcome(&self) -> PickOutcome {
        self.last_outcome
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.event_log)
    }
}
