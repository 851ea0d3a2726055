use facehover_common::Color;
use facehover_input::{MAX_TRAIL_CAPACITY, TrailConfig, slider};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Errors from loading or validating a stage configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("unknown variant {0:?} (expected basic, lit or trail)")]
    UnknownVariant(String),
}

/// Which incremental version of the demo to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Flat colors, wireframe, hover highlight.
    #[default]
    Basic,
    /// Adds directional lighting, a ground plane and the cube's shadow.
    Lit,
    /// Adds the fading cursor trail on top of `Lit`.
    Trail,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Basic, Variant::Lit, Variant::Trail];

    pub fn lighting(self) -> bool {
        matches!(self, Self::Lit | Self::Trail)
    }

    pub fn trail(self) -> bool {
        matches!(self, Self::Trail)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Lit => "lit",
            Self::Trail => "trail",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}

/// Light, ground and shadow settings for the lit variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction pointing toward the light.
    pub direction: Vec3,
    /// Fraction of the base color visible on unlit faces.
    pub ambient: f32,
    /// Y coordinate of the ground plane.
    pub ground_height: f32,
    /// Edge length of the square ground plane.
    pub ground_size: f32,
    pub ground_color: Color,
    pub shadow_color: Color,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(2.0, 5.0, 3.0),
            ambient: 0.35,
            ground_height: -1.2,
            ground_size: 12.0,
            ground_color: Color::from_hex(0x6e6e6e),
            shadow_color: Color::from_hex(0x3a3a3a),
        }
    }
}

/// Everything the stage needs besides live input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub variant: Variant,
    /// Fraction of the remaining camera offset covered each frame.
    pub smoothing: f32,
    /// Width of the edge-panning band as a fraction of the viewport.
    pub edge_threshold: f32,
    /// Camera offset at the very edge of the viewport.
    pub max_offset: f32,
    /// Camera rest position.
    pub camera_position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub default_color: Color,
    pub hover_color: Color,
    pub wire_color: Color,
    pub background: Color,
    /// Starting rotation speed, radians per frame.
    pub rotation_speed: f32,
    /// Starting zoom.
    pub zoom: f32,
    pub lighting: LightingConfig,
    pub trail: TrailConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            smoothing: 0.1,
            edge_threshold: 0.1,
            max_offset: 0.3,
            camera_position: Vec3::new(0.0, 0.0, 4.0),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            default_color: Color::from_hex(0x00ff00),
            hover_color: Color::from_hex(0xff0000),
            wire_color: Color::BLACK,
            background: Color::from_hex(0x808080),
            rotation_speed: slider::ROTATION_SPEED.initial,
            zoom: slider::ZOOM.initial,
            lighting: LightingConfig::default(),
            trail: TrailConfig::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl StageConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, otherwise the defaults, then apply a variant override.
    pub fn resolve(path: Option<&Path>, variant: Option<Variant>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(variant) = variant {
            config.variant = variant;
        }
        Ok(config)
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(invalid("smoothing", "must be in (0, 1]"));
        }
        if !(0.0..=0.5).contains(&self.edge_threshold) {
            return Err(invalid("edge_threshold", "must be in [0, 0.5]"));
        }
        if !(self.max_offset.is_finite() && self.max_offset >= 0.0) {
            return Err(invalid("max_offset", "must be a non-negative number"));
        }
        if !self.camera_position.is_finite() {
            return Err(invalid("camera_position", "must be finite"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("fov_degrees", "must be in (0, 180)"));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(invalid("near/far", "need 0 < near < far"));
        }
        if !slider::ROTATION_SPEED.contains(self.rotation_speed) {
            return Err(invalid(
                "rotation_speed",
                format!(
                    "must be in [{}, {}]",
                    slider::ROTATION_SPEED.min,
                    slider::ROTATION_SPEED.max
                ),
            ));
        }
        if !slider::ZOOM.contains(self.zoom) {
            return Err(invalid(
                "zoom",
                format!("must be in [{}, {}]", slider::ZOOM.min, slider::ZOOM.max),
            ));
        }
        if !(0.0..=1.0).contains(&self.lighting.ambient) {
            return Err(invalid("lighting.ambient", "must be in [0, 1]"));
        }
        if !self.lighting.direction.is_finite() {
            return Err(invalid("lighting.direction", "must be finite"));
        }
        if self.lighting.direction.length_squared() <= f32::EPSILON {
            return Err(invalid("lighting.direction", "must not be zero"));
        }
        if self.lighting.direction.y <= 0.0 {
            return Err(invalid("lighting.direction", "light must shine from above"));
        }
        if !self.lighting.ground_height.is_finite() {
            return Err(invalid("lighting.ground_height", "must be finite"));
        }
        if !(self.lighting.ground_size.is_finite() && self.lighting.ground_size > 0.0) {
            return Err(invalid("lighting.ground_size", "must be a positive number"));
        }
        if !(self.trail.fade_per_tick.is_finite() && self.trail.fade_per_tick > 0.0) {
            return Err(invalid("trail.fade_per_tick", "must be positive"));
        }
        if !(1..=MAX_TRAIL_CAPACITY).contains(&self.trail.capacity) {
            return Err(invalid(
                "trail.capacity",
                format!("must be in [1, {MAX_TRAIL_CAPACITY}]"),
            ));
        }
        Ok(())
    }

    /// Rest position of the camera.
    pub fn home(&self) -> Vec3 {
        self.camera_position
    }
}
