use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8 bits per channel.
///
/// Serialized as a `#rrggbb` string so configuration files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Errors from parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have exactly six hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    pub const BLACK: Self = Self::from_hex(0x000000);
    pub const WHITE: Self = Self::from_hex(0xffffff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Linear-light RGBA, suitable for an sRGB render target.
    pub fn to_linear_rgba(self, alpha: f32) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            alpha,
        ]
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        // from_str_radix would accept a leading '+'
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let hex =
            u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
        Ok(Self::from_hex(hex))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Drawable area in physical pixels. Never zero-sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel position as a fraction of the viewport, `(0, 0)` at the top-left.
    pub fn fraction(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(pixel.x / self.width, pixel.y / self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Euler rotation of the cube in radians, applied X then Y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    /// Advance both axes by the same angle.
    pub fn advance(&mut self, angle: f32) {
        self.x += angle;
        self.y += angle;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(glam::EulerRot::XYZ, self.x, self.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex(0x00ff00);
        assert_eq!(c, Color::new(0, 255, 0));
        assert_eq!(c.to_hex(), 0x00ff00);
        assert_eq!(c.to_string(), "#00ff00");
    }

    #[test]
    fn color_parse_errors() {
        assert!(matches!(
            "00ff00".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#0f0".parse::<Color>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#00gg00".parse::<Color>(),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn color_serializes_as_string() {
        let json = serde_json::to_string(&Color::from_hex(0xff0000)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str("\"#808080\"").unwrap();
        assert_eq!(back, Color::from_hex(0x808080));
    }

    #[test]
    fn linear_conversion_keeps_primaries() {
        let [r, g, b, a] = Color::from_hex(0xff0000).to_linear_rgba(1.0);
        assert_eq!((r, g, b, a), (1.0, 0.0, 0.0, 1.0));
        let [grey, ..] = Color::from_hex(0x808080).to_linear_rgba(1.0);
        assert!(grey > 0.21 && grey < 0.22);
    }

    #[test]
    fn viewport_never_zero() {
        let v = Viewport::new(0.0, 0.0);
        assert_eq!(v.width(), 1.0);
        assert_eq!(v.height(), 1.0);
        assert_eq!(v.aspect(), 1.0);
    }

    #[test]
    fn rotation_advances_both_axes() {
        let mut r = Rotation::default();
        r.advance(0.05);
        assert_eq!(r, Rotation { x: 0.05, y: 0.05 });
    }
}
