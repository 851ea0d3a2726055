use std::ops::RangeInclusive;

/// Bounds, step and starting value of a slider control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub initial: f32,
}

/// Rotation speed in radians per frame.
pub const ROTATION_SPEED: SliderRange = SliderRange {
    min: 0.001,
    max: 0.08,
    step: 0.001,
    initial: 0.01,
};

/// Camera zoom factor.
pub const ZOOM: SliderRange = SliderRange {
    min: 0.05,
    max: 5.0,
    step: 0.01,
    initial: 1.0,
};

impl SliderRange {
    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    /// Clamp a value into the slider's bounds. NaN falls back to the initial value.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.initial;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        self.range().contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_values_in_range() {
        assert!(ROTATION_SPEED.contains(ROTATION_SPEED.initial));
        assert!(ZOOM.contains(ZOOM.initial));
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(ROTATION_SPEED.clamp(1.0), 0.08);
        assert_eq!(ROTATION_SPEED.clamp(0.0), 0.001);
        assert_eq!(ROTATION_SPEED.clamp(0.05), 0.05);
        assert_eq!(ZOOM.clamp(f32::NAN), 1.0);
        assert_eq!(ZOOM.clamp(f32::INFINITY), 5.0);
    }
}
