use facehover_common::Color;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Largest number of points a trail will keep.
pub const MAX_TRAIL_CAPACITY: usize = 4096;

/// Cursor trail settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Maximum number of points kept.
    pub capacity: usize,
    /// Alpha lost by every point on each frame.
    pub fade_per_tick: f32,
    pub color: Color,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 48,
            fade_per_tick: 0.05,
            color: Color::WHITE,
        }
    }
}

/// One remembered pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub ndc: Vec2,
    pub alpha: f32,
}

/// Bounded pointer history whose points fade out over successive frames.
#[derive(Debug, Clone)]
pub struct CursorTrail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    fade_per_tick: f32,
}

impl CursorTrail {
    /// Capacity is clamped to [`MAX_TRAIL_CAPACITY`].
    pub fn new(config: &TrailConfig) -> Self {
        let capacity = config.capacity.min(MAX_TRAIL_CAPACITY);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            fade_per_tick: config.fade_per_tick,
        }
    }

    /// Record a pointer position at full opacity, dropping the oldest point when full.
    pub fn push(&mut self, ndc: Vec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint { ndc, alpha: 1.0 });
    }

    /// Fade every point by one frame and forget the ones that became invisible.
    pub fn advance(&mut self) {
        for point in &mut self.points {
            point.alpha -= self.fade_per_tick;
        }
        self.points.retain(|point| point.alpha > 0.0);
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(capacity: usize, fade: f32) -> CursorTrail {
        CursorTrail::new(&TrailConfig {
            capacity,
            fade_per_tick: fade,
            ..TrailConfig::default()
        })
    }

    #[test]
    fn push_starts_opaque() {
        let mut t = trail(4, 0.25);
        t.push(Vec2::new(0.5, 0.5));
        let p = t.points().next().unwrap();
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.ndc, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut t = trail(3, 0.1);
        for i in 0..5 {
            t.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(t.len(), 3);
        let xs: Vec<f32> = t.points().map(|p| p.ndc.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn points_fade_and_expire() {
        let mut t = trail(8, 0.25);
        t.push(Vec2::ZERO);
        t.advance();
        assert_eq!(t.points().next().unwrap().alpha, 0.75);
        t.push(Vec2::ONE);
        t.advance();
        t.advance();
        t.advance();
        // first point reached zero, second is at 0.25
        assert_eq!(t.len(), 1);
        assert_eq!(t.points().next().unwrap().ndc, Vec2::ONE);
        t.advance();
        assert!(t.is_empty());
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut t = trail(0, 0.1);
        t.push(Vec2::ZERO);
        assert!(t.is_empty());
    }

    #[test]
    fn oversized_capacity_is_clamped() {
        let mut t = trail(usize::MAX, 0.1);
        assert_eq!(t.capacity(), MAX_TRAIL_CAPACITY);
        for i in 0..MAX_TRAIL_CAPACITY + 10 {
            t.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(t.len(), MAX_TRAIL_CAPACITY);
    }
}
