use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// An integer grid cell on the canvas.
///
/// Device-space positions are [`Pos2`] and only become a `Point` through an
/// explicit divide-by-zoom conversion; the two spaces are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a device-space position to the grid cell under it.
    pub fn from_device(pos: Pos2, zoom: f32) -> Self {
        Self {
            x: (pos.x / zoom).floor() as i32,
            y: (pos.y / zoom).floor() as i32,
        }
    }
}

/// An insertion-ordered set of grid points with LIFO pop semantics.
///
/// Used as the flood-fill frontier. Membership is a linear scan: fill
/// regions are bounded by the canvas size, so a hash set buys nothing here.
#[derive(Debug, Default, Clone)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut set = Self::new();
        for &p in points {
            set.add(p);
        }
        set
    }

    /// Add a point unless an equal one is already present.
    pub fn add(&mut self, point: Point) {
        if !self.points.contains(&point) {
            self.points.push(point);
        }
    }

    /// Remove and return the most recently added point.
    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Tuning knobs for gesture interpretation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Device-units of pinch travel per unit of scale change.
    pub spread_sensitivity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            spread_sensitivity: 100.0,
        }
    }
}

/// Pan and pinch deltas between two touch snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSpread {
    pub pan: Vec2,
    /// Dimensionless zoom multiplier relative to gesture start; 1.0 means
    /// the fingers have not spread.
    pub spread: f32,
}

/// Arithmetic mean of all touch positions. One touch returns that touch;
/// no touches return the origin.
pub fn midpoint(touches: &[Pos2]) -> Pos2 {
    if touches.is_empty() {
        return Pos2::ZERO;
    }
    let sum = touches
        .iter()
        .fold(Vec2::ZERO, |acc, touch| acc + touch.to_vec2());
    (sum / touches.len() as f32).to_pos2()
}

/// Euclidean distance between the first two touches. Fewer than two
/// touches yield 0, and touches beyond the second are ignored since the
/// engine supports exactly two-finger pinch semantics.
pub fn distance(touches: &[Pos2]) -> f32 {
    match touches {
        [first, second, ..] => (*second - *first).length(),
        _ => 0.0,
    }
}

/// Compute the pan vector and pinch spread between the touch set captured
/// at gesture start and the current one.
pub fn pan_and_spread(config: &GestureConfig, initial: &[Pos2], current: &[Pos2]) -> PanSpread {
    let pan = midpoint(current) - midpoint(initial);
    let spread = (distance(current) - distance(initial)) / config.spread_sensitivity + 1.0;
    PanSpread { pan, spread }
}
