//! 2-D canvas coordinates and straight-line movement.
//!
//! Positions exist only so a renderer can draw passengers; the movement
//! model uses them for the "has the passenger reached the zone" test and
//! nothing else.

/// A point on the terminal floor plan, in canvas units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move towards `target` by at most `max_step` units.
    ///
    /// Never overshoots: when `target` is closer than `max_step` the result is
    /// exactly `target`.
    pub fn step_towards(self, target: Point, max_step: f32) -> Point {
        let dist = self.distance(target);
        if dist <= max_step || dist == 0.0 {
            return target;
        }
        let scale = max_step / dist;
        Point {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
        }
    }

    /// `true` if both coordinates are finite (no NaN / ±∞).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
