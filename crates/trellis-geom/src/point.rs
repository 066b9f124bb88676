use std::ops::{Add, Sub};

use super::Axis;

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        (0.0, 0.0).into()
    }

    /// Are both coordinates zero?
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// The coordinate along one axis.
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Set the coordinate along one axis.
    pub fn set(&mut self, axis: Axis, v: f32) {
        match axis {
            Axis::Horizontal => self.x = v,
            Axis::Vertical => self.y = v,
        }
    }

    /// Distance from the origin, treating the point as a vector.
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiply both coordinates by a scalar.
    pub fn scale(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add() {
        assert_eq!(Point::zero() + (1.0, 1.0).into(), (1.0, 1.0).into());
        assert_eq!(Point::zero() + (1.0, 0.0).into(), (1.0, 0.0).into());
        assert_eq!(Point::new(3.0, 4.0) - Point::new(1.0, 1.0), (2.0, 3.0).into());
        assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
    }
}
