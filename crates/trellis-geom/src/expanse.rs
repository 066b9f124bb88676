use super::{Axis, Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// This is useful when we want to deal with `Rect`s abstractly, or when we want
/// to mandate that the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Expanse {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// A zero-sized expanse.
    pub fn zero() -> Self {
        Self { w: 0.0, h: 0.0 }
    }

    /// The extent along one axis.
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Set the extent along one axis.
    pub fn set(&mut self, axis: Axis, v: f32) {
        match axis {
            Axis::Horizontal => self.w = v,
            Axis::Vertical => self.h = v,
        }
    }

    /// Build an expanse from a length along `axis` and a length across it.
    pub fn along(axis: Axis, main: f32, cross: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Clamp negative dimensions to zero.
    pub fn non_negative(&self) -> Self {
        Self {
            w: self.w.max(0.0),
            h: self.h.max(0.0),
        }
    }

    /// The area of this expanse.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f32 {
        self.w.hypot(self.h)
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this Size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f32, f32)> for Expanse {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
