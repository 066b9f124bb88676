use super::{Axis, Expanse, Point};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Construct a rectangle from an origin and a size.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.tl.x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.tl.y
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.tl.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.tl.y + self.h
    }

    /// The size of this rectangle.
    pub fn size(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Leading edge along an axis.
    pub fn start(&self, axis: Axis) -> f32 {
        self.tl.get(axis)
    }

    /// Trailing edge along an axis.
    pub fn end(&self, axis: Axis) -> f32 {
        self.start(axis) + self.len(axis)
    }

    /// Extent along an axis.
    pub fn len(&self, axis: Axis) -> f32 {
        self.size().get(axis)
    }

    /// Does this rect have a zero (or negative) size?
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Does this rectangle contain the point? Edges are inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// Does this rectangle contain the point? Edges are inclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Does this rectangle completely enclose the other? Empty rectangles are
    /// enclosed by everything.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.is_empty()
            || (other.left() >= self.left()
                && other.top() >= self.top()
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    /// The overlapping part of two rectangles. Disjoint rectangles produce an
    /// empty rectangle.
    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    /// Shrink the rectangle by `dx` on the left and right and `dy` on the top
    /// and bottom. The size never goes negative.
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.tl.x + dx,
            self.tl.y + dy,
            (self.w - 2.0 * dx).max(0.0),
            (self.h - 2.0 * dy).max(0.0),
        )
    }

    /// Move the rectangle by an offset.
    pub fn shift(&self, d: Point) -> Self {
        Self {
            tl: self.tl + d,
            w: self.w,
            h: self.h,
        }
    }
}
