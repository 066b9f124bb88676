//! Per-node layout descriptors.
//!
//! A [`Layout`] tells the engine how a node negotiates its size with its
//! parent on each axis, which point of its border rectangle its position
//! designates, and how far its content is inset from its border.

use crate::geom::{Axis, Expanse, Point, Rect};

/// Which point of a rectangle a position designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Middle of the top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    Left,
    /// Centre.
    Center,
    /// Middle of the right edge.
    Right,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    Bottom,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Position of the anchor along an axis as a fraction of the extent: 0
    /// for the leading edge, 0.5 for the middle, 1 for the trailing edge.
    pub fn fraction(self, axis: Axis) -> f32 {
        let (h, v) = match self {
            Self::TopLeft => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Left => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Right => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        };
        match axis {
            Axis::Horizontal => h,
            Axis::Vertical => v,
        }
    }

    /// The top-left corner of a box of `size` whose anchor point sits at `p`.
    pub fn origin(self, p: Point, size: Expanse) -> Point {
        Point::new(
            p.x - self.fraction(Axis::Horizontal) * size.w,
            p.y - self.fraction(Axis::Vertical) * size.h,
        )
    }

    /// The point of `rect` this anchor designates.
    pub fn point_in(self, rect: Rect) -> Point {
        Point::new(
            rect.left() + self.fraction(Axis::Horizontal) * rect.w,
            rect.top() + self.fraction(Axis::Vertical) * rect.h,
        )
    }
}

/// Text size tiers. Each is a multiple of the device's base text unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextTier {
    /// Half a text unit.
    Tiny,
    /// Three quarters of a text unit.
    Small,
    /// One text unit.
    #[default]
    Normal,
    /// One and a half text units.
    Large,
    /// Two text units.
    Huge,
}

impl TextTier {
    /// Multiplier applied to the base text unit.
    pub fn factor(self) -> f32 {
        match self {
            Self::Tiny => 0.5,
            Self::Small => 0.75,
            Self::Normal => 1.0,
            Self::Large => 1.5,
            Self::Huge => 2.0,
        }
    }
}

/// Which font metric a text-relative size follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextMetric {
    /// Line height.
    #[default]
    Height,
    /// Average glyph width: line height times the font's glyph aspect.
    Width,
}

/// Per-axis sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    /// Sized by content.
    #[default]
    Shrink,
    /// A share of the space offered by the parent, times the stretch factor.
    StretchParent,
    /// A multiple of a text metric at the given tier, times the stretch factor.
    StretchText(TextTier, TextMetric),
}

impl Wrap {
    /// Is this the shrink-to-content policy?
    pub fn is_shrink(self) -> bool {
        matches!(self, Self::Shrink)
    }
}

/// Border inset tiers, converted to pixels through the text unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InsetTier {
    /// No inset.
    #[default]
    None,
    /// An eighth of a text unit.
    Small,
    /// A quarter of a text unit.
    Medium,
    /// Half a text unit.
    Large,
}

impl InsetTier {
    /// Multiplier applied to the base text unit.
    pub fn factor(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Small => 0.125,
            Self::Medium => 0.25,
            Self::Large => 0.5,
        }
    }
}

/// Layout configuration for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Which point of the border rect the node's position designates.
    pub anchor: Anchor,
    /// Horizontal sizing policy.
    pub wrap_x: Wrap,
    /// Vertical sizing policy.
    pub wrap_y: Wrap,
    /// Horizontal stretch factor. Must be zero when `wrap_x` is `Shrink`.
    pub stretch_x: f32,
    /// Vertical stretch factor. Must be zero when `wrap_y` is `Shrink`.
    pub stretch_y: f32,
    /// Left and right border inset.
    pub inset_x: InsetTier,
    /// Top and bottom border inset.
    pub inset_y: InsetTier,
}

impl Default for Layout {
    fn default() -> Self {
        Self::shrink()
    }
}

impl Layout {
    /// Shrink-wrap both axes.
    pub fn shrink() -> Self {
        Self {
            anchor: Anchor::TopLeft,
            wrap_x: Wrap::Shrink,
            wrap_y: Wrap::Shrink,
            stretch_x: 0.0,
            stretch_y: 0.0,
            inset_x: InsetTier::None,
            inset_y: InsetTier::None,
        }
    }

    /// Take all of the space offered by the parent on both axes.
    pub fn fill() -> Self {
        Self::shrink().stretch_horizontal(1.0).stretch_vertical(1.0)
    }

    /// Stretch horizontally to a share of the parent.
    pub fn stretch_horizontal(self, factor: f32) -> Self {
        self.with_wrap(Axis::Horizontal, Wrap::StretchParent, factor)
    }

    /// Stretch vertically to a share of the parent.
    pub fn stretch_vertical(self, factor: f32) -> Self {
        self.with_wrap(Axis::Vertical, Wrap::StretchParent, factor)
    }

    /// Shrink-wrap horizontally.
    pub fn shrink_horizontal(self) -> Self {
        self.with_wrap(Axis::Horizontal, Wrap::Shrink, 0.0)
    }

    /// Shrink-wrap vertically.
    pub fn shrink_vertical(self) -> Self {
        self.with_wrap(Axis::Vertical, Wrap::Shrink, 0.0)
    }

    /// Size horizontally by a text metric.
    pub fn text_horizontal(self, tier: TextTier, metric: TextMetric, factor: f32) -> Self {
        self.with_wrap(Axis::Horizontal, Wrap::StretchText(tier, metric), factor)
    }

    /// Size vertically by a text metric.
    pub fn text_vertical(self, tier: TextTier, metric: TextMetric, factor: f32) -> Self {
        self.with_wrap(Axis::Vertical, Wrap::StretchText(tier, metric), factor)
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set both inset tiers.
    pub fn insets(mut self, x: InsetTier, y: InsetTier) -> Self {
        self.inset_x = x;
        self.inset_y = y;
        self
    }

    /// Set the policy and stretch factor for one axis. Shrink always gets a
    /// zero factor.
    pub fn with_wrap(mut self, axis: Axis, wrap: Wrap, factor: f32) -> Self {
        let factor = if wrap.is_shrink() { 0.0 } else { factor };
        match axis {
            Axis::Horizontal => {
                self.wrap_x = wrap;
                self.stretch_x = factor;
            }
            Axis::Vertical => {
                self.wrap_y = wrap;
                self.stretch_y = factor;
            }
        }
        self
    }

    /// Sizing policy on an axis.
    pub fn wrap(&self, axis: Axis) -> Wrap {
        match axis {
            Axis::Horizontal => self.wrap_x,
            Axis::Vertical => self.wrap_y,
        }
    }

    /// Stretch factor on an axis.
    pub fn stretch(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.stretch_x,
            Axis::Vertical => self.stretch_y,
        }
    }

    /// Inset tier on an axis.
    pub fn inset(&self, axis: Axis) -> InsetTier {
        match axis {
            Axis::Horizontal => self.inset_x,
            Axis::Vertical => self.inset_y,
        }
    }

    /// Is the node shrink-wrapped on both axes?
    pub fn is_shrink(&self) -> bool {
        self.wrap_x.is_shrink() && self.wrap_y.is_shrink()
    }

    /// Does the layout satisfy the shrink/stretch contract?
    pub fn is_valid(&self) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| !self.wrap(axis).is_shrink() || self.stretch(axis) == 0.0)
    }

    /// Panic if the layout pairs a shrink axis with a nonzero stretch factor.
    /// A layout like that is a construction bug, not a runtime condition.
    pub fn assert_valid(&self) {
        assert!(
            self.is_valid(),
            "shrink-wrapped axis with nonzero stretch factor: {self:?}"
        );
    }
}

/// Per-axis flags saying whether a drag offset may still be applied. A node
/// that applies its offset on an axis clears the flag for its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragAxes {
    /// Horizontal drag still unclaimed.
    pub x: bool,
    /// Vertical drag still unclaimed.
    pub y: bool,
}

impl DragAxes {
    /// Both axes enabled.
    pub fn both() -> Self {
        Self { x: true, y: true }
    }

    /// Both axes disabled.
    pub fn none() -> Self {
        Self { x: false, y: false }
    }

    /// Flag for one axis.
    pub fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Clear the flag for one axis.
    pub fn clear(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => self.x = false,
            Axis::Vertical => self.y = false,
        }
    }
}
