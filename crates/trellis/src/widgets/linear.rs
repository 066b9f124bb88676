use crate::{
    Context, NodeId,
    error::Result,
    event::PointerState,
    geom::{Axis, Expanse, Point, Rect},
    layout::{DragAxes, Layout, Wrap},
    widget::{EventOutcome, Widget},
};

/// A container that lays its children out one after another along an axis.
///
/// When the box stretches on either axis, every child is offered an equal
/// share of the layout axis and the whole cross axis. When it shrink-wraps
/// on both, children are offered the full draw size; a vertical box measures
/// children that stretch across it last, against the widest of the others.
pub struct LinearBox {
    /// Layout axis.
    axis: Axis,
    /// Initial layout.
    layout: Layout,
}

impl LinearBox {
    /// A top-to-bottom list.
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            layout: Layout::shrink(),
        }
    }

    /// A left-to-right list.
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            layout: Layout::shrink(),
        }
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Layout axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

/// Running totals of child borders along and across the layout axis.
#[derive(Default)]
struct Extent {
    /// Sum of lengths along the axis.
    along: f32,
    /// Largest length across the axis.
    across: f32,
}

impl Extent {
    /// Fold in one child border.
    fn add(&mut self, axis: Axis, border: Expanse) {
        self.along += border.get(axis);
        self.across = self.across.max(border.get(axis.cross()));
    }
}

impl Widget for LinearBox {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn measure(&mut self, draw: Expanse, ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        let children = ctx.children();
        let axis = self.axis;
        let cross = axis.cross();
        let mut extent = Extent::default();

        if !ctx.layout().is_shrink() {
            let share = draw.get(axis) / children.len().max(1) as f32;
            let avail = Expanse::along(axis, share, draw.get(cross));
            for child in &children {
                extent.add(axis, ctx.measure_child(*child, avail)?);
            }
        } else if axis == Axis::Vertical {
            let mut deferred: Vec<NodeId> = Vec::new();
            for child in &children {
                let stretches_across = ctx
                    .layout_of(*child)
                    .is_some_and(|l| l.wrap(cross) == Wrap::StretchParent);
                if stretches_across {
                    deferred.push(*child);
                } else {
                    extent.add(axis, ctx.measure_child(*child, draw)?);
                }
            }
            let budget = Expanse::along(axis, draw.get(axis), extent.across);
            for child in deferred {
                extent.add(axis, ctx.measure_child(child, budget)?);
            }
        } else {
            for child in &children {
                extent.add(axis, ctx.measure_child(*child, draw)?);
            }
        }
        Ok(Some(Expanse::along(axis, extent.along, extent.across)))
    }

    fn position_children(
        &mut self,
        draw: Rect,
        drag: DragAxes,
        ctx: &mut dyn Context,
    ) -> Result<()> {
        let axis = self.axis;
        let cross = axis.cross();
        let mut cursor = draw.start(axis);
        for child in ctx.children() {
            let len = ctx.border_of(child).map_or(0.0, |b| b.len(axis));
            let anchor = ctx.layout_of(child).unwrap_or_default().anchor;
            let mut p = Point::zero();
            p.set(axis, cursor + anchor.fraction(axis) * len);
            p.set(
                cross,
                draw.start(cross) + anchor.fraction(cross) * draw.len(cross),
            );
            ctx.position_child(child, p, drag)?;
            cursor += len;
        }
        Ok(())
    }

    fn on_click(
        &mut self,
        state: PointerState,
        p: Point,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        for child in ctx.children() {
            if ctx.click_child(child, state, p)? == EventOutcome::Consume {
                break;
            }
        }
        Ok(EventOutcome::Consume)
    }
}
