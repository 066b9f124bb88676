//! The two-phase layout algorithm.
//!
//! `measure` runs bottom-up and fixes the size of every border and draw
//! rect. `position` then runs top-down, fixing origins from anchor points,
//! applying stored drag offsets on overflowing shrink-wrapped axes, and
//! propagating clip rects.

use tracing::trace;

use super::{context::CoreContext, id::NodeId, world::Core};
use crate::{
    error::{Error, Result},
    geom::{Axis, Expanse, Point, Rect},
    layout::{DragAxes, Wrap},
};

/// A single measure or position walk over part of the tree.
pub struct LayoutPass<'a> {
    /// Core state being updated.
    core: &'a mut Core,
}

impl<'a> LayoutPass<'a> {
    /// Start a pass.
    pub fn new(core: &'a mut Core) -> Self {
        Self { core }
    }

    /// Size a node against an available size. Returns the border size and
    /// leaves both the border and draw sizes on the node. The origins are
    /// left for [`position`](Self::position) to fix.
    pub fn measure(&mut self, id: NodeId, avail: Expanse) -> Result<Expanse> {
        let node = self.core.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        let layout = node.layout;
        let inset = Expanse::new(
            self.core.inset_px(layout.inset_x),
            self.core.inset_px(layout.inset_y),
        );
        let aspect = self.core.with_widget_mut(id, |w, _| w.aspect())?;

        let mut draw = Expanse::zero();
        for axis in Axis::ALL {
            let len = match layout.wrap(axis) {
                Wrap::Shrink => avail.get(axis) - 2.0 * inset.get(axis),
                Wrap::StretchParent => {
                    avail.get(axis) * layout.stretch(axis) - 2.0 * inset.get(axis)
                }
                Wrap::StretchText(tier, metric) => {
                    let len = self.core.unit(tier, metric) * layout.stretch(axis);
                    match (axis, aspect) {
                        (Axis::Horizontal, Some(aspect)) => len * aspect,
                        _ => len,
                    }
                }
            };
            draw.set(axis, len);
        }
        let mut draw = draw.non_negative();

        let content = self.core.with_widget_mut(id, |w, core| {
            let mut ctx = CoreContext::new(core, id);
            w.reflow(draw, &mut ctx)?;
            w.measure(draw, &mut ctx)
        })??;
        if let Some(content) = content {
            for axis in Axis::ALL {
                if layout.wrap(axis).is_shrink() {
                    draw.set(axis, content.get(axis).max(0.0));
                }
            }
        }

        let border = Expanse::new(draw.w + 2.0 * inset.w, draw.h + 2.0 * inset.h);
        let node = self.core.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        node.border = Rect::at(node.border.tl, border);
        node.draw = Rect::at(node.draw.tl, draw);
        trace!(?id, ?avail, ?border, "measure");
        Ok(border)
    }

    /// Place a measured node so that its anchor lands on `point`, then
    /// position its children against its clip.
    ///
    /// On a shrink-wrapped axis that overflows `parent_clip`, the stored drag
    /// offset moves the node, clamped so that it never exposes space beyond
    /// either end of its content. Whatever is clamped away is taken back out
    /// of the stored offset, and the axis is closed to drag for descendants.
    pub fn position(
        &mut self,
        id: NodeId,
        point: Point,
        parent_clip: Rect,
        drag: DragAxes,
    ) -> Result<()> {
        let inset = {
            let layout = self
                .core
                .nodes
                .get(id)
                .ok_or(Error::NodeNotFound(id))?
                .layout;
            Point::new(
                self.core.inset_px(layout.inset_x),
                self.core.inset_px(layout.inset_y),
            )
        };
        let node = self.core.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let layout = node.layout;
        let size = node.border.size();
        let mut origin = layout.anchor.origin(point, size);
        let mut child_drag = drag;

        for axis in Axis::ALL {
            if !layout.wrap(axis).is_shrink() {
                continue;
            }
            let len = size.get(axis);
            if len <= parent_clip.len(axis) {
                node.offset.set(axis, 0.0);
                continue;
            }
            if !drag.get(axis) {
                continue;
            }
            let wanted = origin.get(axis) + node.offset.get(axis);
            let lo = parent_clip.end(axis) - len;
            let hi = parent_clip.start(axis);
            let placed = wanted.clamp(lo, hi);
            node.offset
                .set(axis, node.offset.get(axis) - (wanted - placed));
            origin.set(axis, placed);
            child_drag.clear(axis);
        }

        node.border = Rect::at(origin, size);
        node.draw = Rect::at(origin + inset, node.draw.size());
        node.bounds = parent_clip;
        node.clip = node.draw.intersect(&parent_clip);
        let draw = node.draw;
        trace!(?id, border = ?node.border, clip = ?node.clip, "position");

        self.core.with_widget_mut(id, |w, core| {
            let mut ctx = CoreContext::new(core, id);
            w.position_children(draw, child_drag, &mut ctx)
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::Expanse,
        layout::{Anchor, InsetTier, Layout, TextMetric, TextTier},
        metrics::DeviceMetrics,
        testing::{FixedFont, Tracker},
        widgets::Fill,
    };

    fn core() -> Core {
        // Text unit of 10px.
        Core::new(DeviceMetrics::new(200.0, 100.0), Box::new(FixedFont::new(10.0)))
    }

    #[test]
    fn stretch_parent_subtracts_insets() -> Result<()> {
        let mut c = core();
        let id = c.add(
            Fill::new().with_layout(
                Layout::fill()
                    .stretch_horizontal(0.5)
                    .insets(InsetTier::Large, InsetTier::Small),
            ),
        );
        let border = LayoutPass::new(&mut c).measure(id, Expanse::new(200.0, 100.0))?;
        assert_eq!(border, Expanse::new(100.0, 100.0));
        let node = c.node(id).ok_or(Error::NodeNotFound(id))?;
        assert_eq!(node.draw_rect().size(), Expanse::new(90.0, 97.5));
        Ok(())
    }

    #[test]
    fn stretch_text_adds_insets_and_aspect() -> Result<()> {
        let mut c = core();
        let id = c.add(
            Fill::new().with_aspect(2.0).with_layout(
                Layout::shrink()
                    .text_horizontal(TextTier::Large, TextMetric::Height, 2.0)
                    .text_vertical(TextTier::Normal, TextMetric::Width, 4.0)
                    .insets(InsetTier::Medium, InsetTier::None),
            ),
        );
        let border = LayoutPass::new(&mut c).measure(id, Expanse::new(1.0, 1.0))?;
        // 15 * 2 * 2 + 2 * 2.5 wide, 5 * 4 high.
        assert_eq!(border, Expanse::new(65.0, 20.0));
        Ok(())
    }

    #[test]
    fn shrink_takes_content_size() -> Result<()> {
        let mut c = core();
        let id = c.add(
            Tracker::new(30.0, 12.0)
                .with_layout(Layout::shrink().insets(InsetTier::Small, InsetTier::Small)),
        );
        let border = LayoutPass::new(&mut c).measure(id, Expanse::new(200.0, 100.0))?;
        assert_eq!(border, Expanse::new(32.5, 14.5));
        Ok(())
    }

    #[test]
    fn negative_draw_clamps() -> Result<()> {
        let mut c = core();
        let id = c.add(
            Fill::new().with_layout(Layout::fill().insets(InsetTier::Large, InsetTier::Large)),
        );
        let border = LayoutPass::new(&mut c).measure(id, Expanse::zero())?;
        let node = c.node(id).ok_or(Error::NodeNotFound(id))?;
        assert_eq!(node.draw_rect().size(), Expanse::zero());
        assert_eq!(border, Expanse::new(10.0, 10.0));
        Ok(())
    }

    #[test]
    fn anchor_places_border() -> Result<()> {
        let mut c = core();
        let id = c.add(Tracker::new(20.0, 10.0).with_layout(Layout::shrink().anchor(Anchor::Center)));
        let clip = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut pass = LayoutPass::new(&mut c);
        pass.measure(id, clip.size())?;
        pass.position(id, Point::new(100.0, 50.0), clip, DragAxes::both())?;
        let node = c.node(id).ok_or(Error::NodeNotFound(id))?;
        assert_eq!(node.border(), Rect::new(90.0, 45.0, 20.0, 10.0));
        assert_eq!(node.clip(), node.border());
        Ok(())
    }

    #[test]
    fn overflowing_offset_is_clamped() -> Result<()> {
        let mut c = core();
        let id = c.add(Tracker::new(50.0, 300.0));
        let clip = Rect::new(0.0, 0.0, 200.0, 100.0);
        c.nodes[id].offset = Point::new(0.0, -500.0);
        let mut pass = LayoutPass::new(&mut c);
        pass.measure(id, clip.size())?;
        pass.position(id, Point::zero(), clip, DragAxes::both())?;
        let node = c.node(id).ok_or(Error::NodeNotFound(id))?;
        // Trailing edge pinned to the bottom of the clip.
        assert_eq!(node.border().top(), -200.0);
        assert_eq!(node.offset(), Point::new(0.0, -200.0));

        c.nodes[id].offset = Point::new(0.0, 40.0);
        LayoutPass::new(&mut c).position(id, Point::zero(), clip, DragAxes::both())?;
        let node = c.node(id).ok_or(Error::NodeNotFound(id))?;
        assert_eq!(node.border().top(), 0.0);
        assert_eq!(node.offset(), Point::zero());
        Ok(())
    }

    #[test]
    fn non_overflowing_offset_resets() -> Result<()> {
        let mut c = core();
        let id = c.add(Tracker::new(50.0, 50.0));
        let clip = Rect::new(0.0, 0.0, 200.0, 100.0);
        c.nodes[id].offset = Point::new(7.0, 7.0);
        let mut pass = LayoutPass::new(&mut c);
        pass.measure(id, clip.size())?;
        pass.position(id, Point::zero(), clip, DragAxes::both())?;
        assert_eq!(c.nodes[id].offset, Point::zero());
        Ok(())
    }

    #[test]
    fn disabled_drag_keeps_offset_unapplied() -> Result<()> {
        let mut c = core();
        let id = c.add(Tracker::new(50.0, 300.0));
        let clip = Rect::new(0.0, 0.0, 200.0, 100.0);
        c.nodes[id].offset = Point::new(0.0, -30.0);
        let mut pass = LayoutPass::new(&mut c);
        pass.measure(id, clip.size())?;
        pass.position(id, Point::zero(), clip, DragAxes::none())?;
        assert_eq!(c.nodes[id].border.top(), 0.0);
        assert_eq!(c.nodes[id].offset.y, -30.0);
        Ok(())
    }
}
