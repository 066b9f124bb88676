use super::{
    backend::FontMetrics, event::PointerState, id::NodeId, node::Node, pass::LayoutPass,
    world::Core,
};
use crate::{
    error::{Error, Result},
    geom::{Expanse, Point, Rect},
    layout::{DragAxes, Layout, TextMetric, TextTier},
    widget::EventOutcome,
};

/// Read-only context available to widgets during every hook.
pub trait ViewContext {
    /// The node whose hook is running.
    fn node_id(&self) -> NodeId;

    /// The arena.
    fn core(&self) -> &Core;

    /// The current node.
    fn node(&self) -> Result<&Node> {
        let id = self.node_id();
        self.core().nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Layout configuration of the current node.
    fn layout(&self) -> Layout {
        self.layout_of(self.node_id()).unwrap_or_default()
    }

    /// Layout configuration of any node.
    fn layout_of(&self, node: NodeId) -> Option<Layout> {
        self.core().nodes.get(node).map(|n| n.layout)
    }

    /// Children of the current node in container order.
    fn children(&self) -> Vec<NodeId> {
        self.core()
            .nodes
            .get(self.node_id())
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Border rect of any node, as left by the most recent measure or
    /// position pass.
    fn border_of(&self, node: NodeId) -> Option<Rect> {
        self.core().nodes.get(node).map(|n| n.border)
    }

    /// Content rect of the current node.
    fn draw_rect(&self) -> Rect {
        self.core()
            .nodes
            .get(self.node_id())
            .map(|n| n.draw)
            .unwrap_or_default()
    }

    /// Visible part of the current node's content rect.
    fn clip(&self) -> Rect {
        self.core()
            .nodes
            .get(self.node_id())
            .map(|n| n.clip)
            .unwrap_or_default()
    }

    /// Font metrics collaborator.
    fn fonts(&self) -> &dyn FontMetrics {
        self.core().fonts()
    }

    /// Pixel size of one base text unit.
    fn text_unit(&self) -> f32 {
        self.core().text_unit()
    }

    /// Pixel size of a text metric at a tier.
    fn unit(&self, tier: TextTier, metric: TextMetric) -> f32 {
        self.core().unit(tier, metric)
    }

    /// Does the current node have key focus?
    fn is_focused(&self) -> bool {
        self.core().focus() == Some(self.node_id())
    }
}

/// Mutable context for widgets. Containers use it to recurse into their
/// children.
pub trait Context: ViewContext {
    /// Measure a child against an available size and return its border
    /// size.
    fn measure_child(&mut self, child: NodeId, avail: Expanse) -> Result<Expanse>;

    /// Position a child so that its anchor lands on `point`, clipped by the
    /// current node's clip.
    fn position_child(&mut self, child: NodeId, point: Point, drag: DragAxes) -> Result<()>;

    /// Hit test a child.
    fn click_child(&mut self, child: NodeId, state: PointerState, p: Point)
    -> Result<EventOutcome>;

    /// Request a full re-layout before the next draw.
    fn mark_dirty(&mut self);

    /// Route pointer moves and the eventual release to the current node
    /// until the pointer is lifted.
    fn capture_move(&mut self);

    /// Give the current node key focus.
    fn set_focus(&mut self) -> bool;
}

/// Mutable context bound to a node.
pub struct CoreContext<'a> {
    /// Core state reference.
    core: &'a mut Core,
    /// Node bound to this context.
    node_id: NodeId,
}

impl<'a> CoreContext<'a> {
    /// Create a new context for a node.
    pub fn new(core: &'a mut Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

impl ViewContext for CoreContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn core(&self) -> &Core {
        self.core
    }
}

impl Context for CoreContext<'_> {
    fn measure_child(&mut self, child: NodeId, avail: Expanse) -> Result<Expanse> {
        LayoutPass::new(self.core).measure(child, avail)
    }

    fn position_child(&mut self, child: NodeId, point: Point, drag: DragAxes) -> Result<()> {
        let clip = self.clip();
        LayoutPass::new(self.core).position(child, point, clip, drag)
    }

    fn click_child(
        &mut self,
        child: NodeId,
        state: PointerState,
        p: Point,
    ) -> Result<EventOutcome> {
        self.core.click(child, state, p)
    }

    fn mark_dirty(&mut self) {
        self.core.mark_dirty();
    }

    fn capture_move(&mut self) {
        self.core.capture = Some(self.node_id);
    }

    fn set_focus(&mut self) -> bool {
        self.core.set_focus(self.node_id)
    }
}

/// Read-only context bound to a node.
pub struct CoreViewContext<'a> {
    /// Core state reference.
    core: &'a Core,
    /// Node bound to this context.
    node_id: NodeId,
}

impl<'a> CoreViewContext<'a> {
    /// Create a new read-only context for a node.
    pub fn new(core: &'a Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

impl ViewContext for CoreViewContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn core(&self) -> &Core {
        self.core
    }
}
