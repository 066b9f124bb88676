use std::{
    any::{Any, type_name},
    collections::HashSet,
    time::Duration,
};

use slotmap::SlotMap;
use tracing::{debug, warn};

use super::{
    backend::{AudioFeedback, FontMetrics, Renderer},
    config::EngineConfig,
    context::{Context, CoreContext},
    event::{Key, PointerState},
    id::NodeId,
    metrics::DeviceMetrics,
    node::{Fill, Node, Scrollbar},
    pass::LayoutPass,
    render,
};
use crate::{
    error::{Error, Result},
    geom::{Axis, Point},
    layout::{DragAxes, InsetTier, Layout, TextMetric, TextTier},
    widget::{EventOutcome, Stacking, Widget},
};

/// Core state: the node arena, the displayed tree, focus and the
/// collaborators that layout consults.
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root of the displayed tree.
    pub(crate) top: Option<NodeId>,
    /// Node receiving key presses.
    pub(crate) focus: Option<NodeId>,
    /// Node that has claimed pointer moves for the current press.
    pub(crate) capture: Option<NodeId>,
    /// Re-layout before the next draw.
    pub(crate) dirty: bool,
    /// Viewport and scale.
    metrics: DeviceMetrics,
    /// Font metrics collaborator.
    fonts: Box<dyn FontMetrics>,
    /// Audio collaborator, if the host has one.
    audio: Option<Box<dyn AudioFeedback>>,
    /// Gesture tuning.
    config: EngineConfig,
    /// Active build transaction.
    transaction: Option<BuildTransaction>,
}

/// Structural changes made inside [`Core::build`], undone on failure.
#[derive(Default)]
struct BuildTransaction {
    /// Nodes created during the transaction.
    created: Vec<NodeId>,
    /// Pre-existing nodes attached during the transaction, as
    /// `(parent, child)`.
    attached: Vec<(NodeId, NodeId)>,
}

impl Core {
    /// Create an empty arena.
    pub fn new(metrics: DeviceMetrics, fonts: Box<dyn FontMetrics>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            top: None,
            focus: None,
            capture: None,
            dirty: true,
            metrics,
            fonts,
            audio: None,
            config: EngineConfig::default(),
            transaction: None,
        }
    }

    /// Return a reference to a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Does the arena hold this node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root of the displayed tree.
    pub fn top(&self) -> Option<NodeId> {
        self.top
    }

    /// Node receiving key presses.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Node currently capturing pointer moves.
    pub fn captured(&self) -> Option<NodeId> {
        self.capture
    }

    /// Will the next frame re-run layout?
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a full re-layout before the next draw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Current device metrics.
    pub fn metrics(&self) -> DeviceMetrics {
        self.metrics
    }

    /// Replace the device metrics, for example after a resize.
    pub fn set_metrics(&mut self, metrics: DeviceMetrics) {
        self.metrics = metrics;
        self.dirty = true;
    }

    /// Gesture tuning.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the gesture tuning after validating it.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Font metrics collaborator.
    pub fn fonts(&self) -> &dyn FontMetrics {
        self.fonts.as_ref()
    }

    /// Install the audio collaborator.
    pub fn set_audio(&mut self, audio: Box<dyn AudioFeedback>) {
        self.audio = Some(audio);
    }

    /// Pixel size of one base text unit: the font's line height scaled by
    /// density and UI scale.
    pub fn text_unit(&self) -> f32 {
        self.fonts.line_height() * self.metrics.factor()
    }

    /// Pixel size of a text metric at a tier.
    pub fn unit(&self, tier: TextTier, metric: TextMetric) -> f32 {
        let height = self.text_unit() * tier.factor();
        match metric {
            TextMetric::Height => height,
            TextMetric::Width => height * self.fonts.glyph_aspect(),
        }
    }

    /// Pixel size of an inset tier, applied to each side.
    pub fn inset_px(&self, tier: InsetTier) -> f32 {
        self.text_unit() * tier.factor()
    }

    /// Add a widget to the arena as a detached node.
    ///
    /// Panics if the widget's layout pairs a shrink-wrapped axis with a
    /// nonzero stretch factor.
    pub fn add<W>(&mut self, widget: W) -> NodeId
    where
        W: Widget + 'static,
    {
        self.add_boxed(Box::new(widget))
    }

    /// Add a boxed widget to the arena as a detached node.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let node = Node::new(widget);
        node.layout.assert_valid();
        let id = self.nodes.insert(node);
        if let Some(tx) = self.transaction.as_mut() {
            tx.created.push(id);
        }
        id
    }

    /// Update the layout for a node. Panics if the result violates the
    /// shrink/stretch contract.
    pub fn with_layout_of(&mut self, id: NodeId, f: impl FnOnce(&mut Layout)) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let mut layout = node.layout;
        f(&mut layout);
        layout.assert_valid();
        node.layout = layout;
        self.dirty = true;
        Ok(())
    }

    /// Set the layout for a node.
    pub fn set_layout_of(&mut self, id: NodeId, layout: Layout) -> Result<()> {
        self.with_layout_of(id, |l| *l = layout)
    }

    /// Set or clear a node's background fill.
    pub fn set_fill(&mut self, id: NodeId, fill: Option<Fill>) -> Result<()> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?.fill = fill;
        Ok(())
    }

    /// Configure a node's scroll overlay.
    pub fn set_scrollbar(&mut self, id: NodeId, scrollbar: Scrollbar) -> Result<()> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?.scrollbar = scrollbar;
        Ok(())
    }

    /// Enable or disable audio feedback on consumed taps.
    pub fn set_sound(&mut self, id: NodeId, sound: bool) -> Result<()> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?.sound = sound;
        Ok(())
    }

    /// Transfer a detached node into a container. Layered containers put the
    /// newcomer at the front and drop their own scroll offset.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let child_node = self.nodes.get(child).ok_or(Error::NodeNotFound(child))?;
        if self.top == Some(child) {
            return Err(Error::TopWidget);
        }
        if child_node.parent.is_some() {
            return Err(Error::Attached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::Cycle { parent, child });
        }

        let p = self.nodes.get_mut(parent).ok_or(Error::NodeNotFound(parent))?;
        match p.stacking {
            Stacking::Sequential => p.children.push(child),
            Stacking::Layered => {
                p.children.insert(0, child);
                p.offset = Point::zero();
            }
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(tx) = self.transaction.as_mut()
            && !tx.created.contains(&child)
        {
            tx.attached.push((parent, child));
        }
        self.dirty = true;
        debug!(?parent, ?child, "attach");
        Ok(())
    }

    /// Take a node out of its container and hand it back detached. Detaching
    /// a node that has no parent is a no-op.
    pub fn detach(&mut self, child: NodeId) -> Result<NodeId> {
        let node = self.nodes.get_mut(child).ok_or(Error::NodeNotFound(child))?;
        let Some(parent) = node.parent.take() else {
            return Ok(child);
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|id| *id != child);
            if p.stacking == Stacking::Layered {
                p.offset = Point::zero();
            }
        }
        self.dirty = true;
        debug!(?parent, ?child, "detach");
        Ok(child)
    }

    /// Move a node to the head of its container: the front of a layer, the
    /// start of a list.
    pub fn raise(&mut self, child: NodeId) -> Result<()> {
        let parent = self
            .nodes
            .get(child)
            .ok_or(Error::NodeNotFound(child))?
            .parent;
        let Some(parent) = parent else {
            return Ok(());
        };
        let p = self.nodes.get_mut(parent).ok_or(Error::NodeNotFound(parent))?;
        p.children.retain(|id| *id != child);
        p.children.insert(0, child);
        if p.stacking == Stacking::Layered {
            p.offset = Point::zero();
        }
        self.dirty = true;
        debug!(?parent, ?child, "raise");
        Ok(())
    }

    /// Destroy a node and its whole subtree. The top widget cannot be
    /// destroyed; focus and move capture pointing into the subtree are
    /// cleared.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound(id));
        }
        if self.top == Some(id) {
            return Err(Error::TopWidget);
        }
        self.detach(id)?;
        let doomed = self.subtree_post_order(id);
        for node in &doomed {
            self.nodes.remove(*node);
        }
        self.forget(&doomed);
        self.dirty = true;
        debug!(?id, count = doomed.len(), "destroy");
        Ok(())
    }

    /// Clear focus, capture and top references to removed nodes.
    fn forget(&mut self, removed: &[NodeId]) {
        if self.focus.is_some_and(|f| removed.contains(&f)) {
            self.focus = None;
        }
        if self.capture.is_some_and(|c| removed.contains(&c)) {
            self.capture = None;
        }
        if self.top.is_some_and(|t| removed.contains(&t)) {
            self.top = None;
        }
    }

    /// Run a construction closure as a transaction. If it fails, every node
    /// it created is destroyed and every pre-existing node it attached is
    /// detached again, so callers never see a half-built subtree.
    pub fn build<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        if self.transaction.is_some() {
            return f(self);
        }
        self.transaction = Some(BuildTransaction::default());
        let result = f(self);
        let tx = self.transaction.take().unwrap_or_default();
        if let Err(e) = &result {
            warn!(error = %e, created = tx.created.len(), "build failed, rolling back");
            self.rollback(&tx);
        }
        result
    }

    /// Undo a failed transaction.
    fn rollback(&mut self, tx: &BuildTransaction) {
        for (parent, child) in tx.attached.iter().rev() {
            if self.nodes.get(*child).and_then(|n| n.parent) == Some(*parent) {
                self.detach(*child).ok();
            }
        }
        let created: HashSet<NodeId> = tx.created.iter().copied().collect();
        for id in &tx.created {
            let parent = self.nodes.get(*id).and_then(|n| n.parent);
            if let Some(parent) = parent.filter(|p| !created.contains(p))
                && let Some(p) = self.nodes.get_mut(parent)
            {
                p.children.retain(|c| c != id);
            }
        }
        for (_, node) in self.nodes.iter_mut() {
            if node.parent.is_some_and(|p| created.contains(&p)) {
                node.parent = None;
            }
        }
        for id in &tx.created {
            self.nodes.remove(*id);
        }
        self.forget(&tx.created);
        self.dirty = true;
    }

    /// Display a detached node as the root of the visible tree.
    pub fn set_top(&mut self, id: NodeId) -> Result<()> {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        if node.parent.is_some() {
            return Err(Error::Attached(id));
        }
        self.top = Some(id);
        self.capture = None;
        self.dirty = true;
        debug!(?id, "set top");
        Ok(())
    }

    /// Route key presses to a node. Returns false if the node does not
    /// exist.
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.focus = Some(id);
        true
    }

    /// Stop routing key presses.
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Measure the top widget against the viewport and position it at its
    /// anchor point within the viewport.
    pub fn update_layout(&mut self) -> Result<()> {
        let Some(top) = self.top else {
            self.dirty = false;
            return Ok(());
        };
        let viewport = self.metrics.viewport.rect();
        let anchor = self
            .nodes
            .get(top)
            .ok_or(Error::NodeNotFound(top))?
            .layout
            .anchor;
        let mut pass = LayoutPass::new(self);
        pass.measure(top, viewport.size())?;
        pass.position(top, anchor.point_in(viewport), viewport, DragAxes::both())?;
        self.dirty = false;
        Ok(())
    }

    /// Hit test a node. Nothing outside the node's visible border is
    /// consumed. A consumed release plays the click sound if the node asks
    /// for it.
    pub fn click(&mut self, id: NodeId, state: PointerState, p: Point) -> Result<EventOutcome> {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        let hit = node.hit_rect();
        if hit.is_empty() || !hit.contains_point(p) {
            return Ok(EventOutcome::Ignore);
        }
        let outcome = self.with_widget_mut(id, |w, core| {
            w.on_click(state, p, &mut CoreContext::new(core, id))
        })??;
        if outcome == EventOutcome::Consume
            && state == PointerState::Up
            && self.nodes.get(id).is_some_and(|n| n.sound)
            && let Some(audio) = self.audio.as_mut()
        {
            audio.click();
        }
        Ok(outcome)
    }

    /// Drag a subtree by `delta`, starting from `from`.
    ///
    /// Shrink-wrapped axes absorb the delta into the node's own offset (only
    /// while the node overflows its parent clip) and pass nothing on. Other
    /// axes pass the delta through. Children only hear about the drag if at
    /// least one axis is not shrink-wrapped; a layer forwards it to its
    /// front-most child under the pointer.
    pub fn drag(&mut self, id: NodeId, from: Point, delta: Point) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let hit = node.hit_rect();
        if hit.is_empty() || !hit.contains_point(from) {
            return Ok(());
        }
        let layout = node.layout;
        let mut pass = delta;
        for axis in Axis::ALL {
            if !layout.wrap(axis).is_shrink() {
                continue;
            }
            if node.border.len(axis) > node.bounds.len(axis) {
                node.offset
                    .set(axis, node.offset.get(axis) + delta.get(axis));
            }
            pass.set(axis, 0.0);
        }
        let stacking = node.stacking;
        let children = node.children.clone();

        self.with_widget_mut(id, |w, core| {
            w.on_drag(from, delta, &mut CoreContext::new(core, id))
        })??;

        if layout.is_shrink() {
            return Ok(());
        }
        match stacking {
            Stacking::Sequential => {
                for child in children {
                    self.drag(child, from, pass)?;
                }
            }
            Stacking::Layered => {
                let front = children.into_iter().find(|c| {
                    self.nodes.get(*c).is_some_and(|n| {
                        let hit = n.hit_rect();
                        !hit.is_empty() && hit.contains_point(from)
                    })
                });
                if let Some(child) = front {
                    self.drag(child, from, pass)?;
                }
            }
        }
        Ok(())
    }

    /// Deliver a key press to the focused node.
    pub fn key(&mut self, key: Key) -> Result<EventOutcome> {
        let Some(focus) = self.focus else {
            return Ok(EventOutcome::Ignore);
        };
        self.with_widget_mut(focus, |w, core| {
            w.on_key(key, &mut CoreContext::new(core, focus))
        })?
    }

    /// Deliver a pointer move to the capturing node.
    pub fn move_captured(&mut self, p: Point) -> Result<()> {
        let Some(id) = self.capture.filter(|c| self.nodes.contains_key(*c)) else {
            return Ok(());
        };
        self.with_widget_mut(id, |w, core| {
            w.on_move(p, &mut CoreContext::new(core, id))
        })?
    }

    /// End the move capture and deliver the release to the node that held
    /// it.
    pub fn release_captured(&mut self, p: Point) -> Result<()> {
        let Some(id) = self.capture.take().filter(|c| self.nodes.contains_key(*c)) else {
            return Ok(());
        };
        self.with_widget_mut(id, |w, core| {
            w.on_release(p, &mut CoreContext::new(core, id))
        })?
    }

    /// Run refresh hooks over the displayed tree, parents first.
    pub fn refresh(&mut self, dt: Duration) -> Result<()> {
        let Some(top) = self.top else {
            return Ok(());
        };
        for id in self.subtree_pre_order(top) {
            if !self.nodes.contains_key(id) {
                continue;
            }
            self.with_widget_mut(id, |w, core| {
                w.refresh(dt, &mut CoreContext::new(core, id))
            })??;
        }
        Ok(())
    }

    /// Draw the displayed tree.
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<()> {
        render::draw_tree(self, renderer)
    }

    /// Run a closure against a widget of a known type, with a context bound
    /// to its node. Marks the tree dirty afterwards, since the widget state
    /// may affect its size.
    pub fn with_widget<W, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut W, &mut dyn Context) -> R,
    ) -> Result<R>
    where
        W: Widget + 'static,
    {
        let out = self.with_widget_mut(id, |w, core| {
            let any = w as &mut dyn Any;
            let w = any.downcast_mut::<W>().ok_or_else(|| {
                Error::Internal(format!("expected widget type {}", type_name::<W>()))
            })?;
            Ok(f(w, &mut CoreContext::new(core, id)))
        })?;
        self.dirty = true;
        out
    }

    /// Read a widget of a known type.
    pub fn widget<W, R>(&self, id: NodeId, f: impl FnOnce(&W) -> R) -> Result<R>
    where
        W: Widget + 'static,
    {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        let slot = node
            .widget
            .try_borrow()
            .map_err(|_| Error::ReentrantWidgetBorrow(id))?;
        let widget = slot.as_deref().ok_or(Error::ReentrantWidgetBorrow(id))?;
        let any = widget as &dyn Any;
        let widget = any.downcast_ref::<W>().ok_or_else(|| {
            Error::Internal(format!("expected widget type {}", type_name::<W>()))
        })?;
        Ok(f(widget))
    }

    /// Take a widget out of its slot for the duration of one call, so that
    /// its hook can borrow the arena mutably.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let mut widget = node
            .widget
            .get_mut()
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            *node.widget.get_mut() = Some(widget);
        }
        Ok(out)
    }

    /// Take a widget out of its slot for a draw call against a shared arena.
    pub(crate) fn with_widget_view<R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &Self) -> R,
    ) -> Result<R> {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        let mut widget = node
            .widget
            .try_borrow_mut()
            .map_err(|_| Error::ReentrantWidgetBorrow(id))?
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = f(widget.as_mut(), self);
        if let Ok(mut slot) = node.widget.try_borrow_mut() {
            *slot = Some(widget);
        }
        Ok(out)
    }

    /// Return true if `ancestor` appears in the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Collect a subtree in pre-order, including the root.
    pub(crate) fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Collect a subtree with every node after its descendants, including
    /// the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = self.subtree_pre_order(root);
        out.reverse();
        out
    }
}
