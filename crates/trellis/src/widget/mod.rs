//! Widget trait and event outcome types.

use std::{
    any::{Any, type_name},
    time::Duration,
};

use crate::{
    Context, ViewContext,
    error::Result,
    event::{Key, PointerState},
    geom::{Expanse, Point, Rect},
    layout::{DragAxes, Layout},
    render::Render,
    state::NodeName,
};

/// The result of a click or key handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was handled and propagation stops.
    Consume,
    /// The event was not handled.
    Ignore,
}

/// How a node orders its children.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Stacking {
    /// Children follow one another. New children are appended, and every
    /// child hears about drags.
    #[default]
    Sequential,
    /// Children are z-ordered with the head in front. New children go to the
    /// front, hit testing runs front to back, drawing back to front.
    Layered,
}

/// Widgets are the behavior attached to nodes in the [`Core`](crate::Core)
/// arena. Every hook has a default, so a widget only overrides what it needs.
pub trait Widget: Any {
    /// Initial layout configuration for this widget's node.
    fn layout(&self) -> Layout {
        Layout::shrink()
    }

    /// Width to height ratio applied to horizontal text-relative sizing.
    fn aspect(&self) -> Option<f32> {
        None
    }

    /// How this widget orders its children.
    fn stacking(&self) -> Stacking {
        Stacking::Sequential
    }

    /// Recompute size-dependent state, such as line breaks, for the current
    /// draw size. Runs before [`measure`](Self::measure).
    fn reflow(&mut self, _draw: Expanse, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Report a content size. On shrink-wrapped axes it replaces the draw
    /// size. Containers measure their children here.
    fn measure(&mut self, _draw: Expanse, _ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        Ok(None)
    }

    /// Position children inside the draw rect.
    fn position_children(
        &mut self,
        _draw: Rect,
        _drag: DragAxes,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        Ok(())
    }

    /// Decide whether a press or release inside the node is consumed.
    fn on_click(
        &mut self,
        _state: PointerState,
        _p: Point,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Observe a drag that reached this node.
    fn on_drag(&mut self, _from: Point, _delta: Point, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Pointer moved while this node holds the move capture.
    fn on_move(&mut self, _p: Point, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Pointer lifted while this node holds the move capture.
    fn on_release(&mut self, _p: Point, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Handle a key press while focused.
    fn on_key(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Per-frame update.
    fn refresh(&mut self, _dt: Duration, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Draw this widget's own content. Does not draw children.
    fn draw(&mut self, _r: &mut Render<'_>, _ctx: &dyn ViewContext) -> Result<()> {
        Ok(())
    }

    /// Name used in dumps and logs.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let name = name.split('<').next().unwrap_or(name);
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
