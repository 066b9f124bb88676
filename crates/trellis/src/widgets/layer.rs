use crate::{
    Context,
    error::Result,
    event::PointerState,
    geom::{Expanse, Point, Rect},
    layout::{DragAxes, Layout},
    widget::{EventOutcome, Stacking, Widget},
};

/// A z-ordered stack. Every child is placed against the same draw rect at its
/// own anchor; the head of the child list is in front.
pub struct Layer {
    /// Initial layout.
    layout: Layout,
}

impl Layer {
    /// A layer that fills its parent.
    pub fn new() -> Self {
        Self {
            layout: Layout::fill(),
        }
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Layer {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn stacking(&self) -> Stacking {
        Stacking::Layered
    }

    fn measure(&mut self, draw: Expanse, ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        let mut size = Expanse::zero();
        for child in ctx.children() {
            let border = ctx.measure_child(child, draw)?;
            size = Expanse::new(size.w.max(border.w), size.h.max(border.h));
        }
        Ok(Some(size))
    }

    fn position_children(
        &mut self,
        draw: Rect,
        drag: DragAxes,
        ctx: &mut dyn Context,
    ) -> Result<()> {
        for child in ctx.children() {
            let anchor = ctx.layout_of(child).unwrap_or_default().anchor;
            ctx.position_child(child, anchor.point_in(draw), drag)?;
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
                return Ok(EventOutcome::Consume);
            }
        }
        Ok(EventOutcome::Ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Core,
        layout::Anchor,
        metrics::DeviceMetrics,
        node::Fill,
        render::Color,
        testing::{FixedFont, RecordingRenderer, Tracker},
    };

    fn core() -> Core {
        Core::new(DeviceMetrics::new(100.0, 100.0), Box::new(FixedFont::new(10.0)))
    }

    #[test]
    fn children_share_the_draw_rect() -> Result<()> {
        let mut c = core();
        let layer = c.add(Layer::new());
        let back = c.add(Tracker::new(20.0, 20.0));
        let front = c.add(Tracker::new(10.0, 10.0).with_layout(Layout::shrink().anchor(Anchor::Center)));
        c.attach(layer, back)?;
        c.attach(layer, front)?;
        c.set_top(layer)?;
        c.update_layout()?;
        assert_eq!(c.nodes[back].border, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(c.nodes[front].border, Rect::new(45.0, 45.0, 10.0, 10.0));
        assert_eq!(c.nodes[front].bounds, c.nodes[back].bounds);
        Ok(())
    }

    #[test]
    fn front_consumer_wins() -> Result<()> {
        let mut c = core();
        let layer = c.add(Layer::new());
        let back = c.add(Tracker::new(20.0, 20.0).consuming());
        let front = c.add(Tracker::new(20.0, 20.0).consuming());
        c.attach(layer, back)?;
        c.attach(layer, front)?;
        c.set_top(layer)?;
        c.update_layout()?;

        let p = Point::new(5.0, 5.0);
        assert_eq!(c.click(layer, PointerState::Down, p)?, EventOutcome::Consume);
        assert_eq!(c.widget::<Tracker, _>(front, |w| w.clicks.len())?, 1);
        assert_eq!(c.widget::<Tracker, _>(back, |w| w.clicks.len())?, 0);

        c.raise(back)?;
        c.update_layout()?;
        c.click(layer, PointerState::Down, p)?;
        assert_eq!(c.widget::<Tracker, _>(back, |w| w.clicks.len())?, 1);

        // Nothing under the pointer.
        assert_eq!(
            c.click(layer, PointerState::Down, Point::new(80.0, 80.0))?,
            EventOutcome::Ignore
        );
        Ok(())
    }

    #[test]
    fn draws_back_to_front() -> Result<()> {
        let mut c = core();
        let layer = c.add(Layer::new());
        let back = c.add(Tracker::new(20.0, 20.0));
        let front = c.add(Tracker::new(10.0, 10.0));
        c.attach(layer, back)?;
        c.attach(layer, front)?;
        c.set_fill(back, Some(Fill::solid(Color::BLACK)))?;
        c.set_fill(front, Some(Fill::solid(Color::WHITE)))?;
        c.set_top(layer)?;
        c.update_layout()?;

        let mut rec = RecordingRenderer::default();
        c.draw(&mut rec)?;
        let colors: Vec<[f32; 4]> = rec.vertices().iter().map(|v| v.color).collect();
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[0], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors[11], [1.0, 1.0, 1.0, 1.0]);
        Ok(())
    }
}
