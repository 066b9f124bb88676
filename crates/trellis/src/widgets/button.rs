use super::label::{draw_text, text_width};
use crate::{
    Context, ViewContext,
    error::Result,
    event::{Key, KeyCode, PointerState},
    geom::{Expanse, Point},
    layout::{InsetTier, Layout, TextMetric, TextTier},
    render::{Color, Render},
    widget::{EventOutcome, Widget},
};

/// A tappable text button. Consumes both halves of a tap and counts
/// activations; Enter activates it while focused.
pub struct Button {
    /// Caption.
    text: String,
    /// Caption colour.
    color: Color,
    /// Initial layout.
    layout: Layout,
    /// Completed activations.
    presses: usize,
}

impl Button {
    /// A shrink-wrapped button with a small inset around its caption.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: Color::WHITE,
            layout: Layout::shrink().insets(InsetTier::Small, InsetTier::Small),
            presses: 0,
        }
    }

    /// Set the caption colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Number of completed activations.
    pub fn presses(&self) -> usize {
        self.presses
    }
}

impl Widget for Button {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn measure(&mut self, _draw: Expanse, ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        let unit = ctx.unit(TextTier::Normal, TextMetric::Height);
        Ok(Some(Expanse::new(
            text_width(ctx.fonts(), &self.text, unit),
            unit,
        )))
    }

    fn on_click(
        &mut self,
        state: PointerState,
        _p: Point,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        if state == PointerState::Up {
            self.presses += 1;
        }
        Ok(EventOutcome::Consume)
    }

    fn on_key(&mut self, key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        if key == KeyCode::Enter {
            self.presses += 1;
            return Ok(EventOutcome::Consume);
        }
        Ok(EventOutcome::Ignore)
    }

    fn draw(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        let unit = ctx.unit(TextTier::Normal, TextMetric::Height);
        let draw = ctx.draw_rect();
        let w = text_width(ctx.fonts(), &self.text, unit);
        let origin = Point::new(
            draw.left() + (draw.w - w) / 2.0,
            draw.top() + (draw.h - unit) / 2.0,
        );
        draw_text(r, ctx.fonts(), &self.text, origin, unit, self.color)
    }
}
