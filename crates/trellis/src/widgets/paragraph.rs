use std::mem;

use super::label::{draw_text, grow, text_width};
use crate::{
    Context, ViewContext,
    backend::FontMetrics,
    error::Result,
    geom::{Expanse, Point},
    layout::{Layout, TextMetric, TextTier},
    render::{Color, Render},
    widget::Widget,
};

/// Break text into lines no wider than `width`. Words are split on
/// whitespace and explicit newlines start a new line. A word wider than the
/// limit gets a line of its own.
fn wrap(fonts: &dyn FontMetrics, text: &str, width: f32, unit: f32) -> Vec<String> {
    let space = text_width(fonts, " ", unit);
    let mut lines = Vec::new();
    for para in text.split('\n') {
        let mut line = String::new();
        let mut line_w = 0.0;
        for word in para.split_whitespace() {
            let word_w = text_width(fonts, word, unit);
            if !line.is_empty() && line_w + space + word_w > width {
                lines.push(mem::take(&mut line));
                line_w = 0.0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_w += space;
            }
            line.push_str(word);
            line_w += word_w;
        }
        lines.push(line);
    }
    lines
}

/// Word-wrapped text. Lines are re-broken to the draw width on every layout,
/// so a paragraph is usually stretched horizontally and shrink-wrapped
/// vertically.
pub struct Paragraph {
    /// Source text.
    text: String,
    /// Text size.
    tier: TextTier,
    /// Glyph colour.
    color: Color,
    /// Initial layout.
    layout: Layout,
    /// Lines from the most recent reflow.
    lines: Vec<String>,
}

impl Paragraph {
    /// A paragraph filling the width of its parent.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tier: TextTier::Normal,
            color: Color::WHITE,
            layout: Layout::shrink().stretch_horizontal(1.0),
            lines: Vec::new(),
        }
    }

    /// Set the text size.
    pub fn with_tier(mut self, tier: TextTier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the glyph colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the text, keeping the old text if allocation fails.
    pub fn set_text(&mut self, text: &str) -> bool {
        let mut buf = String::new();
        if !grow(&mut buf, text.len()) {
            return false;
        }
        buf.push_str(text);
        self.text = buf;
        true
    }

    /// Lines from the most recent layout.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Widget for Paragraph {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn reflow(&mut self, draw: Expanse, ctx: &mut dyn Context) -> Result<()> {
        let unit = ctx.unit(self.tier, TextMetric::Height);
        self.lines = wrap(ctx.fonts(), &self.text, draw.w, unit);
        Ok(())
    }

    fn measure(&mut self, _draw: Expanse, ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        let unit = ctx.unit(self.tier, TextMetric::Height);
        let fonts = ctx.fonts();
        let widest = self
            .lines
            .iter()
            .map(|l| text_width(fonts, l, unit))
            .fold(0.0, f32::max);
        Ok(Some(Expanse::new(widest, unit * self.lines.len() as f32)))
    }

    fn draw(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        let unit = ctx.unit(self.tier, TextMetric::Height);
        let tl = ctx.draw_rect().tl;
        for (i, line) in self.lines.iter().enumerate() {
            let origin = Point::new(tl.x, tl.y + unit * i as f32);
            draw_text(r, ctx.fonts(), line, origin, unit, self.color)?;
        }
        Ok(())
    }
}
