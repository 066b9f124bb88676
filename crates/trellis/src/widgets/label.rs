use crate::{
    Context, ViewContext,
    backend::FontMetrics,
    error::Result,
    geom::{Expanse, Point, Rect},
    layout::{Layout, TextMetric, TextTier},
    render::{Color, Render},
    widget::Widget,
};

/// Grow a buffer by `additional` bytes. Returns false if the allocation
/// fails, leaving the buffer untouched.
pub(crate) fn grow(buf: &mut String, additional: usize) -> bool {
    buf.try_reserve(additional).is_ok()
}

/// Width of a run of text in pixels at a given line height.
pub(crate) fn text_width(fonts: &dyn FontMetrics, text: &str, unit: f32) -> f32 {
    text.chars()
        .filter_map(|c| fonts.glyph(c))
        .map(|g| g.advance * unit)
        .sum()
}

/// Emit glyph quads for a run of text with its top-left at `origin`.
pub(crate) fn draw_text(
    r: &mut Render<'_>,
    fonts: &dyn FontMetrics,
    text: &str,
    origin: Point,
    unit: f32,
    color: Color,
) -> Result<()> {
    let mut x = origin.x;
    for c in text.chars() {
        let Some(g) = fonts.glyph(c) else {
            continue;
        };
        let quad = Rect::new(
            x + g.quad.tl.x * unit,
            origin.y + g.quad.tl.y * unit,
            g.quad.w * unit,
            g.quad.h * unit,
        );
        r.glyph(quad, g.uv, color)?;
        x += g.advance * unit;
    }
    Ok(())
}

/// A single line of text.
pub struct Label {
    /// Displayed text.
    text: String,
    /// Text size.
    tier: TextTier,
    /// Glyph colour.
    color: Color,
    /// Initial layout.
    layout: Layout,
}

impl Label {
    /// A shrink-wrapped label.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tier: TextTier::Normal,
            color: Color::WHITE,
            layout: Layout::shrink(),
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

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. If the new buffer cannot be allocated the old text
    /// is kept and false is returned.
    pub fn set_text(&mut self, text: &str) -> bool {
        let mut buf = String::new();
        if !grow(&mut buf, text.len()) {
            return false;
        }
        buf.push_str(text);
        self.text = buf;
        true
    }
}

impl Widget for Label {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn measure(&mut self, _draw: Expanse, ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        let unit = ctx.unit(self.tier, TextMetric::Height);
        Ok(Some(Expanse::new(
            text_width(ctx.fonts(), &self.text, unit),
            unit,
        )))
    }

    fn draw(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        let unit = ctx.unit(self.tier, TextMetric::Height);
        draw_text(r, ctx.fonts(), &self.text, ctx.draw_rect().tl, unit, self.color)
    }
}
