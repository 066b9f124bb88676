use crate::{
    backend::{FontMetrics, Glyph},
    geom::Rect,
};

/// Cells per row in the imaginary glyph atlas.
const ATLAS_COLUMNS: u32 = 16;

/// A monospace font: every printable glyph is half a line wide and fills
/// the line. Control characters have no glyph.
#[derive(Debug, Clone, Copy)]
pub struct FixedFont {
    /// Line height in pixels.
    line_height: f32,
}

impl FixedFont {
    /// A font with the given line height.
    pub fn new(line_height: f32) -> Self {
        Self { line_height }
    }
}

impl FontMetrics for FixedFont {
    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn glyph_aspect(&self) -> f32 {
        0.5
    }

    fn glyph(&self, c: char) -> Option<Glyph> {
        if c.is_control() {
            return None;
        }
        let cell = u32::from(c) % (ATLAS_COLUMNS * ATLAS_COLUMNS);
        let size = 1.0 / ATLAS_COLUMNS as f32;
        let col = (cell % ATLAS_COLUMNS) as f32;
        let row = (cell / ATLAS_COLUMNS) as f32;
        Some(Glyph {
            advance: 0.5,
            quad: Rect::new(0.0, 0.0, 0.5, 1.0),
            uv: Rect::new(col * size, row * size, size, size),
        })
    }
}
