//! Collaborator traits implemented by the host.
//!
//! The engine never talks to a graphics API, font rasterizer or audio device
//! directly. It writes vertex data and scissor commands to a [`Renderer`],
//! asks a [`FontMetrics`] for glyph geometry, and pings an [`AudioFeedback`]
//! when a sound-enabled node consumes a tap.

use crate::{error::Result, geom::Rect, render::Vertex};

/// Opaque handle for an uploaded vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Opaque handle for an image resource owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Shading state bound before a draw submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Untextured solid colour.
    Solid,
    /// The glyph atlas.
    Glyphs,
    /// A host image.
    Image(ImageHandle),
}

/// Vertex submission and scissoring.
pub trait Renderer {
    /// Restrict subsequent draws to a rectangle in viewport pixels.
    fn scissor(&mut self, rect: Rect) -> Result<()>;

    /// Bind shading state for subsequent draws.
    fn bind(&mut self, binding: Binding) -> Result<()>;

    /// Upload a triangle list. The slice can be viewed as raw bytes with
    /// [`Vertex::as_bytes`].
    fn upload(&mut self, vertices: &[Vertex]) -> Result<BufferHandle>;

    /// Draw `count` vertices from an uploaded buffer.
    fn draw(&mut self, buffer: BufferHandle, count: usize) -> Result<()>;
}

/// Geometry for a single glyph, normalized so that the font's line height
/// is 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Horizontal advance.
    pub advance: f32,
    /// Quad relative to the pen position at the top of the line.
    pub quad: Rect,
    /// Texture coordinates in the glyph atlas.
    pub uv: Rect,
}

/// Font metrics for the single UI font.
pub trait FontMetrics {
    /// Line height in pixels at density 1 and normal scale.
    fn line_height(&self) -> f32;

    /// Average glyph width divided by line height.
    fn glyph_aspect(&self) -> f32;

    /// Geometry for a character, or `None` if the font has no glyph for it.
    fn glyph(&self, c: char) -> Option<Glyph>;
}

/// Audible feedback for consumed taps.
pub trait AudioFeedback {
    /// Play the click sound.
    fn click(&mut self);
}
