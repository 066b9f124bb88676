//! Vertex generation and the draw traversal.

use std::f32::consts::{FRAC_PI_2, PI};

use bytemuck::{Pod, Zeroable};
use tracing::trace;

use super::{
    backend::{Binding, ImageHandle, Renderer},
    context::CoreViewContext,
    id::NodeId,
    node::Node,
    world::Core,
};
use crate::{
    error::{Error, Result},
    geom::{Axis, Point, Rect},
    widget::Stacking,
};

/// Triangles per rounded corner.
const CORNER_SEGMENTS: usize = 6;

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Construct from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct from a packed `0xRRGGBBAA` value.
    pub fn rgba(hex: u32) -> Self {
        let [r, g, b, a] = hex.to_be_bytes();
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Components as an array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A vertex in a triangle list.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in viewport pixels.
    pub pos: [f32; 2],
    /// Texture coordinates. Zero for solid fills.
    pub uv: [f32; 2],
    /// Vertex colour.
    pub color: [f32; 4],
}

impl Vertex {
    /// Construct a vertex.
    pub fn new(pos: Point, uv: Point, color: Color) -> Self {
        Self {
            pos: [pos.x, pos.y],
            uv: [uv.x, uv.y],
            color: color.to_array(),
        }
    }

    /// View a vertex slice as raw bytes for upload to a GPU buffer.
    pub fn as_bytes(vertices: &[Self]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Accumulates vertices and flushes them to a [`Renderer`] whenever the
/// scissor rect or binding changes.
pub struct Render<'a> {
    /// Destination.
    renderer: &'a mut dyn Renderer,
    /// Pending vertices for the current scissor and binding.
    vertices: Vec<Vertex>,
    /// Scissor rect most recently sent.
    scissor: Option<Rect>,
    /// Binding most recently sent.
    binding: Option<Binding>,
    /// Draw submissions made so far.
    submissions: usize,
}

impl<'a> Render<'a> {
    /// Start accumulating for a renderer.
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self {
            renderer,
            vertices: Vec::new(),
            scissor: None,
            binding: None,
            submissions: 0,
        }
    }

    /// The current scissor rect.
    pub fn clip(&self) -> Option<Rect> {
        self.scissor
    }

    /// Switch the scissor rect, flushing pending vertices first.
    pub fn set_clip(&mut self, rect: Rect) -> Result<()> {
        if self.scissor == Some(rect) {
            return Ok(());
        }
        self.flush()?;
        self.renderer.scissor(rect)?;
        self.scissor = Some(rect);
        Ok(())
    }

    /// Switch the binding, flushing pending vertices first.
    fn bind(&mut self, binding: Binding) -> Result<()> {
        if self.binding == Some(binding) {
            return Ok(());
        }
        self.flush()?;
        self.renderer.bind(binding)?;
        self.binding = Some(binding);
        Ok(())
    }

    /// Fill a rectangle, rounding its corners by `radius`. The radius is
    /// clamped to half the shorter side.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, radius: f32) -> Result<()> {
        if rect.is_empty() || color.a <= 0.0 {
            return Ok(());
        }
        self.bind(Binding::Solid)?;
        let r = radius.clamp(0.0, rect.w.min(rect.h) / 2.0);
        if r <= 0.0 {
            self.quad(rect, Rect::zero(), color);
            return Ok(());
        }
        let inner_h = rect.h - 2.0 * r;
        self.quad(
            Rect::new(rect.left() + r, rect.top(), rect.w - 2.0 * r, rect.h),
            Rect::zero(),
            color,
        );
        self.quad(
            Rect::new(rect.left(), rect.top() + r, r, inner_h),
            Rect::zero(),
            color,
        );
        self.quad(
            Rect::new(rect.right() - r, rect.top() + r, r, inner_h),
            Rect::zero(),
            color,
        );
        let corners = [
            (Point::new(rect.left() + r, rect.top() + r), PI),
            (Point::new(rect.right() - r, rect.top() + r), PI + FRAC_PI_2),
            (Point::new(rect.right() - r, rect.bottom() - r), 0.0),
            (Point::new(rect.left() + r, rect.bottom() - r), FRAC_PI_2),
        ];
        for (centre, start) in corners {
            self.corner(centre, r, start, color);
        }
        Ok(())
    }

    /// Emit a glyph quad from the glyph atlas.
    pub fn glyph(&mut self, quad: Rect, uv: Rect, color: Color) -> Result<()> {
        if quad.is_empty() {
            return Ok(());
        }
        self.bind(Binding::Glyphs)?;
        self.quad(quad, uv, color);
        Ok(())
    }

    /// Emit a textured quad covering `rect` with a whole image.
    pub fn image(&mut self, rect: Rect, image: ImageHandle, tint: Color) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        self.bind(Binding::Image(image))?;
        self.quad(rect, Rect::new(0.0, 0.0, 1.0, 1.0), tint);
        Ok(())
    }

    /// Two triangles covering `rect`.
    fn quad(&mut self, rect: Rect, uv: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let corner = |r: Rect, x: bool, y: bool| {
            Point::new(
                if x { r.right() } else { r.left() },
                if y { r.bottom() } else { r.top() },
            )
        };
        let v = |x, y| Vertex::new(corner(rect, x, y), corner(uv, x, y), color);
        self.vertices.extend_from_slice(&[
            v(false, false),
            v(true, false),
            v(false, true),
            v(true, false),
            v(true, true),
            v(false, true),
        ]);
    }

    /// A quarter-circle fan starting at angle `start`.
    fn corner(&mut self, centre: Point, r: f32, start: f32, color: Color) {
        let at = |i: usize| {
            let a = start + FRAC_PI_2 * (i as f32) / (CORNER_SEGMENTS as f32);
            Point::new(centre.x + r * a.cos(), centre.y + r * a.sin())
        };
        for i in 0..CORNER_SEGMENTS {
            self.vertices.extend_from_slice(&[
                Vertex::new(centre, Point::zero(), color),
                Vertex::new(at(i), Point::zero(), color),
                Vertex::new(at(i + 1), Point::zero(), color),
            ]);
        }
    }

    /// Submit pending vertices.
    pub fn flush(&mut self) -> Result<()> {
        if self.vertices.is_empty() {
            return Ok(());
        }
        let buffer = self.renderer.upload(&self.vertices)?;
        self.renderer.draw(buffer, self.vertices.len())?;
        self.vertices.clear();
        self.submissions += 1;
        Ok(())
    }

    /// Flush and return the number of draw submissions made.
    pub fn finish(mut self) -> Result<usize> {
        self.flush()?;
        Ok(self.submissions)
    }
}

/// Draw the tree under the top widget.
pub(crate) fn draw_tree(core: &Core, renderer: &mut dyn Renderer) -> Result<()> {
    let Some(top) = core.top else {
        return Ok(());
    };
    let mut r = Render::new(renderer);
    draw_node(core, top, &mut r)?;
    let submissions = r.finish()?;
    trace!(submissions, "frame drawn");
    Ok(())
}

/// Draw one node and its subtree.
fn draw_node(core: &Core, id: NodeId, r: &mut Render<'_>) -> Result<()> {
    let node = core.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
    let visible = node.border.intersect(&node.bounds);
    if visible.is_empty() {
        return Ok(());
    }
    if let Some(fill) = node.fill {
        r.set_clip(visible)?;
        r.fill_rect(node.border, fill.color, fill.radius)?;
    }
    if !node.clip.is_empty() {
        r.set_clip(node.clip)?;
        core.with_widget_view(id, |widget, core| {
            widget.draw(r, &CoreViewContext::new(core, id))
        })??;
        match node.stacking {
            Stacking::Sequential => {
                for child in &node.children {
                    draw_node(core, *child, r)?;
                }
            }
            Stacking::Layered => {
                for child in node.children.iter().rev() {
                    draw_node(core, *child, r)?;
                }
            }
        }
    }
    if node.scrollbar.enabled {
        r.set_clip(visible)?;
        draw_scrollbar(core, node, visible, r)?;
    }
    Ok(())
}

/// Draw the scroll overlay on each overflowing shrink-wrapped axis.
fn draw_scrollbar(core: &Core, node: &Node, visible: Rect, r: &mut Render<'_>) -> Result<()> {
    let thickness = (core.text_unit() * 0.125).max(1.0);
    for axis in Axis::ALL {
        let content = node.border.len(axis);
        let view = node.bounds.len(axis);
        if !node.layout.wrap(axis).is_shrink() || content <= view {
            continue;
        }
        let scrolled = ((node.bounds.start(axis) - node.border.start(axis)) / (content - view))
            .clamp(0.0, 1.0);
        let (track, thumb) = match axis {
            Axis::Vertical => {
                let track =
                    Rect::new(visible.right() - thickness, visible.top(), thickness, visible.h);
                let len = track.h * view / content;
                let top = track.top() + (track.h - len) * scrolled;
                (track, Rect::new(track.left(), top, thickness, len))
            }
            Axis::Horizontal => {
                let track =
                    Rect::new(visible.left(), visible.bottom() - thickness, visible.w, thickness);
                let len = track.w * view / content;
                let left = track.left() + (track.w - len) * scrolled;
                (track, Rect::new(left, track.top(), len, thickness))
            }
        };
        r.fill_rect(track, node.scrollbar.track, thickness / 2.0)?;
        r.fill_rect(thumb, node.scrollbar.thumb, thickness / 2.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metrics::DeviceMetrics,
        node::Scrollbar,
        testing::{FixedFont, RecordingRenderer, Tracker},
        widgets::LinearBox,
    };

    #[test]
    fn square_fill_is_two_triangles() -> Result<()> {
        let mut rec = RecordingRenderer::default();
        let mut r = Render::new(&mut rec);
        r.set_clip(Rect::new(0.0, 0.0, 100.0, 100.0))?;
        r.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), Color::WHITE, 0.0)?;
        assert_eq!(r.finish()?, 1);
        assert_eq!(rec.draws(), vec![6]);
        Ok(())
    }

    #[test]
    fn rounded_fill_stays_inside_rect() -> Result<()> {
        let mut rec = RecordingRenderer::default();
        let rect = Rect::new(10.0, 10.0, 40.0, 20.0);
        let mut r = Render::new(&mut rec);
        r.set_clip(rect)?;
        r.fill_rect(rect, Color::BLACK, 5.0)?;
        r.finish()?;
        let verts = rec.vertices();
        assert_eq!(verts.len(), 3 * 6 + 4 * 3 * CORNER_SEGMENTS);
        for v in verts {
            let inside = rect.inset(-0.001, -0.001);
            assert!(inside.contains(v.pos[0], v.pos[1]), "{v:?}");
        }
        Ok(())
    }

    #[test]
    fn radius_clamps_to_half_short_side() -> Result<()> {
        let mut rec = RecordingRenderer::default();
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        let mut r = Render::new(&mut rec);
        r.set_clip(rect)?;
        r.fill_rect(rect, Color::BLACK, 100.0)?;
        r.finish()?;
        // Pill shape: the side bands collapse to nothing.
        assert_eq!(rec.vertices().len(), 6 + 4 * 3 * CORNER_SEGMENTS);
        Ok(())
    }

    #[test]
    fn scissor_change_splits_submissions() -> Result<()> {
        let mut rec = RecordingRenderer::default();
        let mut r = Render::new(&mut rec);
        r.set_clip(Rect::new(0.0, 0.0, 10.0, 10.0))?;
        r.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE, 0.0)?;
        r.set_clip(Rect::new(0.0, 0.0, 10.0, 10.0))?;
        r.fill_rect(Rect::new(5.0, 5.0, 5.0, 5.0), Color::WHITE, 0.0)?;
        r.set_clip(Rect::new(0.0, 0.0, 20.0, 20.0))?;
        r.glyph(Rect::new(0.0, 0.0, 5.0, 10.0), Rect::new(0.0, 0.0, 0.1, 0.1), Color::WHITE)?;
        assert_eq!(r.finish()?, 2);
        assert_eq!(rec.draws(), vec![12, 6]);
        assert_eq!(rec.scissors().len(), 2);
        Ok(())
    }

    #[test]
    fn empty_and_transparent_fills_emit_nothing() -> Result<()> {
        let mut rec = RecordingRenderer::default();
        let mut r = Render::new(&mut rec);
        r.set_clip(Rect::new(0.0, 0.0, 10.0, 10.0))?;
        r.fill_rect(Rect::new(0.0, 0.0, 0.0, 5.0), Color::WHITE, 0.0)?;
        r.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::TRANSPARENT, 0.0)?;
        assert_eq!(r.finish()?, 0);
        Ok(())
    }

    #[test]
    fn scrollbar_thumb_tracks_offset() -> Result<()> {
        let mut c = Core::new(DeviceMetrics::new(100.0, 100.0), Box::new(FixedFont::new(10.0)));
        let list = c.add(LinearBox::vertical());
        let item = c.add(Tracker::new(80.0, 400.0));
        c.attach(list, item)?;
        c.set_top(list)?;
        let thumb = Color::new(1.0, 0.0, 0.0, 1.0);
        c.set_scrollbar(list, Scrollbar::new(Color::BLACK, thumb))?;

        let thumb_span = |c: &Core| -> Result<(f32, f32)> {
            let mut rec = RecordingRenderer::default();
            c.draw(&mut rec)?;
            let ys: Vec<f32> = rec
                .vertices()
                .iter()
                .filter(|v| v.color == thumb.to_array())
                .map(|v| v.pos[1])
                .collect();
            let lo = ys.iter().copied().fold(f32::MAX, f32::min);
            let hi = ys.iter().copied().fold(f32::MIN, f32::max);
            Ok((lo, hi))
        };

        c.update_layout()?;
        // A quarter of the content is visible.
        let (lo, hi) = thumb_span(&c)?;
        assert!(lo.abs() < 1e-3 && (hi - 25.0).abs() < 1e-3, "{lo} {hi}");

        c.drag(list, Point::new(10.0, 10.0), Point::new(0.0, -150.0))?;
        c.update_layout()?;
        let (lo, hi) = thumb_span(&c)?;
        assert!((lo - 37.5).abs() < 1e-3 && (hi - 62.5).abs() < 1e-3, "{lo} {hi}");
        Ok(())
    }

    #[test]
    fn vertex_bytes() {
        let v = [Vertex::new(Point::new(1.0, 2.0), Point::zero(), Color::WHITE)];
        assert_eq!(Vertex::as_bytes(&v).len(), 8 * 4);
        assert_eq!(Color::rgba(0xff0000ff), Color::new(1.0, 0.0, 0.0, 1.0));
    }
}
