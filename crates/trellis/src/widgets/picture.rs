use tracing::warn;

use crate::{
    ViewContext,
    backend::ImageHandle,
    error::Result,
    layout::{Layout, TextMetric, TextTier},
    render::{Color, Render},
    widget::Widget,
};

/// One of a set of images, drawn as a textured quad over the draw rect.
pub struct Picture {
    /// Available images.
    images: Vec<ImageHandle>,
    /// Index of the displayed image.
    selected: usize,
    /// Width to height ratio of the images.
    aspect: Option<f32>,
    /// Colour multiplied into the texture.
    tint: Color,
    /// Initial layout.
    layout: Layout,
}

impl Picture {
    /// A picture one text line tall, showing the first image.
    pub fn new(images: Vec<ImageHandle>) -> Self {
        Self {
            images,
            selected: 0,
            aspect: None,
            tint: Color::WHITE,
            layout: Layout::shrink()
                .text_horizontal(TextTier::Normal, TextMetric::Height, 1.0)
                .text_vertical(TextTier::Normal, TextMetric::Height, 1.0),
        }
    }

    /// Set the image aspect ratio used for text-relative widths.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// Set the tint.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Index of the displayed image.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Show a different image. An out-of-range index is logged and ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            warn!(index, count = self.images.len(), "picture index out of range");
            return false;
        }
        self.selected = index;
        true
    }
}

impl Widget for Picture {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn aspect(&self) -> Option<f32> {
        self.aspect
    }

    fn draw(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        match self.images.get(self.selected) {
            Some(image) => r.image(ctx.draw_rect(), *image, self.tint),
            None => Ok(()),
        }
    }
}
