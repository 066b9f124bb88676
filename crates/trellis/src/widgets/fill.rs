use crate::{Context, error::Result, geom::Expanse, layout::Layout, widget::Widget};

/// A plain box. It draws nothing itself; give its node a fill to see it.
///
/// Without a natural size, a shrink-wrapped `Fill` takes whatever its parent
/// offers.
pub struct Fill {
    /// Initial layout.
    layout: Layout,
    /// Width to height ratio for text-relative widths.
    aspect: Option<f32>,
    /// Content size reported on shrink-wrapped axes.
    natural: Option<Expanse>,
}

impl Fill {
    /// A shrink-wrapped box.
    pub fn new() -> Self {
        Self {
            layout: Layout::shrink(),
            aspect: None,
            natural: None,
        }
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Scale text-relative widths by a ratio.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// Report a fixed content size.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.natural = Some(Expanse::new(w, h));
        self
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Fill {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn aspect(&self) -> Option<f32> {
        self.aspect
    }

    fn measure(&mut self, _draw: Expanse, _ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        Ok(self.natural)
    }
}
