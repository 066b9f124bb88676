use std::cell::RefCell;

use crate::{
    core::{id::NodeId, render::Color},
    geom::{Point, Rect},
    layout::Layout,
    state::NodeName,
    widget::{Stacking, Widget},
};

/// Background fill drawn behind a node's widget, covering its border rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    /// Fill colour.
    pub color: Color,
    /// Corner radius in pixels.
    pub radius: f32,
}

impl Fill {
    /// A square-cornered fill.
    pub fn solid(color: Color) -> Self {
        Self { color, radius: 0.0 }
    }

    /// A rounded fill.
    pub fn rounded(color: Color, radius: f32) -> Self {
        Self { color, radius }
    }
}

/// Scroll position overlay for nodes that overflow their clip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scrollbar {
    /// Draw the overlay.
    pub enabled: bool,
    /// Track colour.
    pub track: Color,
    /// Thumb colour.
    pub thumb: Color,
}

impl Scrollbar {
    /// An enabled scrollbar with the given accent colours.
    pub fn new(track: Color, thumb: Color) -> Self {
        Self {
            enabled: true,
            track,
            thumb,
        }
    }
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while one of the widget's own hooks
    /// is running.
    pub(crate) widget: RefCell<Option<Box<dyn Widget>>>,
    /// How the widget orders its children, cached at creation.
    pub(crate) stacking: Stacking,

    /// Owning container, if attached.
    pub(crate) parent: Option<NodeId>,
    /// Children in container order.
    pub(crate) children: Vec<NodeId>,

    /// Layout configuration.
    pub(crate) layout: Layout,

    /// Outer rect, including insets, in viewport pixels.
    pub(crate) border: Rect,
    /// Border rect shrunk by the insets.
    pub(crate) draw: Rect,
    /// Draw rect intersected with the parent clip.
    pub(crate) clip: Rect,
    /// The parent clip this node was last positioned against.
    pub(crate) bounds: Rect,
    /// Accumulated drag offset on shrink-wrapped axes.
    pub(crate) offset: Point,

    /// Optional background fill.
    pub(crate) fill: Option<Fill>,
    /// Scroll overlay settings.
    pub(crate) scrollbar: Scrollbar,
    /// Play audio feedback when this node consumes a tap.
    pub(crate) sound: bool,
    /// Debug name.
    pub(crate) name: NodeName,
}

impl Node {
    /// Create a detached node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        let layout = widget.layout();
        let stacking = widget.stacking();
        let name = widget.name();
        Self {
            widget: RefCell::new(Some(widget)),
            stacking,
            parent: None,
            children: Vec::new(),
            layout,
            border: Rect::zero(),
            draw: Rect::zero(),
            clip: Rect::zero(),
            bounds: Rect::zero(),
            offset: Point::zero(),
            fill: None,
            scrollbar: Scrollbar::default(),
            sound: false,
            name,
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout configuration.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Outer rect including insets.
    pub fn border(&self) -> Rect {
        self.border
    }

    /// Content rect.
    pub fn draw_rect(&self) -> Rect {
        self.draw
    }

    /// Visible part of the content rect.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// The parent clip from the last positioning pass.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Stored drag offset.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Background fill.
    pub fn fill(&self) -> Option<Fill> {
        self.fill
    }

    /// Scroll overlay settings.
    pub fn scrollbar(&self) -> Scrollbar {
        self.scrollbar
    }

    /// Is audio feedback enabled?
    pub fn sound(&self) -> bool {
        self.sound
    }

    /// Child ordering of the widget.
    pub fn stacking(&self) -> Stacking {
        self.stacking
    }

    /// Hit region: the border rect limited to the visible clip.
    pub fn hit_rect(&self) -> Rect {
        self.border.intersect(&self.clip)
    }
}
