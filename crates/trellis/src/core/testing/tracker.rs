use std::time::Duration;

use crate::{
    Context,
    error::Result,
    event::{Key, PointerState},
    geom::{Expanse, Point},
    layout::Layout,
    widget::{EventOutcome, Widget},
};

/// A leaf widget with a fixed content size that records every hook call.
///
/// Key presses are always consumed. Clicks are consumed only if the tracker
/// was built with [`consuming`](Self::consuming).
#[derive(Debug, Clone)]
pub struct Tracker {
    /// Content size reported from measure.
    pub size: Expanse,
    /// Initial layout.
    layout: Layout,
    /// Consume clicks.
    consume: bool,
    /// Claim the move capture on press.
    capture: bool,
    /// Draw sizes offered to measure.
    pub measured: Vec<Expanse>,
    /// Clicks received.
    pub clicks: Vec<(PointerState, Point)>,
    /// Drag deltas received.
    pub drags: Vec<Point>,
    /// Captured moves received.
    pub moves: Vec<Point>,
    /// Captured releases received.
    pub releases: Vec<Point>,
    /// Keys received.
    pub keys: Vec<Key>,
    /// Refresh calls received.
    pub refreshes: usize,
}

impl Tracker {
    /// A shrink-wrapped tracker of the given content size.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            size: Expanse::new(w, h),
            layout: Layout::shrink(),
            consume: false,
            capture: false,
            measured: Vec::new(),
            clicks: Vec::new(),
            drags: Vec::new(),
            moves: Vec::new(),
            releases: Vec::new(),
            keys: Vec::new(),
            refreshes: 0,
        }
    }

    /// Replace the initial layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Consume clicks.
    pub fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }

    /// Consume clicks and claim the move capture on press.
    pub fn capturing(mut self) -> Self {
        self.consume = true;
        self.capture = true;
        self
    }
}

impl Widget for Tracker {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn measure(&mut self, draw: Expanse, _ctx: &mut dyn Context) -> Result<Option<Expanse>> {
        self.measured.push(draw);
        Ok(Some(self.size))
    }

    fn on_click(
        &mut self,
        state: PointerState,
        p: Point,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        self.clicks.push((state, p));
        if self.capture && state == PointerState::Down {
            ctx.capture_move();
        }
        Ok(if self.consume {
            EventOutcome::Consume
        } else {
            EventOutcome::Ignore
        })
    }

    fn on_drag(&mut self, _from: Point, delta: Point, _ctx: &mut dyn Context) -> Result<()> {
        self.drags.push(delta);
        Ok(())
    }

    fn on_move(&mut self, p: Point, _ctx: &mut dyn Context) -> Result<()> {
        self.moves.push(p);
        Ok(())
    }

    fn on_release(&mut self, p: Point, _ctx: &mut dyn Context) -> Result<()> {
        self.releases.push(p);
        Ok(())
    }

    fn on_key(&mut self, key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.keys.push(key);
        Ok(EventOutcome::Consume)
    }

    fn refresh(&mut self, _dt: Duration, _ctx: &mut dyn Context) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }
}
