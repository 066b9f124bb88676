use std::time::Duration;

use tracing::trace;

use super::{
    backend::{FontMetrics, Renderer},
    event::{Event, Key, PointerAction},
    gesture::{Gesture, GestureState},
    id::NodeId,
    metrics::DeviceMetrics,
    world::Core,
};
use crate::{error::Result, geom::Point, widget::EventOutcome};

/// Root controller. Owns the arena and the gesture controller, and is the
/// entry point for host input and the per-frame update.
pub struct Screen {
    /// Arena and tree state.
    pub core: Core,
    /// Pointer gesture state.
    gesture: Gesture,
}

impl Screen {
    /// Create a screen with an empty arena.
    pub fn new(metrics: DeviceMetrics, fonts: Box<dyn FontMetrics>) -> Self {
        Self {
            core: Core::new(metrics, fonts),
            gesture: Gesture::default(),
        }
    }

    /// Pointer pressed at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32, time: Duration) -> Result<()> {
        self.gesture
            .pointer_down(&mut self.core, Point::new(x, y), time)
    }

    /// Pointer moved to `(x, y)` while pressed.
    pub fn pointer_move(&mut self, x: f32, y: f32, time: Duration) -> Result<()> {
        self.gesture
            .pointer_move(&mut self.core, Point::new(x, y), time)
    }

    /// Pointer lifted at `(x, y)`.
    pub fn pointer_up(&mut self, x: f32, y: f32, time: Duration) -> Result<()> {
        self.gesture
            .pointer_up(&mut self.core, Point::new(x, y), time)
    }

    /// Deliver a key press to the focused node.
    pub fn key_press(&mut self, key: impl Into<Key>) -> Result<EventOutcome> {
        self.core.key(key.into())
    }

    /// Dispatch a host event.
    pub fn event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Pointer(p) => match p.action {
                PointerAction::Down => self.pointer_down(p.location.x, p.location.y, p.time),
                PointerAction::Move => self.pointer_move(p.location.x, p.location.y, p.time),
                PointerAction::Up => self.pointer_up(p.location.x, p.location.y, p.time),
            },
            Event::Key(k) => self.key_press(k).map(|_| ()),
        }
    }

    /// Run one frame: refresh hooks, kinetic decay, re-layout if anything
    /// changed, then draw.
    pub fn frame(&mut self, dt: Duration, renderer: &mut dyn Renderer) -> Result<()> {
        self.core.refresh(dt)?;
        self.gesture.decay(&mut self.core, dt)?;
        if self.core.is_dirty() {
            trace!("relayout");
            self.core.update_layout()?;
        }
        self.core.draw(renderer)
    }

    /// Display a detached node as the root of the visible tree.
    pub fn set_top(&mut self, id: NodeId) -> Result<()> {
        self.core.set_top(id)
    }

    /// Replace the device metrics.
    pub fn set_metrics(&mut self, metrics: DeviceMetrics) {
        self.core.set_metrics(metrics);
    }

    /// Route key presses to a node.
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        self.core.set_focus(id)
    }

    /// Stop routing key presses.
    pub fn clear_focus(&mut self) {
        self.core.clear_focus();
    }

    /// Current gesture state.
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Current kinetic velocity in pixels per second.
    pub fn velocity(&self) -> Point {
        self.gesture.velocity()
    }

    /// Timestamp of the last pointer sample the gesture controller accepted.
    pub fn gesture_time(&self) -> Duration {
        self.gesture.time()
    }
}
