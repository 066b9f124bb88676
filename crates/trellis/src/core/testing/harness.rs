use std::time::Duration;

use super::{font::FixedFont, renderer::RecordingRenderer};
use crate::{Core, Screen, error::Result, metrics::DeviceMetrics};

/// Simulated time between frames.
pub const FRAME: Duration = Duration::from_millis(16);

/// A [`Screen`] with a [`FixedFont`] of 10px lines, a recording renderer and
/// a simulated clock. Tests drive it with pointer gestures and frames, then
/// inspect the tree or the recorded draw commands.
pub struct Harness {
    /// Screen under test.
    pub screen: Screen,
    /// Commands from the most recent frame.
    pub renderer: RecordingRenderer,
    /// Simulated clock.
    now: Duration,
}

impl Harness {
    /// Create a harness with a viewport of the given size.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            screen: Screen::new(DeviceMetrics::new(w, h), Box::new(FixedFont::new(10.0))),
            renderer: RecordingRenderer::default(),
            now: Duration::ZERO,
        }
    }

    /// The arena.
    pub fn core(&mut self) -> &mut Core {
        &mut self.screen.core
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward without running a frame.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Advance the clock by one frame interval and run a frame.
    pub fn frame(&mut self) -> Result<()> {
        self.now += FRAME;
        self.renderer.clear();
        self.screen.frame(FRAME, &mut self.renderer)
    }

    /// Run frames until the kinetic velocity reaches zero or `limit` frames
    /// have passed. Returns the number of frames run.
    pub fn settle(&mut self, limit: usize) -> Result<usize> {
        for n in 0..limit {
            if self.screen.velocity().is_zero() {
                return Ok(n);
            }
            self.frame()?;
        }
        Ok(limit)
    }

    /// Press the pointer at the current time.
    pub fn press(&mut self, x: f32, y: f32) -> Result<()> {
        self.screen.pointer_down(x, y, self.now)
    }

    /// Move the pointer at the current time.
    pub fn move_to(&mut self, x: f32, y: f32) -> Result<()> {
        self.screen.pointer_move(x, y, self.now)
    }

    /// Lift the pointer at the current time.
    pub fn release(&mut self, x: f32, y: f32) -> Result<()> {
        self.screen.pointer_up(x, y, self.now)
    }

    /// Press and release in place.
    pub fn tap(&mut self, x: f32, y: f32) -> Result<()> {
        self.press(x, y)?;
        self.release(x, y)
    }

    /// Press at `from`, move to `to` in `steps` equal samples one frame
    /// apart, running a frame after each, then release at `to`. The first
    /// sample only crosses the motion threshold, so the scroll applied is
    /// the distance from there to `to`.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) -> Result<()> {
        self.press(from.0, from.1)?;
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)?;
            self.frame()?;
        }
        self.release(to.0, to.1)
    }
}
