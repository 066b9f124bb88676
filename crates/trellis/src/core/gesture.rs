//! Pointer gesture state machine: tap, drag and kinetic scroll.

use std::time::Duration;

use tracing::debug;

use super::{event::PointerState, world::Core};
use crate::{error::Result, geom::Point, widget::EventOutcome};

/// Where the pointer is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Up,
    /// The pointer is down and has not moved past the motion threshold.
    Down,
    /// The pointer is down and moving.
    Dragging,
}

/// Gesture controller. Turns raw pointer samples into clicks, drags and
/// kinetic scrolling.
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    /// Current state.
    state: GestureState,
    /// Reference point: the press location, then the last accepted drag
    /// sample.
    position: Point,
    /// Timestamp of the last accepted sample, including the release.
    time: Duration,
    /// Drag velocity in pixels per second.
    velocity: Point,
}

impl Gesture {
    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Current velocity in pixels per second.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Timestamp of the last pointer sample the controller accepted.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Pointer pressed. Always halts kinetic decay. Starts a gesture only if
    /// there is a top widget and it consumes the press.
    pub fn pointer_down(&mut self, core: &mut Core, p: Point, time: Duration) -> Result<()> {
        self.velocity = Point::zero();
        if self.state != GestureState::Up {
            return Ok(());
        }
        let Some(top) = core.top() else {
            return Ok(());
        };
        if core.click(top, PointerState::Down, p)? == EventOutcome::Consume {
            self.state = GestureState::Down;
            self.position = p;
            self.time = time;
            debug!(?p, "gesture down");
        }
        Ok(())
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, core: &mut Core, p: Point, time: Duration) -> Result<()> {
        match self.state {
            GestureState::Up => Ok(()),
            GestureState::Down => {
                let threshold = core.config().motion_threshold * core.text_unit();
                if (p - self.position).length() < threshold {
                    return Ok(());
                }
                self.state = GestureState::Dragging;
                self.position = p;
                self.time = time;
                self.velocity = Point::zero();
                debug!(?p, "gesture dragging");
                Ok(())
            }
            GestureState::Dragging => self.drag_sample(core, p, time),
        }
    }

    /// Handle a move sample while dragging.
    fn drag_sample(&mut self, core: &mut Core, p: Point, time: Duration) -> Result<()> {
        let elapsed = time.saturating_sub(self.time);
        if elapsed < core.config().min_sample_interval {
            return Ok(());
        }
        if core.captured().is_some() {
            core.move_captured(p)?;
        } else if let Some(top) = core.top() {
            let delta = p - self.position;
            core.drag(top, self.position, delta)?;
            let secs = elapsed.as_secs_f32();
            if secs > 0.0 {
                self.velocity = delta.scale(1.0 / secs);
            }
        }
        self.position = p;
        self.time = time;
        core.mark_dirty();
        Ok(())
    }

    /// Pointer lifted. Ends any gesture: a press that never moved becomes a
    /// tap on the top widget, and a captured move gets its release.
    pub fn pointer_up(&mut self, core: &mut Core, p: Point, time: Duration) -> Result<()> {
        let previous = self.state;
        self.state = GestureState::Up;
        if previous != GestureState::Up {
            self.time = time;
        }
        if core.captured().is_some() {
            core.release_captured(p)?;
        } else if previous == GestureState::Down
            && let Some(top) = core.top()
        {
            core.click(top, PointerState::Up, p)?;
        }
        if previous != GestureState::Up {
            debug!(?p, ?previous, "gesture up");
        }
        core.mark_dirty();
        Ok(())
    }

    /// Advance kinetic scrolling by one frame. Only runs while the pointer is
    /// up and the velocity is nonzero.
    pub fn decay(&mut self, core: &mut Core, dt: Duration) -> Result<()> {
        if self.state != GestureState::Up || self.velocity.is_zero() {
            return Ok(());
        }
        let Some(top) = core.top() else {
            self.velocity = Point::zero();
            return Ok(());
        };
        let secs = dt.as_secs_f32();
        core.drag(top, self.position, self.velocity.scale(secs))?;

        let config = core.config();
        let range = core.metrics().viewport.diagonal() * config.kinetic_range;
        let speed = self.velocity.length();
        let slowed = speed.min(range) - range * config.kinetic_deceleration * secs;
        if slowed < config.kinetic_epsilon {
            self.velocity = Point::zero();
            debug!("kinetic scroll stopped");
        } else {
            self.velocity = self.velocity.scale(slowed / speed);
        }
        core.mark_dirty();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        NodeId,
        metrics::DeviceMetrics,
        testing::{FixedFont, Tracker},
        widgets::LinearBox,
    };

    /// A 100x100 viewport showing a list taller than the screen.
    fn scroller() -> Result<(Core, NodeId, NodeId)> {
        let mut c = Core::new(DeviceMetrics::new(100.0, 100.0), Box::new(FixedFont::new(10.0)));
        let list = c.add(LinearBox::vertical());
        let item = c.add(Tracker::new(80.0, 400.0).consuming());
        c.attach(list, item)?;
        c.set_top(list)?;
        c.update_layout()?;
        Ok((c, list, item))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn small_motion_stays_down() -> Result<()> {
        let (mut c, _, item) = scroller()?;
        let mut g = Gesture::default();
        g.pointer_down(&mut c, Point::new(10.0, 10.0), ms(0))?;
        assert_eq!(g.state(), GestureState::Down);
        // Threshold is a quarter of the 10px text unit.
        g.pointer_move(&mut c, Point::new(11.0, 11.0), ms(20))?;
        assert_eq!(g.state(), GestureState::Down);
        g.pointer_up(&mut c, Point::new(11.0, 11.0), ms(40))?;
        assert_eq!(g.state(), GestureState::Up);
        assert_eq!(g.time(), ms(40));
        let clicks = c.widget::<Tracker, _>(item, |p| p.clicks.clone())?;
        assert_eq!(clicks.len(), 2);
        assert_eq!(clicks[1].0, PointerState::Up);
        Ok(())
    }

    #[test]
    fn unconsumed_press_does_not_start_a_gesture() -> Result<()> {
        let mut c = Core::new(DeviceMetrics::new(100.0, 100.0), Box::new(FixedFont::new(10.0)));
        let tracker = c.add(Tracker::new(10.0, 10.0));
        c.set_top(tracker)?;
        c.update_layout()?;
        let mut g = Gesture::default();
        g.pointer_down(&mut c, Point::new(5.0, 5.0), ms(0))?;
        assert_eq!(g.state(), GestureState::Up);
        // A stray release outside a gesture leaves the last sample alone.
        g.pointer_up(&mut c, Point::new(5.0, 5.0), ms(90))?;
        assert_eq!(g.time(), Duration::ZERO);
        Ok(())
    }

    #[test]
    fn drag_scrolls_and_tracks_velocity() -> Result<()> {
        let (mut c, list, _) = scroller()?;
        let mut g = Gesture::default();
        g.pointer_down(&mut c, Point::new(50.0, 80.0), ms(0))?;
        g.pointer_move(&mut c, Point::new(50.0, 70.0), ms(10))?;
        assert_eq!(g.state(), GestureState::Dragging);
        // Too soon after the last accepted sample.
        g.pointer_move(&mut c, Point::new(50.0, 60.0), ms(15))?;
        assert_eq!(c.node(list).map(|n| n.offset()), Some(Point::zero()));

        g.pointer_move(&mut c, Point::new(50.0, 50.0), ms(30))?;
        assert_eq!(c.node(list).map(|n| n.offset()), Some(Point::new(0.0, -20.0)));
        assert!((g.velocity().y + 1000.0).abs() < 0.1);
        assert_eq!(g.velocity().x, 0.0);
        assert!(c.is_dirty());
        Ok(())
    }

    #[test]
    fn press_halts_decay() -> Result<()> {
        let (mut c, _, _) = scroller()?;
        let mut g = Gesture {
            velocity: Point::new(0.0, -50.0),
            ..Gesture::default()
        };
        g.pointer_down(&mut c, Point::new(10.0, 10.0), ms(0))?;
        assert!(g.velocity().is_zero());
        Ok(())
    }

    #[test]
    fn decay_clamps_to_range_and_stops() -> Result<()> {
        let (mut c, _, _) = scroller()?;
        let mut g = Gesture {
            velocity: Point::new(0.0, -10_000.0),
            position: Point::new(50.0, 50.0),
            ..Gesture::default()
        };
        let range = c.metrics().viewport.diagonal();
        g.decay(&mut c, ms(100))?;
        let expected = range - range * 2.0 * 0.1;
        assert!((g.velocity().length() - expected).abs() < 1e-2);

        for _ in 0..10 {
            g.decay(&mut c, ms(100))?;
        }
        assert!(g.velocity().is_zero());
        Ok(())
    }
}
