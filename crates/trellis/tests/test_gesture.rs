//! Integration tests for pointer gestures, capture and kinetic scrolling.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use trellis::{
        Core, NodeId, Widget,
        error::{Error, Result},
        event::{Event, Key, Pointer, PointerAction, PointerState},
        geom::Point,
        gesture::GestureState,
        layout::Layout,
        logging,
        testing::{CountingFeedback, Harness, Tracker},
        widget::EventOutcome,
        widgets::{Button, Layer, LinearBox},
    };

    fn offset(c: &Core, id: NodeId) -> Result<Point> {
        Ok(c.node(id).ok_or(Error::NodeNotFound(id))?.offset())
    }

    fn tracker<R>(c: &Core, id: NodeId, f: impl FnOnce(&Tracker) -> R) -> Result<R> {
        c.widget::<Tracker, _>(id, f)
    }

    /// A vertical list holding one tall item in a 100x100 viewport.
    fn scroller(h: &mut Harness) -> Result<(NodeId, NodeId)> {
        let c = h.core();
        let list = c.add(LinearBox::vertical());
        let item = c.add(Tracker::new(80.0, 400.0).consuming());
        c.attach(list, item)?;
        h.screen.set_top(list)?;
        h.frame()?;
        Ok((list, item))
    }

    #[test]
    fn layer_delivers_taps_to_the_front_child() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let c = h.core();
        let layer = c.add(Layer::new());
        let back = c.add(Tracker::new(100.0, 100.0).consuming());
        let front = c.add(Tracker::new(40.0, 40.0).consuming());
        c.attach(layer, back)?;
        c.attach(layer, front)?;
        h.screen.set_top(layer)?;
        h.frame()?;

        h.press(10.0, 10.0)?;
        assert_eq!(h.screen.gesture_state(), GestureState::Down);
        h.release(10.0, 10.0)?;
        let states = tracker(&h.screen.core, front, |p| {
            p.clicks.iter().map(|c| c.0).collect::<Vec<_>>()
        })?;
        assert_eq!(states, vec![PointerState::Down, PointerState::Up]);
        assert!(tracker(&h.screen.core, back, |p| p.clicks.is_empty())?);

        let p = Point::new(20.0, 20.0);
        assert_eq!(
            h.core().click(layer, PointerState::Down, p)?,
            EventOutcome::Consume
        );
        assert!(tracker(&h.screen.core, back, |p| p.clicks.is_empty())?);

        // Outside the front child the back one gets the tap.
        h.tap(80.0, 80.0)?;
        assert_eq!(tracker(&h.screen.core, back, |p| p.clicks.len())?, 2);
        assert_eq!(tracker(&h.screen.core, front, |p| p.clicks.len())?, 3);
        Ok(())
    }

    #[test]
    fn press_and_release_in_place_scrolls_nothing() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let (list, item) = scroller(&mut h)?;
        h.tap(40.0, 40.0)?;
        h.frame()?;
        assert_eq!(offset(&h.screen.core, list)?, Point::zero());
        assert_eq!(offset(&h.screen.core, item)?, Point::zero());
        assert!(h.screen.velocity().is_zero());
        assert_eq!(tracker(&h.screen.core, item, |p| p.clicks.len())?, 2);
        Ok(())
    }

    #[test]
    fn jitter_below_threshold_is_a_tap() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let (list, item) = scroller(&mut h)?;
        h.press(40.0, 40.0)?;
        h.advance(Duration::from_millis(30));
        h.move_to(41.0, 41.5)?;
        assert_eq!(h.screen.gesture_state(), GestureState::Down);
        h.release(41.0, 41.5)?;
        let clicks = tracker(&h.screen.core, item, |p| p.clicks.clone())?;
        assert_eq!(clicks.last().map(|c| c.0), Some(PointerState::Up));
        assert_eq!(offset(&h.screen.core, list)?, Point::zero());
        Ok(())
    }

    #[test]
    fn fling_decays_to_rest() -> Result<()> {
        logging::init_test();
        let mut h = Harness::new(100.0, 100.0);
        let (list, item) = scroller(&mut h)?;
        h.drag((50.0, 90.0), (50.0, 10.0), 8)?;
        assert_eq!(h.screen.gesture_state(), GestureState::Up);
        // The first sample only crosses the threshold at y=80.
        assert_eq!(offset(&h.screen.core, list)?, Point::new(0.0, -70.0));
        assert!(h.screen.velocity().y < 0.0);
        // A drag is not a tap.
        assert_eq!(tracker(&h.screen.core, item, |p| p.clicks.len())?, 1);

        let mut last = offset(&h.screen.core, list)?.y;
        let mut speed = h.screen.velocity().length();
        let mut frames = 0;
        while !h.screen.velocity().is_zero() {
            h.frame()?;
            let y = offset(&h.screen.core, list)?.y;
            assert!(y <= last, "scroll reversed: {y} after {last}");
            last = y;
            let next = h.screen.velocity().length();
            assert!(next <= speed, "speed rose: {next} after {speed}");
            speed = next;
            frames += 1;
            assert!(frames < 200, "kinetic scroll never stopped");
        }
        assert!(last < -70.0);
        assert!(last >= -300.0);
        assert_eq!(h.settle(10)?, 0);
        Ok(())
    }

    #[test]
    fn press_stops_a_fling() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let (list, _) = scroller(&mut h)?;
        h.drag((50.0, 90.0), (50.0, 10.0), 8)?;
        h.frame()?;
        h.press(50.0, 50.0)?;
        assert!(h.screen.velocity().is_zero());
        let y = offset(&h.screen.core, list)?.y;
        h.frame()?;
        assert_eq!(offset(&h.screen.core, list)?.y, y);
        Ok(())
    }

    #[test]
    fn fling_is_clamped_at_the_end() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let (list, _) = scroller(&mut h)?;
        for _ in 0..6 {
            h.drag((50.0, 95.0), (50.0, 5.0), 3)?;
            h.settle(200)?;
        }
        assert_eq!(offset(&h.screen.core, list)?.y, -300.0);
        Ok(())
    }

    #[test]
    fn captured_moves_bypass_drag() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let c = h.core();
        let list = c.add(LinearBox::vertical());
        let handle = c.add(Tracker::new(50.0, 50.0).capturing());
        let tall = c.add(Tracker::new(50.0, 400.0));
        c.attach(list, handle)?;
        c.attach(list, tall)?;
        h.screen.set_top(list)?;
        h.frame()?;

        h.press(10.0, 10.0)?;
        assert_eq!(h.screen.core.captured(), Some(handle));
        h.move_to(30.0, 30.0)?;
        assert_eq!(h.screen.gesture_state(), GestureState::Dragging);
        h.advance(Duration::from_millis(16));
        h.move_to(40.0, 40.0)?;
        h.release(40.0, 40.0)?;

        let c = &h.screen.core;
        assert_eq!(tracker(c, handle, |p| p.moves.clone())?, vec![Point::new(40.0, 40.0)]);
        assert_eq!(tracker(c, handle, |p| p.releases.clone())?, vec![Point::new(40.0, 40.0)]);
        assert!(tracker(c, handle, |p| p.drags.is_empty())?);
        assert_eq!(tracker(c, handle, |p| p.clicks.len())?, 1);
        assert_eq!(c.captured(), None);
        assert_eq!(offset(c, list)?, Point::zero());
        assert!(h.screen.velocity().is_zero());
        Ok(())
    }

    #[test]
    fn consumed_tap_plays_a_sound() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let audio = CountingFeedback::default();
        h.core().set_audio(Box::new(audio.clone()));
        let c = h.core();
        let list = c.add(LinearBox::vertical().with_layout(Layout::fill()));
        let button = c.add(Button::new("go"));
        let quiet = c.add(Button::new("no"));
        c.attach(list, button)?;
        c.attach(list, quiet)?;
        c.set_sound(button, true)?;
        h.screen.set_top(list)?;
        h.frame()?;

        h.tap(2.0, 2.0)?;
        assert_eq!(audio.count(), 1);
        assert_eq!(h.screen.core.widget::<Button, _>(button, |b| b.presses())?, 1);

        // The second button sits below the first.
        h.tap(2.0, 15.0)?;
        assert_eq!(audio.count(), 1);
        assert_eq!(h.screen.core.widget::<Button, _>(quiet, |b| b.presses())?, 1);

        // A press that turns into a drag never sounds.
        h.drag((2.0, 2.0), (2.0, 60.0), 4)?;
        assert_eq!(audio.count(), 1);
        Ok(())
    }

    #[test]
    fn frames_refresh_every_displayed_node() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let (_, item) = scroller(&mut h)?;
        let loose = h.core().add(Tracker::new(1.0, 1.0));
        h.frame()?;
        h.frame()?;
        assert_eq!(tracker(&h.screen.core, item, |p| p.refreshes)?, 3);
        assert_eq!(tracker(&h.screen.core, loose, |p| p.refreshes)?, 0);
        Ok(())
    }

    #[test]
    fn host_events_dispatch() -> Result<()> {
        let mut h = Harness::new(100.0, 100.0);
        let (_, item) = scroller(&mut h)?;
        let s = &mut h.screen;
        s.event(Pointer::new(PointerAction::Down, 5.0, 5.0, Duration::ZERO).into())?;
        s.event(Pointer::new(PointerAction::Move, 5.5, 5.0, Duration::from_millis(10)).into())?;
        s.event(Pointer::new(PointerAction::Up, 5.5, 5.0, Duration::from_millis(20)).into())?;
        assert_eq!(tracker(&s.core, item, |p| p.clicks.len())?, 2);
        assert_eq!(s.gesture_time(), Duration::from_millis(20));

        // Keys need focus.
        s.event(Event::Key(Key::from('a')))?;
        assert!(tracker(&s.core, item, |p| p.keys.is_empty())?);
        assert!(s.set_focus(item));
        s.event(Event::Key(Key::from('a')))?;
        let keys = tracker(&s.core, item, |p| p.keys.clone())?;
        assert_eq!(keys.len(), 1);
        assert!(keys[0] == 'a');
        Ok(())
    }

    #[test]
    fn tracker_names_itself() {
        assert_eq!(Tracker::new(1.0, 1.0).name(), "Tracker");
    }
}
