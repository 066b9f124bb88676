use std::time::Duration;

use crate::geom::Point;

/// Pointer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Pressed.
    Down,
    /// Moved while pressed.
    Move,
    /// Released.
    Up,
}

/// The click phase delivered to hit testing. Moves are never hit tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerState {
    /// Pointer pressed.
    Down,
    /// Pointer released.
    Up,
}

/// A single pointer sample with a monotonic timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Phase of the sample.
    pub action: PointerAction,
    /// Location in viewport pixels.
    pub location: Point,
    /// Monotonic timestamp.
    pub time: Duration,
}

impl Pointer {
    /// Construct a sample.
    pub fn new(action: PointerAction, x: f32, y: f32, time: Duration) -> Self {
        Self {
            action,
            location: Point::new(x, y),
            time,
        }
    }
}
