//! Test doubles for the host collaborators, a tracker widget and a harness
//! that drives a [`Screen`](crate::Screen) through simulated time.

/// Counting audio double.
pub mod audio;
/// Monospace font double.
pub mod font;
/// Screen harness.
pub mod harness;
/// Recording renderer double.
pub mod renderer;
/// Recording tracker widget.
pub mod tracker;

pub use audio::CountingFeedback;
pub use font::FixedFont;
pub use harness::Harness;
pub use renderer::{Command, RecordingRenderer};
pub use tracker::Tracker;
