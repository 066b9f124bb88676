//! Input events that cross into the engine.

/// Keyboard input.
pub mod key;
/// Pointer input.
pub mod pointer;

pub use key::{Key, KeyCode, Mods};
pub use pointer::{Pointer, PointerAction, PointerState};

/// An input event delivered to a [`Screen`](crate::Screen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer sample.
    Pointer(Pointer),
    /// A key press, routed to the focused node.
    Key(Key),
}

impl From<Pointer> for Event {
    fn from(p: Pointer) -> Self {
        Self::Pointer(p)
    }
}

impl From<Key> for Event {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}
