use std::{cell::Cell, rc::Rc};

use crate::backend::AudioFeedback;

/// Audio double that counts clicks. Clones share the count, so a test can
/// keep one handle and install the other.
#[derive(Debug, Clone, Default)]
pub struct CountingFeedback {
    /// Shared click count.
    clicks: Rc<Cell<usize>>,
}

impl CountingFeedback {
    /// Clicks played so far.
    pub fn count(&self) -> usize {
        self.clicks.get()
    }
}

impl AudioFeedback for CountingFeedback {
    fn click(&mut self) {
        self.clicks.set(self.clicks.get() + 1);
    }
}
