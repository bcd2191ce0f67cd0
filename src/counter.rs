//! The click counter used by the `layout-counter` program.

use std::fmt::{self, Display};

use crate::toolkit::TextDisplay;

/// The number of clicks received since the program started.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClickCounter(u64);

impl ClickCounter {
    /// Returns a counter that has not seen any clicks.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the current count.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Records one click and returns the new count.
    pub fn increment(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

impl Display for ClickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Increments a [`ClickCounter`] and shows the new count on a display.
///
/// The display is resolved before the handler exists, so a click can never
/// observe a missing label. Until the first click the display keeps whatever
/// text it was created with.
#[derive(Debug)]
pub struct CounterHandler<Label> {
    counter: ClickCounter,
    display: Label,
}

impl<D> CounterHandler<D>
where
    D: TextDisplay,
{
    /// Returns a handler that writes the count to `display`.
    pub const fn new(display: D) -> Self {
        Self {
            counter: ClickCounter::new(),
            display,
        }
    }

    /// Handles one click.
    pub fn handle_click(&mut self) {
        let count = self.counter.increment();
        tracing::debug!(count, "counter clicked");
        self.display.set_text(self.counter.to_string());
    }

    /// Returns the number of clicks handled so far.
    #[must_use]
    pub const fn count(&self) -> ClickCounter {
        self.counter
    }

    /// Returns the display this handler updates.
    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }
}
