//! Cooperative debounce timer.
//!
//! Converts a rapidly changing input into a stable value that only
//! updates once the input has sat unchanged for the full delay. Single
//! threaded: the owner passes `now` explicitly and polls on its own
//! cadence, so there is no timer thread to race and cancellation is
//! exact. A superseded pending value can never settle.

use std::time::{Duration, Instant};

/// Default debounce delay for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A debounced value of type `T`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Start with an already-settled value and the default delay.
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEFAULT_DEBOUNCE)
    }

    /// Start with an already-settled value and an explicit delay.
    pub fn with_delay(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// The current settled value.
    pub fn value(&self) -> &T {
        &self.settled
    }

    /// Whether an update is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending update is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Feed a new raw input. Replaces any pending update and restarts
    /// the timer; feeding the settled value back cancels the pending
    /// update entirely.
    pub fn input(&mut self, value: T, now: Instant) {
        if value == self.settled {
            self.pending = None;
            return;
        }
        self.pending = Some((value, now + self.delay));
    }

    /// Advance the timer. Settles and returns the pending value exactly
    /// once when its deadline has passed; `None` otherwise.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if !due {
            return None;
        }
        let (value, _) = self.pending.take()?;
        self.settled = value;
        Some(&self.settled)
    }
}
