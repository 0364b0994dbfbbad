//! Quiet-period debouncing for rapidly changing values.

use std::time::Duration;
use tokio::time::Instant;

/// Holds the latest input until it has been quiet for a while.
///
/// Every [`push`](Debouncer::push) restarts the quiet period, so under
/// continuous input [`poll`](Debouncer::poll) never yields anything. The owner
/// drives it: wait until [`deadline`](Debouncer::deadline), then poll.
/// Dropping or [`cancel`](Debouncer::cancel)ling discards the pending value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a new raw value received at `now`
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// When the pending value settles, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period is over
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if *at <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop the pending value without settling it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
