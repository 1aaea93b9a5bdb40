//! # Throttle policy for dispatched summaries.
//!
//! [`Throttle`] enforces a minimum gap between two batches handed to the
//! notifier. The state is a plain per-instance field, so independent runners
//! in one process never interfere, and tests can drive it with explicit
//! instants.
//!
//! ## Rules
//! - A throttle that has never been marked is always ready ("never
//!   dispatched" sentinel).
//! - [`Throttle::mark`] is only called when a batch is actually dispatched;
//!   skipped cycles never advance the window.
//! - [`Throttle::reset`] returns the throttle to the never-dispatched state;
//!   the runner does this at the start of every `run()` invocation.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use sparkwatch::Throttle;
//! use tokio::time::Instant;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut throttle = Throttle::new(Duration::from_secs(60));
//! let now = Instant::now();
//!
//! assert!(throttle.ready(now));          // never dispatched yet
//! throttle.mark(now);
//! assert!(!throttle.ready(now));         // gap not elapsed
//! assert!(throttle.ready(now + Duration::from_secs(60)));
//! # }
//! ```

use std::time::Duration;

use tokio::time::Instant;

/// Minimum-gap gate between dispatched notification batches.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    min_gap: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle with the given minimum gap, in the
    /// never-dispatched state.
    pub fn new(min_gap: Duration) -> Self {
        Self { min_gap, last: None }
    }

    /// Returns the configured minimum gap.
    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }

    /// Replaces the minimum gap. Does not touch the dispatch timestamp.
    pub fn set_min_gap(&mut self, min_gap: Duration) {
        self.min_gap = min_gap;
    }

    /// Forgets the last dispatch; the next [`ready`](Self::ready) check
    /// passes unconditionally.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Whether enough time has elapsed since the last dispatch.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_gap,
        }
    }

    /// Records a dispatch at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Returns the instant of the last dispatch, if any.
    pub fn last_dispatch(&self) -> Option<Instant> {
        self.last
    }
}
