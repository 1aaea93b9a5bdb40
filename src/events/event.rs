//! # Lifecycle events emitted by the runner.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Cycle events**: one full pass over the registered alarms
//! - **Alarm events**: the outcome of a single evaluation
//! - **Summary events**: what happened to the cycle's notification batch
//! - **Runtime events**: shutdown
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! alarm names, fault reasons, and batch sizes.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use sparkwatch::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::AlarmFaulted)
//!     .with_alarm("disk-free")
//!     .with_reason("metrics source /proc/meminfo is unavailable")
//!     .with_cycle(3);
//!
//! assert_eq!(ev.kind, EventKind::AlarmFaulted);
//! assert_eq!(ev.alarm.as_deref(), Some("disk-free"));
//! assert_eq!(ev.cycle, Some(3));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runner events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Cycle events ===
    /// A new evaluation cycle is starting.
    ///
    /// Sets:
    /// - `cycle`: 1-based cycle number within this `run()` invocation
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CycleStarted,

    /// All alarms of the cycle have been evaluated.
    ///
    /// Sets:
    /// - `cycle`: cycle number
    /// - `batch`: size of the notification batch this cycle produced
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CycleCompleted,

    // === Alarm events ===
    /// An alarm's check passed.
    ///
    /// Sets:
    /// - `alarm`: alarm name
    /// - `cycle`: cycle number
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AlarmPassed,

    /// An alarm's check ran and the alarm condition failed.
    ///
    /// Sets:
    /// - `alarm`: alarm name
    /// - `cycle`: cycle number
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AlarmFailed,

    /// An alarm's evaluation raised (error, panic, or timeout).
    ///
    /// Sets:
    /// - `alarm`: alarm name
    /// - `cycle`: cycle number
    /// - `reason`: fault message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AlarmFaulted,

    // === Summary events ===
    /// The cycle's batch was handed to the notifier.
    ///
    /// Sets:
    /// - `cycle`: cycle number
    /// - `batch`: number of alarms dispatched
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SummaryDispatched,

    /// The cycle's batch was discarded because the minimum gap between
    /// dispatched summaries has not elapsed yet.
    ///
    /// Sets:
    /// - `cycle`: cycle number
    /// - `batch`: number of alarms held back
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SummaryThrottled,

    /// The cycle's batch was discarded because the runner is silent.
    ///
    /// Sets:
    /// - `cycle`: cycle number
    /// - `batch`: number of alarms suppressed
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SummarySilenced,

    // === Runtime events ===
    /// Cancellation observed (OS signal or explicit token cancel).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,
}

/// Runner event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the alarm (or subscriber, for delivery events), if applicable.
    pub alarm: Option<Arc<str>>,
    /// Human-readable reason (fault messages, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// 1-based cycle number within the current `run()` invocation.
    pub cycle: Option<u64>,
    /// Notification-batch size (compact).
    pub batch: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            alarm: None,
            reason: None,
            cycle: None,
            batch: None,
        }
    }

    /// Attaches an alarm (or subscriber) name.
    #[inline]
    pub fn with_alarm(mut self, alarm: impl Into<Arc<str>>) -> Self {
        self.alarm = Some(alarm.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a cycle number.
    #[inline]
    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// Attaches a batch size (stored compactly).
    #[inline]
    pub fn with_batch(mut self, len: usize) -> Self {
        self.batch = Some(len.min(u32::MAX as usize) as u32);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = Event::new(EventKind::CycleStarted);
        let b = Event::new(EventKind::CycleCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::new(EventKind::SummaryThrottled)
            .with_cycle(7)
            .with_batch(2);
        assert_eq!(ev.cycle, Some(7));
        assert_eq!(ev.batch, Some(2));
        assert!(ev.alarm.is_none());
    }
}
