//! # Per-alarm evaluation status.
//!
//! [`AlarmStatus`] records how an alarm's most recent evaluation ended, and
//! [`StatusCell`] stores it with interior mutability so the runner can write
//! it through a shared [`AlarmRef`](crate::AlarmRef).
//!
//! ## Rules
//! - An alarm starts as [`AlarmStatus::Unset`] and stays there until the
//!   first cycle touches it.
//! - Stores are idempotent: writing the same value twice has no observable
//!   effect beyond the stored value.
//! - [`AlarmStatus::Faulted`] means the evaluation *raised* (error, panic, or
//!   timeout) instead of resolving to a verdict; the cause travels through
//!   events, not through the status.

use std::sync::atomic::{AtomicU8, Ordering};

/// Outcome of an alarm's most recent evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStatus {
    /// Never evaluated.
    Unset,
    /// The check passed.
    Success,
    /// The check ran and the alarm condition failed.
    Error,
    /// The evaluation raised instead of resolving to a verdict.
    Faulted,
}

impl AlarmStatus {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AlarmStatus::Unset => "unset",
            AlarmStatus::Success => "success",
            AlarmStatus::Error => "error",
            AlarmStatus::Faulted => "faulted",
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            AlarmStatus::Unset => 0,
            AlarmStatus::Success => 1,
            AlarmStatus::Error => 2,
            AlarmStatus::Faulted => 3,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => AlarmStatus::Success,
            2 => AlarmStatus::Error,
            3 => AlarmStatus::Faulted,
            _ => AlarmStatus::Unset,
        }
    }
}

/// Atomic storage for an [`AlarmStatus`].
///
/// Alarms embed one of these and wire the [`Alarm`](crate::Alarm) status
/// accessors to it; the runner then updates status through a shared
/// reference without any locking.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

impl StatusCell {
    /// Creates a cell holding [`AlarmStatus::Unset`].
    pub fn new() -> Self {
        Self(AtomicU8::new(AlarmStatus::Unset.as_u8()))
    }

    /// Returns the stored status.
    pub fn get(&self) -> AlarmStatus {
        AlarmStatus::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Stores a status. Idempotent.
    pub fn set(&self, status: AlarmStatus) {
        self.0.store(status.as_u8(), Ordering::Relaxed);
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_starts_unset() {
        assert_eq!(StatusCell::new().get(), AlarmStatus::Unset);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let cell = StatusCell::new();
        for status in [
            AlarmStatus::Success,
            AlarmStatus::Error,
            AlarmStatus::Faulted,
            AlarmStatus::Unset,
        ] {
            cell.set(status);
            assert_eq!(cell.get(), status);
        }
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let cell = StatusCell::new();
        cell.set(AlarmStatus::Error);
        cell.set(AlarmStatus::Error);
        assert_eq!(cell.get(), AlarmStatus::Error);
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(AlarmStatus::Unset.as_label(), "unset");
        assert_eq!(AlarmStatus::Success.as_label(), "success");
        assert_eq!(AlarmStatus::Error.as_label(), "error");
        assert_eq!(AlarmStatus::Faulted.as_label(), "faulted");
    }
}
