//! Error types used by the sparkwatch runtime, alarms, and metrics provider.
//!
//! This module defines three error enums:
//!
//! - [`RunnerError`] — errors raised by the run loop itself.
//! - [`AlarmError`] — errors raised by individual alarm evaluations.
//! - [`MetricsError`] — errors raised by a [`SystemMetrics`](crate::SystemMetrics) provider.
//!
//! All types provide an `as_label` helper (short snake_case tag) for
//! logging/metrics, and [`AlarmError::is_transient`] distinguishes faults the
//! next cycle may clear from an alarm's own verdict.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the run loop.
///
/// These represent failures of the runner machinery itself, not of any
/// individual alarm. Alarm-level problems are isolated per alarm and recorded
/// as a `Faulted` status instead of surfacing here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Registering the OS shutdown-signal listeners failed.
    #[error("failed to install shutdown signal listeners: {source}")]
    Signal {
        /// The underlying registration error.
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunnerError::Signal { .. } => "runner_signal",
        }
    }
}

/// # Errors produced by an alarm evaluation.
///
/// An alarm's `test()` resolves to `Ok(true)` (healthy), `Ok(false)` (the
/// alarm condition failed), or one of these errors. An error never carries a
/// health verdict: the runner records it as
/// [`AlarmStatus::Faulted`](crate::AlarmStatus::Faulted) and moves on to the
/// next alarm.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AlarmError {
    /// The evaluation itself broke (bad input, I/O problem, internal bug).
    #[error("evaluation failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The evaluation exceeded the runner's configured alarm timeout.
    #[error("evaluation timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// The system-metrics provider could not produce a reading.
    #[error("metrics read failed: {0}")]
    Metrics(#[from] MetricsError),
}

impl AlarmError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use sparkwatch::AlarmError;
    /// use std::time::Duration;
    ///
    /// let err = AlarmError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "alarm_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AlarmError::Fail { .. } => "alarm_fail",
            AlarmError::Timeout { .. } => "alarm_timeout",
            AlarmError::Metrics(_) => "alarm_metrics",
        }
    }

    /// Indicates whether the next cycle may plausibly clear this fault.
    ///
    /// Returns `true` for [`AlarmError::Timeout`] and [`AlarmError::Metrics`]
    /// (a slow check or an unreadable metrics source can recover on its own),
    /// `false` for [`AlarmError::Fail`].
    pub fn is_transient(&self) -> bool {
        matches!(self, AlarmError::Timeout { .. } | AlarmError::Metrics(_))
    }
}

/// # Errors produced by a system-metrics provider.
///
/// Reading a missing identifier out of an otherwise healthy source is *not*
/// an error: providers return a `0` sentinel for that case so an alarm keeps
/// evaluating. These variants cover the source itself being broken.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The metrics source is missing or unreadable.
    #[error("metrics source {path} is unavailable: {source}")]
    Unavailable {
        /// The source that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The metrics source was readable but its content could not be parsed.
    #[error("metrics source {path} is malformed")]
    Malformed {
        /// The source with unparseable content.
        path: String,
    },
}

impl MetricsError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            MetricsError::Unavailable { .. } => "metrics_unavailable",
            MetricsError::Malformed { .. } => "metrics_malformed",
        }
    }
}
