//! # Alarm trait: an async health check with status and hooks.
//!
//! An [`Alarm`] has a stable [`name`](Alarm::name) (also its identity for
//! removal from the runner), an async [`test`](Alarm::test) predicate, and
//! optional success/error hooks that the runner invokes exactly once per
//! cycle, right after `test()` resolves. The common handle type is
//! [`AlarmRef`], an `Arc<dyn Alarm>` suitable for sharing across the runtime.
//!
//! Alarms that need machine state should hold a
//! [`MetricsRef`](crate::MetricsRef) and call it inside `test()` — there is
//! no base class to inherit metric helpers from.
//!
//! # Example
//! ```
//! use async_trait::async_trait;
//! use sparkwatch::{Alarm, AlarmError, AlarmStatus, StatusCell};
//!
//! struct AlwaysGreen {
//!     status: StatusCell,
//! }
//!
//! #[async_trait]
//! impl Alarm for AlwaysGreen {
//!     fn name(&self) -> &str { "always-green" }
//!
//!     fn status(&self) -> AlarmStatus { self.status.get() }
//!
//!     fn set_status(&self, status: AlarmStatus) { self.status.set(status); }
//!
//!     async fn test(&self) -> Result<bool, AlarmError> {
//!         Ok(true)
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::alarms::status::AlarmStatus;
use crate::error::AlarmError;

/// Shared reference to an alarm.
pub type AlarmRef = Arc<dyn Alarm>;

/// # Asynchronous health check.
///
/// `test()` may perform local I/O (reading metrics) but should resolve
/// promptly; the runner can race it against a configured timeout. The runner
/// guarantees:
/// - `test()` runs once per cycle, in registration order;
/// - the matching hook ([`on_success`](Alarm::on_success) or
///   [`on_error`](Alarm::on_error)) runs immediately after `test()` resolves
///   to a verdict, followed by the status store;
/// - neither hook runs when the evaluation raises — the status becomes
///   [`AlarmStatus::Faulted`] instead.
#[async_trait]
pub trait Alarm: Send + Sync + 'static {
    /// Returns a stable, human-readable alarm name.
    ///
    /// The name is also the alarm's identity for
    /// [`Spark::remove_alarm`](crate::Spark::remove_alarm).
    fn name(&self) -> &str;

    /// Whether this alarm wants to be included in the notification batch
    /// when it *passes*. OR'd with the runner-wide flag.
    fn notify_on_success(&self) -> bool {
        false
    }

    /// Returns the outcome of the most recent evaluation.
    fn status(&self) -> AlarmStatus;

    /// Stores the outcome of an evaluation. Invoked by the runner; must be
    /// idempotent and side-effect-free beyond recording the value.
    fn set_status(&self, status: AlarmStatus);

    /// Evaluates the check: `Ok(true)` healthy, `Ok(false)` the alarm
    /// condition failed, `Err` the evaluation itself broke.
    async fn test(&self) -> Result<bool, AlarmError>;

    /// Hook invoked after `test()` resolves to `Ok(true)`.
    async fn on_success(&self) {}

    /// Hook invoked after `test()` resolves to `Ok(false)`.
    async fn on_error(&self) {}

    /// Message a notifier may print when this alarm passed.
    fn success_message(&self) -> &str {
        "check passed"
    }

    /// Message a notifier may print when this alarm failed.
    fn error_message(&self) -> &str {
        "check failed"
    }
}
