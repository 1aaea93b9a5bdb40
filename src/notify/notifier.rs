//! # Notifier trait: the pluggable notification sink.
//!
//! A [`Notifier`] receives at most one batch per throttle window. The batch
//! is ordered: alarms that failed (or faulted), in evaluation order, followed
//! by alarms that passed and qualify for success notification.
//!
//! ## Rules
//! - The runner never passes an empty batch; implementations should still
//!   no-op gracefully on one (defensive).
//! - Implementations must not mutate the alarms.
//! - Dispatch is fire-and-forget from the runner's perspective: there is no
//!   return value and no retry. A sink that can fail should log and carry on
//!   rather than block the next cycle.
//!
//! # Example
//! ```
//! use async_trait::async_trait;
//! use sparkwatch::{Alarm, AlarmRef, AlarmStatus, Notifier};
//!
//! struct PagerStub;
//!
//! #[async_trait]
//! impl Notifier for PagerStub {
//!     async fn send(&self, alarms: &[AlarmRef]) {
//!         for alarm in alarms {
//!             if alarm.status() != AlarmStatus::Success {
//!                 // open an incident, post to a webhook, ...
//!             }
//!         }
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::alarms::AlarmRef;

/// Shared reference to a notifier.
pub type NotifierRef = Arc<dyn Notifier>;

/// # Batch notification sink.
///
/// Consumes the alarms selected for notification in one cycle. Read each
/// alarm's [`status`](crate::Alarm::status) to distinguish failures from
/// opted-in successes.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Delivers one notification batch.
    async fn send(&self, alarms: &[AlarmRef]);
}
