//! # Evaluate a single alarm within one cycle.
//!
//! Executes one alarm's `test()` with optional timeout and panic isolation,
//! runs the matching hook, stores the status, and publishes the outcome to
//! the [`Bus`].
//!
//! ## Outcome flow
//! ```text
//! Ok(true):
//!   on_success() → status=Success → publish AlarmPassed
//!
//! Ok(false):
//!   on_error() → status=Error → publish AlarmFailed
//!
//! Err / timeout / panic:
//!   status=Faulted (no hook) → publish AlarmFaulted(reason)
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** alarm event per evaluation.
//! - The hook runs **before** the status store, and only for a resolved
//!   boolean verdict.
//! - A timeout produces `AlarmError::Timeout`, not a verdict.
//! - Panics anywhere in `test()` or the hooks are caught; the alarm is
//!   marked `Faulted` and the rest of the cycle proceeds untouched.

use std::any::Any;
use std::time::Duration;

use futures::FutureExt;
use tokio::time;

use crate::alarms::{Alarm, AlarmRef, AlarmStatus};
use crate::error::AlarmError;
use crate::events::{Bus, Event, EventKind};

/// How one alarm's evaluation ended, from the runner's point of view.
pub(crate) enum Outcome {
    /// The check passed.
    Passed,
    /// The check ran and the alarm condition failed.
    Failed,
    /// The evaluation raised instead of resolving to a verdict.
    Faulted(AlarmError),
}

/// Evaluates a single alarm, publishing its outcome to `bus`.
///
/// The whole evaluation (test, hook, status store) runs behind a panic
/// boundary so one broken alarm can never unwind the cycle.
pub(crate) async fn evaluate_alarm(
    alarm: &AlarmRef,
    timeout: Option<Duration>,
    cycle: u64,
    bus: &Bus,
) -> Outcome {
    let guarded = std::panic::AssertUnwindSafe(evaluate_inner(alarm, timeout));
    let outcome = match guarded.catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => {
            alarm.set_status(AlarmStatus::Faulted);
            Outcome::Faulted(AlarmError::Fail {
                error: panic_reason(panic),
            })
        }
    };

    match &outcome {
        Outcome::Passed => bus.publish(
            Event::new(EventKind::AlarmPassed)
                .with_alarm(alarm.name())
                .with_cycle(cycle),
        ),
        Outcome::Failed => bus.publish(
            Event::new(EventKind::AlarmFailed)
                .with_alarm(alarm.name())
                .with_cycle(cycle),
        ),
        Outcome::Faulted(err) => bus.publish(
            Event::new(EventKind::AlarmFaulted)
                .with_alarm(alarm.name())
                .with_cycle(cycle)
                .with_reason(err.to_string()),
        ),
    }
    outcome
}

/// Runs `test()` (with optional timeout), the matching hook, and the status
/// store.
async fn evaluate_inner(alarm: &AlarmRef, timeout: Option<Duration>) -> Outcome {
    let verdict = match timeout.filter(|d| *d > Duration::ZERO) {
        Some(dur) => match time::timeout(dur, alarm.test()).await {
            Ok(res) => res,
            Err(_elapsed) => Err(AlarmError::Timeout { timeout: dur }),
        },
        None => alarm.test().await,
    };

    match verdict {
        Ok(true) => {
            alarm.on_success().await;
            alarm.set_status(AlarmStatus::Success);
            Outcome::Passed
        }
        Ok(false) => {
            alarm.on_error().await;
            alarm.set_status(AlarmStatus::Error);
            Outcome::Failed
        }
        Err(err) => {
            alarm.set_status(AlarmStatus::Faulted);
            Outcome::Faulted(err)
        }
    }
}

/// Extracts a printable message from a caught panic payload.
fn panic_reason(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "alarm panicked".to_string(),
        },
    }
}
