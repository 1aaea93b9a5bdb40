//! # Closure-backed alarm (`AlarmFn`)
//!
//! [`AlarmFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per
//! evaluation. This avoids shared mutable state between cycles; if a check
//! needs shared state, capture an `Arc<...>` explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use sparkwatch::{Alarm, AlarmError, AlarmFn, AlarmRef};
//!
//! let check: AlarmRef = AlarmFn::arc("worker-heartbeat", || async {
//!     // read a pidfile, poke a socket, ...
//!     Ok::<bool, AlarmError>(true)
//! });
//!
//! assert_eq!(check.name(), "worker-heartbeat");
//! assert!(!check.notify_on_success());
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::alarms::alarm::Alarm;
use crate::alarms::status::{AlarmStatus, StatusCell};
use crate::error::AlarmError;

/// Closure-backed alarm implementation.
///
/// Wraps a closure that *creates* a new future per evaluation.
#[derive(Debug)]
pub struct AlarmFn<F> {
    name: Cow<'static, str>,
    notify_on_success: bool,
    status: StatusCell,
    f: F,
}

impl<F> AlarmFn<F> {
    /// Creates a new closure-backed alarm.
    ///
    /// Prefer [`AlarmFn::arc`] when you immediately need an
    /// [`AlarmRef`](crate::AlarmRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            notify_on_success: false,
            status: StatusCell::new(),
            f,
        }
    }

    /// Creates the alarm and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }

    /// Returns a new alarm with the notify-on-success flag updated.
    pub fn with_notify_on_success(mut self, enabled: bool) -> Self {
        self.notify_on_success = enabled;
        self
    }
}

#[async_trait]
impl<F, Fut> Alarm for AlarmFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<bool, AlarmError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn notify_on_success(&self) -> bool {
        self.notify_on_success
    }

    fn status(&self) -> AlarmStatus {
        self.status.get()
    }

    fn set_status(&self, status: AlarmStatus) {
        self.status.set(status);
    }

    async fn test(&self) -> Result<bool, AlarmError> {
        (self.f)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_verdict_passes_through() {
        let green = AlarmFn::new("green", || async { Ok::<bool, AlarmError>(true) });
        let red = AlarmFn::new("red", || async { Ok::<bool, AlarmError>(false) });
        assert!(green.test().await.unwrap());
        assert!(!red.test().await.unwrap());
    }

    #[test]
    fn test_name_and_flag() {
        let alarm = AlarmFn::new("flagged", || async { Ok::<bool, AlarmError>(true) })
            .with_notify_on_success(true);
        assert_eq!(alarm.name(), "flagged");
        assert!(alarm.notify_on_success());
    }

    #[test]
    fn test_status_starts_unset() {
        let alarm = AlarmFn::new("fresh", || async { Ok::<bool, AlarmError>(true) });
        assert_eq!(alarm.status(), AlarmStatus::Unset);
        alarm.set_status(AlarmStatus::Success);
        assert_eq!(alarm.status(), AlarmStatus::Success);
    }
}
