//! # Console notifier: the default notification sink.
//!
//! [`ConsoleNotifier`] prints one line per alarm in the batch, using the
//! alarm's status and its success/error message.
//!
//! ## Output format
//! ```text
//! [low-cpu] alert: check failed
//! [disk-free] alert: less than 10% left on /
//! [mem-free] fault: evaluation did not complete
//! [heartbeat] ok: check passed
//! ```

use async_trait::async_trait;

use crate::alarms::{Alarm, AlarmRef, AlarmStatus};
use crate::notify::notifier::Notifier;

/// Default stdout notification sink.
///
/// Useful when the daemon runs under a service manager that captures stdout;
/// implement a custom [`Notifier`] for email, webhooks, or paging.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, alarms: &[AlarmRef]) {
        for alarm in alarms {
            println!("{}", format_line(alarm.as_ref()));
        }
    }
}

/// Renders one report line from an alarm's status and messages.
fn format_line(alarm: &dyn Alarm) -> String {
    match alarm.status() {
        AlarmStatus::Success => {
            format!("[{}] ok: {}", alarm.name(), alarm.success_message())
        }
        AlarmStatus::Faulted => {
            format!("[{}] fault: evaluation did not complete", alarm.name())
        }
        AlarmStatus::Error | AlarmStatus::Unset => {
            format!("[{}] alert: {}", alarm.name(), alarm.error_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarms::AlarmFn;

    #[test]
    fn test_format_follows_status() {
        let alarm = AlarmFn::new("demo", || async { Ok::<bool, crate::AlarmError>(true) });

        alarm.set_status(AlarmStatus::Success);
        assert_eq!(format_line(&alarm), "[demo] ok: check passed");

        alarm.set_status(AlarmStatus::Error);
        assert_eq!(format_line(&alarm), "[demo] alert: check failed");

        alarm.set_status(AlarmStatus::Faulted);
        assert_eq!(format_line(&alarm), "[demo] fault: evaluation did not complete");
    }
}
