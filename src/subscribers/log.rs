//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [cycle] n=3
//! [passed] alarm=low-cpu cycle=3
//! [failed] alarm=disk-free cycle=3
//! [faulted] alarm=mem-free cycle=3 reason="metrics read failed: ..."
//! [summary] cycle=3 sent=2
//! [throttled] cycle=4 held=2
//! [silenced] cycle=5 held=1
//! [shutdown-requested]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let alarm = e.alarm.as_deref().unwrap_or("<unknown>");
        let cycle = e.cycle.unwrap_or(0);
        match e.kind {
            EventKind::CycleStarted => {
                println!("[cycle] n={cycle}");
            }
            EventKind::CycleCompleted => {}
            EventKind::AlarmPassed => {
                println!("[passed] alarm={alarm} cycle={cycle}");
            }
            EventKind::AlarmFailed => {
                println!("[failed] alarm={alarm} cycle={cycle}");
            }
            EventKind::AlarmFaulted => {
                println!(
                    "[faulted] alarm={alarm} cycle={cycle} reason={:?}",
                    e.reason.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::SummaryDispatched => {
                println!("[summary] cycle={cycle} sent={}", e.batch.unwrap_or(0));
            }
            EventKind::SummaryThrottled => {
                println!("[throttled] cycle={cycle} held={}", e.batch.unwrap_or(0));
            }
            EventKind::SummarySilenced => {
                println!("[silenced] cycle={cycle} held={}", e.batch.unwrap_or(0));
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
