//! # sparkwatch
//!
//! **sparkwatch** is a lightweight resource-monitoring library for Rust.
//!
//! It periodically evaluates a set of user-defined health checks ("alarms")
//! against local machine state (CPU load, memory, disk) and reports failures
//! (and optionally successes) to a pluggable notification sink, throttled so
//! a flapping machine never turns into a notification storm.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    Alarm     │   │    Alarm     │   │    Alarm     │
//!     │ (check #1)   │   │ (check #2)   │   │ (check #3)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Spark (the runner)                                               │
//! │  - evaluates every alarm once per cycle, in registration order    │
//! │  - isolates each evaluation (one bad alarm never aborts a cycle)  │
//! │  - aggregates failures (+ opted-in successes) into a batch        │
//! │  - gates dispatch behind a minimum-gap Throttle                   │
//! │  - Bus (broadcast lifecycle events)                               │
//! │  - SubscriberSet (fans out events to user subscribers)            │
//! └──────────────┬───────────────────────────────┬────────────────────┘
//!                ▼                               ▼
//!     ┌────────────────────┐          ┌────────────────────────┐
//!     │  Notifier::send()  │          │  Subscribe::on_event() │
//!     │  (one batch per    │          │  (logging, metrics,    │
//!     │   throttle window) │          │   custom observers)    │
//!     └────────────────────┘          └────────────────────────┘
//! ```
//!
//! ### Cycle
//! ```text
//! run() / run_with_token(token)
//!   ├─► reset throttle window ("never dispatched")
//!   └─► loop {
//!         ├─► token cancelled? ─► return accumulated results
//!         ├─► for each alarm (registration order):
//!         │      test() ─► Ok(true)  ─► on_success(), status=Success,
//!         │                             batched only if notify-on-success
//!         │              ─► Ok(false) ─► on_error(), status=Error, batched
//!         │              ─► Err/panic/timeout ─► status=Faulted, batched
//!         ├─► batch = failures (eval order) ++ qualifying successes
//!         ├─► dispatch: skipped if batch empty, silent, or throttled;
//!         │             otherwise notifier.send(batch), mark throttle
//!         ├─► keep_alive? ─► cancellable sleep(interval), next cycle
//!         └─► else ─► return accumulated results
//!       }
//! ```
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                  |
//! |-------------------|----------------------------------------------------------------------|-------------------------------------|
//! | **Alarms**        | Define checks as structs or closures, with status and hooks.         | [`Alarm`], [`AlarmFn`], [`AlarmRef`]|
//! | **Notification**  | Pluggable batch sink, throttled to a minimum gap between summaries.  | [`Notifier`], [`Throttle`]          |
//! | **Metrics**       | Composable system-state capability (load, memory, disk).             | [`SystemMetrics`], [`ProcMetrics`]  |
//! | **Runner**        | The evaluate → aggregate → throttle-gate → notify loop.              | [`Spark`]                           |
//! | **Observability** | Lifecycle events fanned out to subscribers.                          | [`Event`], [`Subscribe`]            |
//! | **Errors**        | Typed errors for the runner, alarms, and the metrics provider.       | [`RunnerError`], [`AlarmError`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use sparkwatch::{AlarmError, AlarmFn, Spark};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut spark = Spark::new();
//!     spark
//!         .silent(true) // keep the doctest quiet; drop this line in real code
//!         .add_alarm(AlarmFn::arc("always-green", || async {
//!             Ok::<bool, AlarmError>(true)
//!         }));
//!
//!     // One cycle, then return the alarms that would have been notified.
//!     let notified = spark.run().await?;
//!     assert!(notified.is_empty());
//!     Ok(())
//! }
//! ```
mod alarms;
mod error;
mod events;
mod metrics;
mod notify;
mod policies;
mod runner;
mod subscribers;

// ---- Public re-exports ----

pub use alarms::{Alarm, AlarmFn, AlarmRef, AlarmStatus, StatusCell};
pub use error::{AlarmError, MetricsError, RunnerError};
pub use events::{Bus, Event, EventKind};
pub use metrics::{MetricsRef, ProcMetrics, SystemMetrics};
pub use notify::{ConsoleNotifier, Notifier, NotifierRef};
pub use policies::Throttle;
pub use runner::Spark;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
