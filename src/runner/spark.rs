//! # Spark: the resource-monitoring runner.
//!
//! [`Spark`] owns the alarm collection, the notifier, and all timing/mode
//! state. One call to [`Spark::run`] drives the whole machine: evaluate →
//! aggregate → throttle-gate → notify → (sleep | stop).
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   registered alarms (Vec<AlarmRef>, registration order)
//!
//! Preparation:
//!   - reset Throttle to "never dispatched"
//!   - spawn subscriber listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!
//! Per cycle:
//!   alarm[0]  alarm[1]  ...  alarm[N-1]
//!      │         │               │
//!      └──► cycle::evaluate_alarm(...)      (sequential, isolated)
//!                 │
//!                 ├─ Passed  ─► batched only if notify-on-success
//!                 ├─ Failed  ─► batched
//!                 └─ Faulted ─► batched (a check that cannot run is a failure)
//!
//!   batch = failures (evaluation order) ++ qualifying successes
//!      │
//!      ├─ empty / silent / throttled ─► discarded (timestamp untouched)
//!      └─ otherwise ─► notifier.send(batch); throttle.mark(now)
//!
//! Exit:
//!   - !keep_alive ─► after one cycle
//!   - keep_alive  ─► on cancellation (OS signal via run(), or the token
//!                    passed to run_with_token), checked at the top of each
//!                    cycle and during the inter-cycle sleep
//! ```
//!
//! ## Rules
//! - Alarms are evaluated **sequentially, in registration order** within a
//!   cycle; there is no parallel evaluation.
//! - The throttle window belongs to this runner instance and resets at the
//!   start of every `run()` call, so two back-to-back runs both dispatch.
//! - Skipped batches are **discarded, never deferred**: there is no queue of
//!   suppressed summaries.
//! - `run()` returns the batch members accumulated across all cycles of the
//!   invocation (one cycle's worth unless `keep_alive`).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::alarms::{Alarm, AlarmRef};
use crate::error::RunnerError;
use crate::events::{Bus, Event, EventKind};
use crate::notify::{ConsoleNotifier, NotifierRef};
use crate::policies::Throttle;
use crate::runner::cycle::{evaluate_alarm, Outcome};
use crate::runner::shutdown;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Pause between cycles when `keep_alive` is on.
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// Minimum gap between two dispatched summaries.
const DEFAULT_THROTTLE: Duration = Duration::from_secs(25 * 60);
/// Event-bus ring buffer size.
const DEFAULT_BUS_CAPACITY: usize = 1024;

/// The resource-monitoring runner.
///
/// Configure with the fluent setters, register alarms, then call
/// [`run`](Spark::run). The same instance can run again afterwards; each
/// invocation starts with a fresh throttle window.
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use sparkwatch::{AlarmError, AlarmFn, ProcMetrics, Spark, SystemMetrics};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let metrics = ProcMetrics::arc();
///
///     let mut spark = Spark::new();
///     spark
///         .interval(Duration::from_secs(120))
///         .throttle(Duration::from_secs(20 * 60))
///         .keep_alive(true)
///         .add_alarm(AlarmFn::arc("mem-free", move || {
///             let metrics = metrics.clone();
///             async move {
///                 Ok::<bool, AlarmError>(metrics.free_memory_percent().await? > 10.0)
///             }
///         }));
///
///     spark.run().await?; // runs until SIGINT/SIGTERM
///     Ok(())
/// }
/// ```
pub struct Spark {
    alarms: Vec<AlarmRef>,
    notifier: NotifierRef,
    subscribers: Vec<Arc<dyn Subscribe>>,
    bus: Bus,
    interval: Duration,
    throttle: Throttle,
    keep_alive: bool,
    silent: bool,
    notify_on_success: bool,
    alarm_timeout: Option<Duration>,
}

impl Spark {
    /// Creates a runner with default settings: 5-minute interval, 25-minute
    /// throttle, console notifier, one-shot mode.
    pub fn new() -> Self {
        Self {
            alarms: Vec::new(),
            notifier: Arc::new(ConsoleNotifier),
            subscribers: Vec::new(),
            bus: Bus::new(DEFAULT_BUS_CAPACITY),
            interval: DEFAULT_INTERVAL,
            throttle: Throttle::new(DEFAULT_THROTTLE),
            keep_alive: false,
            silent: false,
            notify_on_success: false,
            alarm_timeout: None,
        }
    }

    // ---- Configuration (fluent, chainable) ----

    /// Sets the pause between cycles.
    ///
    /// Only relevant with [`keep_alive`](Spark::keep_alive); in one-shot
    /// mode the scheduler that invokes the process (e.g. cron) determines
    /// the cadence.
    pub fn interval(&mut self, interval: Duration) -> &mut Self {
        self.interval = interval;
        self
    }

    /// Sets the minimum gap between two dispatched summaries.
    ///
    /// Batches computed inside the gap are discarded, not deferred.
    pub fn throttle(&mut self, min_gap: Duration) -> &mut Self {
        self.throttle.set_min_gap(min_gap);
        self
    }

    /// Run forever (until cancelled) instead of one cycle.
    pub fn keep_alive(&mut self, keep_alive: bool) -> &mut Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Suppresses all notifier dispatch. Evaluation, statuses, hooks, and
    /// events are unaffected.
    pub fn silent(&mut self, silent: bool) -> &mut Self {
        self.silent = silent;
        self
    }

    /// Also batch alarms that *passed*, for every alarm. OR'd with each
    /// alarm's own [`notify_on_success`](crate::Alarm::notify_on_success)
    /// flag.
    pub fn send_notifications_on_success(&mut self, enabled: bool) -> &mut Self {
        self.notify_on_success = enabled;
        self
    }

    /// Replaces the notification sink. Takes effect on the next dispatch.
    pub fn notifier(&mut self, notifier: NotifierRef) -> &mut Self {
        self.notifier = notifier;
        self
    }

    /// Caps every alarm evaluation at `timeout`; an evaluation that exceeds
    /// it is recorded as `Faulted`.
    pub fn alarm_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.alarm_timeout = Some(timeout);
        self
    }

    /// Registers an event subscriber (logging, metrics, auditing).
    pub fn subscriber(&mut self, subscriber: Arc<dyn Subscribe>) -> &mut Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Registers an alarm. Evaluation follows registration order.
    pub fn add_alarm(&mut self, alarm: AlarmRef) -> &mut Self {
        self.alarms.push(alarm);
        self
    }

    /// Removes every alarm whose name equals `name`, preserving the
    /// relative order of the remainder.
    pub fn remove_alarm(&mut self, name: &str) -> &mut Self {
        self.alarms.retain(|alarm| alarm.name() != name);
        self
    }

    /// Returns the registered alarms in registration order.
    pub fn alarms(&self) -> &[AlarmRef] {
        &self.alarms
    }

    /// Creates a receiver observing this runner's lifecycle events.
    ///
    /// Independent of the subscriber machinery; useful for ad-hoc taps.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    // ---- Execution ----

    /// Runs the machine until done (one cycle, or cancellation in
    /// keep-alive mode), with OS termination signals wired to cancellation.
    ///
    /// Returns the alarms that qualified for notification, accumulated
    /// across every cycle of this invocation — whether or not a summary was
    /// actually dispatched for their cycle.
    pub async fn run(&mut self) -> Result<Vec<AlarmRef>, RunnerError> {
        let token = CancellationToken::new();
        shutdown::cancel_on_termination(token.clone())
            .map_err(|source| RunnerError::Signal { source })?;
        self.run_with_token(token).await
    }

    /// Like [`run`](Spark::run), but cancellation is entirely up to the
    /// caller's token. No signal listeners are installed.
    ///
    /// ### Cancellation semantics
    /// The token is checked at the top of each cycle and during the
    /// inter-cycle sleep; a cycle in progress finishes its evaluation pass.
    /// Cancellation is a graceful exit: the accumulated results are
    /// returned, never discarded.
    pub async fn run_with_token(
        &mut self,
        token: CancellationToken,
    ) -> Result<Vec<AlarmRef>, RunnerError> {
        self.throttle.reset();
        let listener = self.spawn_subscriber_listener();

        let mut notified: Vec<AlarmRef> = Vec::new();
        let mut cycle: u64 = 0;

        loop {
            if token.is_cancelled() {
                break;
            }
            cycle += 1;
            self.bus
                .publish(Event::new(EventKind::CycleStarted).with_cycle(cycle));

            let batch = self.evaluate_cycle(cycle).await;
            self.bus.publish(
                Event::new(EventKind::CycleCompleted)
                    .with_cycle(cycle)
                    .with_batch(batch.len()),
            );

            notified.extend(batch.iter().cloned());
            self.dispatch(batch, cycle).await;

            if !self.keep_alive {
                break;
            }

            let sleep = time::sleep(self.interval);
            tokio::pin!(sleep);
            tokio::select! {
                _ = &mut sleep => {}
                _ = token.cancelled() => break,
            }
        }

        if token.is_cancelled() {
            self.bus.publish(Event::new(EventKind::ShutdownRequested));
        }
        if let Some(listener) = listener {
            listener.finish().await;
        }
        Ok(notified)
    }

    /// Evaluates every alarm once, in registration order, and assembles the
    /// cycle's notification batch: failures and faults in evaluation order,
    /// then qualifying successes in evaluation order.
    async fn evaluate_cycle(&self, cycle: u64) -> Vec<AlarmRef> {
        let mut failed: Vec<AlarmRef> = Vec::new();
        let mut succeeded: Vec<AlarmRef> = Vec::new();

        for alarm in &self.alarms {
            match evaluate_alarm(alarm, self.alarm_timeout, cycle, &self.bus).await {
                Outcome::Passed => {
                    if self.notify_on_success || alarm.notify_on_success() {
                        succeeded.push(alarm.clone());
                    }
                }
                Outcome::Failed | Outcome::Faulted(_) => failed.push(alarm.clone()),
            }
        }

        failed.extend(succeeded);
        failed
    }

    /// Applies the dispatch gates to one cycle's batch.
    ///
    /// The throttle timestamp advances **only** when the notifier actually
    /// receives the batch.
    async fn dispatch(&mut self, batch: Vec<AlarmRef>, cycle: u64) {
        if batch.is_empty() {
            return;
        }
        if self.silent {
            self.bus.publish(
                Event::new(EventKind::SummarySilenced)
                    .with_cycle(cycle)
                    .with_batch(batch.len()),
            );
            return;
        }
        if !self.throttle.ready(Instant::now()) {
            self.bus.publish(
                Event::new(EventKind::SummaryThrottled)
                    .with_cycle(cycle)
                    .with_batch(batch.len()),
            );
            return;
        }

        self.notifier.send(&batch).await;
        self.throttle.mark(Instant::now());
        self.bus.publish(
            Event::new(EventKind::SummaryDispatched)
                .with_cycle(cycle)
                .with_batch(batch.len()),
        );
    }

    /// Subscribes to the bus and forwards events to a fresh
    /// [`SubscriberSet`] until the run ends; buffered events are drained
    /// before the listener stops.
    fn spawn_subscriber_listener(&self) -> Option<ListenerHandle> {
        if self.subscribers.is_empty() {
            return None;
        }
        let set = SubscriberSet::new(self.subscribers.clone());
        let mut rx = self.bus.subscribe();
        let stop = CancellationToken::new();
        let observed = stop.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    // Drain buffered events before honoring the stop signal.
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Closed) => break,
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    },
                    _ = observed.cancelled() => break,
                }
            }
            set
        });
        Some(ListenerHandle { stop, handle })
    }
}

impl Default for Spark {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the per-run subscriber listener.
struct ListenerHandle {
    stop: CancellationToken,
    handle: JoinHandle<SubscriberSet>,
}

impl ListenerHandle {
    /// Stops the listener and flushes subscriber queues.
    async fn finish(self) {
        self.stop.cancel();
        if let Ok(set) = self.handle.await {
            set.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarms::{Alarm, AlarmFn, AlarmStatus, StatusCell};
    use crate::error::AlarmError;
    use crate::notify::Notifier;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every batch it receives, as alarm names.
    struct RecordingNotifier {
        batches: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingNotifier {
        fn arc() -> Arc<Self> {
            Arc::new(Self {
                batches: Mutex::new(Vec::new()),
            })
        }

        fn batches(&self) -> Vec<Vec<String>> {
            self.batches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, alarms: &[AlarmRef]) {
            let names = alarms.iter().map(|a| a.name().to_string()).collect();
            self.batches.lock().unwrap().push(names);
        }
    }

    enum Behavior {
        Pass,
        Fail,
        Fault,
        Panic,
    }

    /// Scripted alarm with hook/evaluation counters.
    struct ScriptedAlarm {
        name: &'static str,
        behavior: Behavior,
        status: StatusCell,
        tests: AtomicUsize,
        successes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl ScriptedAlarm {
        fn arc(name: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                status: StatusCell::new(),
                tests: AtomicUsize::new(0),
                successes: AtomicUsize::new(0),
                errors: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Alarm for ScriptedAlarm {
        fn name(&self) -> &str {
            self.name
        }

        fn status(&self) -> AlarmStatus {
            self.status.get()
        }

        fn set_status(&self, status: AlarmStatus) {
            self.status.set(status);
        }

        async fn test(&self) -> Result<bool, AlarmError> {
            self.tests.fetch_add(1, Ordering::Relaxed);
            match self.behavior {
                Behavior::Pass => Ok(true),
                Behavior::Fail => Ok(false),
                Behavior::Fault => Err(AlarmError::Fail {
                    error: "metrics socket gone".to_string(),
                }),
                Behavior::Panic => panic!("alarm blew up"),
            }
        }

        async fn on_success(&self) {
            self.successes.fetch_add(1, Ordering::Relaxed);
        }

        async fn on_error(&self) {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn failing(name: &'static str) -> AlarmRef {
        AlarmFn::arc(name, || async { Ok::<bool, AlarmError>(false) })
    }

    fn passing(name: &'static str) -> AlarmRef {
        AlarmFn::arc(name, || async { Ok::<bool, AlarmError>(true) })
    }

    fn names(alarms: &[AlarmRef]) -> Vec<String> {
        alarms.iter().map(|a| a.name().to_string()).collect()
    }

    #[test]
    fn test_remove_alarm_filters_by_name_preserving_order() {
        let mut spark = Spark::new();
        spark
            .add_alarm(failing("a"))
            .add_alarm(failing("b"))
            .add_alarm(failing("a"))
            .add_alarm(failing("c"));

        spark.remove_alarm("a");
        assert_eq!(names(spark.alarms()), ["b", "c"]);

        spark.remove_alarm("nonexistent");
        assert_eq!(names(spark.alarms()), ["b", "c"]);
    }

    #[tokio::test]
    async fn test_single_failing_alarm_dispatches_one_batch() {
        let notifier = RecordingNotifier::arc();
        let mut spark = Spark::new();
        spark.notifier(notifier.clone()).add_alarm(failing("red"));

        let result = spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(names(&result), ["red"]);
        assert_eq!(notifier.batches(), vec![vec!["red".to_string()]]);
    }

    #[tokio::test]
    async fn test_passing_alarms_not_batched_by_default() {
        let notifier = RecordingNotifier::arc();
        let green = ScriptedAlarm::arc("green", Behavior::Pass);
        let mut spark = Spark::new();
        spark
            .notifier(notifier.clone())
            .add_alarm(green.clone())
            .add_alarm(failing("red"));

        let result = spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(names(&result), ["red"]);
        assert_eq!(notifier.batches(), vec![vec!["red".to_string()]]);
        assert_eq!(green.status(), AlarmStatus::Success);
        assert_eq!(green.successes.load(Ordering::Relaxed), 1);
        assert_eq!(green.errors.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_global_success_flag_batches_failures_first() {
        let notifier = RecordingNotifier::arc();
        let mut spark = Spark::new();
        spark
            .notifier(notifier.clone())
            .send_notifications_on_success(true)
            // Registered before the failure, but batched after it.
            .add_alarm(passing("green"))
            .add_alarm(failing("red"));

        let result = spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(names(&result), ["red", "green"]);
        assert_eq!(
            notifier.batches(),
            vec![vec!["red".to_string(), "green".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_per_alarm_success_flag_is_respected() {
        let notifier = RecordingNotifier::arc();
        let flagged: AlarmRef = Arc::new(
            AlarmFn::new("flagged", || async { Ok::<bool, AlarmError>(true) })
                .with_notify_on_success(true),
        );
        let mut spark = Spark::new();
        spark
            .notifier(notifier.clone())
            .add_alarm(flagged)
            .add_alarm(passing("quiet"));

        let result = spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(names(&result), ["flagged"]);
        assert_eq!(notifier.batches(), vec![vec!["flagged".to_string()]]);
    }

    #[tokio::test]
    async fn test_consecutive_runs_reset_the_throttle_window() {
        let notifier = RecordingNotifier::arc();
        let mut spark = Spark::new();
        spark
            .throttle(Duration::from_secs(3600))
            .notifier(notifier.clone())
            .add_alarm(failing("red"));

        spark.run_with_token(CancellationToken::new()).await.unwrap();
        spark.run_with_token(CancellationToken::new()).await.unwrap();

        // No wall-clock time passed, yet both runs dispatched.
        assert_eq!(notifier.batches().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive_throttle_skips_intermediate_cycles() {
        let notifier = RecordingNotifier::arc();
        let token = CancellationToken::new();
        let cancel = token.clone();
        let evals = Arc::new(AtomicUsize::new(0));
        let counter = evals.clone();

        let flappy: AlarmRef = AlarmFn::arc("flappy", move || {
            let cancel = cancel.clone();
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::Relaxed) + 1 == 3 {
                    cancel.cancel();
                }
                Ok::<bool, AlarmError>(false)
            }
        });

        let mut spark = Spark::new();
        spark
            .keep_alive(true)
            .interval(Duration::from_secs(1))
            .throttle(Duration::from_secs(600))
            .notifier(notifier.clone())
            .add_alarm(flappy);

        let result = spark.run_with_token(token).await.unwrap();

        // Three cycles ran, but only the first one's batch got through: the
        // 600s gap never elapsed within 1s-interval cycles, and skipped
        // cycles must not advance the window.
        assert_eq!(evals.load(Ordering::Relaxed), 3);
        assert_eq!(notifier.batches().len(), 1);
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_silent_never_invokes_the_notifier() {
        let notifier = RecordingNotifier::arc();
        let mut spark = Spark::new();
        spark
            .silent(true)
            .notifier(notifier.clone())
            .add_alarm(failing("red"));

        let result = spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(names(&result), ["red"]);
        assert!(notifier.batches().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_never_reaches_the_notifier() {
        let notifier = RecordingNotifier::arc();
        let mut spark = Spark::new();
        spark.notifier(notifier.clone()).add_alarm(passing("green"));

        let result = spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert!(result.is_empty());
        assert!(notifier.batches().is_empty());
    }

    #[tokio::test]
    async fn test_faulted_alarm_is_isolated_and_batched() {
        let notifier = RecordingNotifier::arc();
        let bad = ScriptedAlarm::arc("bad", Behavior::Fault);
        let red = ScriptedAlarm::arc("red", Behavior::Fail);
        let mut spark = Spark::new();
        spark
            .notifier(notifier.clone())
            .add_alarm(bad.clone())
            .add_alarm(red.clone());

        spark.run_with_token(CancellationToken::new()).await.unwrap();

        // The fault did not starve the second alarm of its evaluation.
        assert_eq!(red.tests.load(Ordering::Relaxed), 1);
        assert_eq!(bad.status(), AlarmStatus::Faulted);
        assert_eq!(red.status(), AlarmStatus::Error);
        // No hook fires for a fault.
        assert_eq!(bad.successes.load(Ordering::Relaxed), 0);
        assert_eq!(bad.errors.load(Ordering::Relaxed), 0);
        assert_eq!(
            notifier.batches(),
            vec![vec!["bad".to_string(), "red".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_panicking_alarm_does_not_abort_the_cycle() {
        let notifier = RecordingNotifier::arc();
        let boom = ScriptedAlarm::arc("boom", Behavior::Panic);
        let red = ScriptedAlarm::arc("red", Behavior::Fail);
        let mut spark = Spark::new();
        spark
            .notifier(notifier.clone())
            .add_alarm(boom.clone())
            .add_alarm(red.clone());

        spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(boom.status(), AlarmStatus::Faulted);
        assert_eq!(red.tests.load(Ordering::Relaxed), 1);
        assert_eq!(
            notifier.batches(),
            vec![vec!["boom".to_string(), "red".to_string()]]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_alarm_timeout_records_a_fault() {
        let notifier = RecordingNotifier::arc();
        let slow = AlarmFn::arc("slow", || async {
            time::sleep(Duration::from_secs(3600)).await;
            Ok::<bool, AlarmError>(true)
        });
        let mut spark = Spark::new();
        spark
            .alarm_timeout(Duration::from_secs(5))
            .notifier(notifier.clone())
            .add_alarm(slow.clone());

        spark.run_with_token(CancellationToken::new()).await.unwrap();

        assert_eq!(slow.status(), AlarmStatus::Faulted);
        assert_eq!(notifier.batches(), vec![vec!["slow".to_string()]]);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let notifier = RecordingNotifier::arc();
        let token = CancellationToken::new();
        token.cancel();

        let mut spark = Spark::new();
        spark.notifier(notifier.clone()).add_alarm(failing("red"));

        let result = spark.run_with_token(token).await.unwrap();

        assert!(result.is_empty());
        assert!(notifier.batches().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_published() {
        let mut spark = Spark::new();
        let mut rx = spark.events();
        spark.silent(true).add_alarm(failing("red"));

        spark.run_with_token(CancellationToken::new()).await.unwrap();

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            [
                EventKind::CycleStarted,
                EventKind::AlarmFailed,
                EventKind::CycleCompleted,
                EventKind::SummarySilenced,
            ]
        );
    }

    #[tokio::test]
    async fn test_subscribers_are_flushed_before_run_returns() {
        struct CountingSub {
            seen: AtomicUsize,
        }

        #[async_trait]
        impl Subscribe for CountingSub {
            async fn on_event(&self, _event: &Event) {
                self.seen.fetch_add(1, Ordering::Relaxed);
            }

            fn name(&self) -> &'static str {
                "counting"
            }
        }

        let sub = Arc::new(CountingSub {
            seen: AtomicUsize::new(0),
        });
        let mut spark = Spark::new();
        spark
            .silent(true)
            .subscriber(sub.clone())
            .add_alarm(failing("red"));

        spark.run_with_token(CancellationToken::new()).await.unwrap();

        // CycleStarted, AlarmFailed, CycleCompleted, SummarySilenced.
        assert_eq!(sub.seen.load(Ordering::Relaxed), 4);
    }
}
