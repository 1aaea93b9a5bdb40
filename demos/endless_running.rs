//! # Example: endless_running
//!
//! Keep-alive daemon mode: cycles repeat until Ctrl-C, with a short interval
//! and an even shorter throttle so the gating is visible.
//!
//! Demonstrates how to:
//! - Run forever with [`Spark::keep_alive`] (cancelled by OS signals).
//! - Mix a metrics-backed alarm with a flaky closure alarm that also
//!   notifies on success.
//! - Watch the loop through the [`LogWriter`] subscriber.
//!
//! ## Flow
//! ```text
//! Spark::run()
//!     ├─► cycle 1: evaluate both alarms → dispatch summary
//!     ├─► sleep 2s
//!     ├─► cycle 2: evaluate → throttled (5s gap not elapsed)
//!     ├─► ...
//!     └─► SIGINT/SIGTERM → return accumulated results
//! ```
//!
//! ## Run
//! Requires the `logging` feature to export [`LogWriter`].
//! ```bash
//! cargo run --example endless_running --features logging
//! ```

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sparkwatch::{AlarmError, AlarmFn, LogWriter, ProcMetrics, Spark, SystemMetrics};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let metrics = ProcMetrics::arc();

    // Alert if CPU load is less than 5, we need to heat it up.
    let low_cpu = AlarmFn::arc("low-cpu", move || {
        let metrics = metrics.clone();
        async move { Ok::<bool, AlarmError>(metrics.load_average().await? >= 5.0) }
    });

    // Coin-flip alarm that also reports its good cycles.
    let flaky = Arc::new(
        AlarmFn::new("flaky", || async {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock before epoch")
                .subsec_nanos();
            Ok::<bool, AlarmError>(nanos % 2 == 0)
        })
        .with_notify_on_success(true),
    );

    let mut spark = Spark::new();
    spark
        .keep_alive(true)
        .interval(Duration::from_secs(2))
        .throttle(Duration::from_secs(5))
        .subscriber(Arc::new(LogWriter))
        .add_alarm(low_cpu)
        .add_alarm(flaky);

    println!("watching; Ctrl-C to stop\n");
    let notified = spark.run().await?;
    println!("\nstopped after selecting {} notifications", notified.len());
    Ok(())
}
