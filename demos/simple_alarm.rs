//! # Example: simple_alarm
//!
//! Minimal example of a single custom alarm evaluated once.
//!
//! Demonstrates how to:
//! - Implement the [`Alarm`] trait with a [`StatusCell`].
//! - Register it on a [`Spark`] runner.
//! - Run one cycle and inspect the result.
//!
//! ## Flow
//! ```text
//! Spark::run()
//!     ├─► reset throttle window
//!     ├─► evaluate_alarm("my-custom-alarm")
//!     │     ├─► test() → Ok(true)
//!     │     ├─► on_success()
//!     │     └─► status = Success
//!     ├─► batch empty → nothing dispatched
//!     └─► return
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example simple_alarm
//! ```

use async_trait::async_trait;
use sparkwatch::{Alarm, AlarmError, AlarmStatus, Spark, StatusCell};

/// A check that always passes.
struct MyCustomAlarm {
    status: StatusCell,
}

#[async_trait]
impl Alarm for MyCustomAlarm {
    fn name(&self) -> &str {
        "my-custom-alarm"
    }

    fn status(&self) -> AlarmStatus {
        self.status.get()
    }

    fn set_status(&self, status: AlarmStatus) {
        self.status.set(status);
    }

    async fn test(&self) -> Result<bool, AlarmError> {
        Ok(true)
    }

    async fn on_success(&self) {
        println!("success");
    }

    async fn on_error(&self) {
        println!("err");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the runner (defaults are fine for a one-shot check)
    let mut spark = Spark::new();

    // 2. Register the alarm
    spark.add_alarm(std::sync::Arc::new(MyCustomAlarm {
        status: StatusCell::new(),
    }));

    // 3. One cycle; the returned list holds the alarms that would notify
    let notified = spark.run().await?;
    println!("alarms selected for notification: {}", notified.len());
    Ok(())
}
