//! # Example: low_cpu
//!
//! An alarm composed with the system-metrics capability: it fires when the
//! machine is *too idle* (load average under 5 — a batch box that should
//! always be busy).
//!
//! Demonstrates how to:
//! - Hold a [`MetricsRef`] inside an alarm instead of inheriting helpers.
//! - Turn a metrics reading into an alarm verdict with `?`.
//! - Use the default [`ConsoleNotifier`] output.
//!
//! ## Run
//! ```bash
//! cargo run --example low_cpu
//! ```

use async_trait::async_trait;
use sparkwatch::{
    Alarm, AlarmError, AlarmStatus, MetricsRef, ProcMetrics, Spark, StatusCell, SystemMetrics,
};

/// Alerts when CPU load is less than 5: we need to heat it up.
struct LowCpuAlarm {
    metrics: MetricsRef,
    status: StatusCell,
}

impl LowCpuAlarm {
    fn new(metrics: MetricsRef) -> Self {
        Self {
            metrics,
            status: StatusCell::new(),
        }
    }
}

#[async_trait]
impl Alarm for LowCpuAlarm {
    fn name(&self) -> &str {
        "low-cpu"
    }

    fn status(&self) -> AlarmStatus {
        self.status.get()
    }

    fn set_status(&self, status: AlarmStatus) {
        self.status.set(status);
    }

    async fn test(&self) -> Result<bool, AlarmError> {
        let load = self.metrics.load_average().await?;
        Ok(load >= 5.0)
    }

    fn error_message(&self) -> &str {
        "load average dropped below 5, the fleet is slacking"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. One shared metrics provider for all alarms
    let metrics = ProcMetrics::arc();

    // 2. Register the composed alarm; ConsoleNotifier is the default sink
    let mut spark = Spark::new();
    spark.add_alarm(std::sync::Arc::new(LowCpuAlarm::new(metrics)));

    // 3. One cycle: a quiet machine prints an alert line
    spark.run().await?;
    Ok(())
}
