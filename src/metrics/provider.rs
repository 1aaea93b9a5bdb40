//! # SystemMetrics trait: machine-state readings for alarms.
//!
//! The four base readings mirror what resource alarms actually compare
//! against: load average, free/total disk bytes, and a named `/proc/meminfo`
//! row. Derived convenience methods (percentages, common memory rows) are
//! provided as defaults so every implementation gets them for free.
//!
//! ## Rules
//! - A *missing identifier* in an otherwise readable memory table is not an
//!   error: [`memory_kb`](SystemMetrics::memory_kb) resolves to `Ok(0)`.
//! - A missing or unreadable source is a [`MetricsError`]; the runner turns
//!   that into a `Faulted` alarm outcome and retries on the next cycle.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::MetricsError;

/// Shared reference to a metrics provider.
pub type MetricsRef = Arc<dyn SystemMetrics>;

/// # Machine-state readings.
///
/// Implementations may read procfs, call into syscalls, or serve canned
/// values (tests). Readings are point-in-time; the provider holds no
/// history.
#[async_trait]
pub trait SystemMetrics: Send + Sync + 'static {
    /// One-minute load average.
    async fn load_average(&self) -> Result<f64, MetricsError>;

    /// Free bytes on the filesystem containing `path`.
    async fn free_disk_bytes(&self, path: &Path) -> Result<u64, MetricsError>;

    /// Total bytes on the filesystem containing `path`.
    async fn total_disk_bytes(&self, path: &Path) -> Result<u64, MetricsError>;

    /// Value in kB for the given memory-table identifier (e.g. "MemTotal").
    ///
    /// Resolves to `Ok(0)` when the identifier is absent from the table.
    async fn memory_kb(&self, identifier: &str) -> Result<u64, MetricsError>;

    /// Free disk space as a percentage (0-100) of the filesystem containing
    /// `path`. An empty filesystem total yields `0.0`.
    async fn free_disk_percent(&self, path: &Path) -> Result<f64, MetricsError> {
        let free = self.free_disk_bytes(path).await?;
        let total = self.total_disk_bytes(path).await?;
        if total == 0 {
            return Ok(0.0);
        }
        Ok(free as f64 * 100.0 / total as f64)
    }

    /// Total memory in kB.
    async fn total_memory_kb(&self) -> Result<u64, MetricsError> {
        self.memory_kb("MemTotal").await
    }

    /// Free memory in kB.
    async fn free_memory_kb(&self) -> Result<u64, MetricsError> {
        self.memory_kb("MemFree").await
    }

    /// Free memory as a percentage (0-100). A zero memory total yields
    /// `0.0`.
    async fn free_memory_percent(&self) -> Result<f64, MetricsError> {
        let free = self.free_memory_kb().await?;
        let total = self.total_memory_kb().await?;
        if total == 0 {
            return Ok(0.0);
        }
        Ok(free as f64 * 100.0 / total as f64)
    }
}
