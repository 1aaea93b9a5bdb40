//! # System-metrics capability.
//!
//! Alarms that check machine state compose with a [`SystemMetrics`] provider
//! instead of inheriting metric helpers: hold a [`MetricsRef`], call it
//! inside `test()`, and swap in a fake provider in tests.
//!
//! ## Contents
//! - [`SystemMetrics`] - trait over CPU load, memory, and disk readings
//! - [`MetricsRef`] - shared reference (`Arc<dyn SystemMetrics>`)
//! - [`ProcMetrics`] - Linux implementation backed by `/proc` and `statvfs`

mod proc;
mod provider;

pub use proc::ProcMetrics;
pub use provider::{MetricsRef, SystemMetrics};
