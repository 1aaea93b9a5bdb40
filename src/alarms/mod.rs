//! # Alarm abstractions and status model.
//!
//! This module provides the core alarm-related types:
//! - [`Alarm`] - trait for implementing async health checks
//! - [`AlarmFn`] - closure-based alarm implementation
//! - [`AlarmRef`] - shared reference to an alarm (`Arc<dyn Alarm>`)
//! - [`AlarmStatus`] - outcome of the most recent evaluation
//! - [`StatusCell`] - atomic per-alarm status storage

mod alarm;
mod alarm_fn;
mod status;

pub use alarm::{Alarm, AlarmRef};
pub use alarm_fn::AlarmFn;
pub use status::{AlarmStatus, StatusCell};
