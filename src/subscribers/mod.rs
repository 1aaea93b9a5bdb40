//! # Event subscribers: the crate's observability layer.
//!
//! Runner lifecycle events are broadcast on the [`Bus`](crate::Bus); this
//! module provides the [`Subscribe`] extension point for consuming them and
//! the [`SubscriberSet`] fan-out that delivers events to every subscriber
//! without ever blocking the run loop.
//!
//! ## Architecture
//! ```text
//! Spark ── publish(Event) ──► Bus ──► subscriber listener (in Spark::run)
//!                                          │
//!                                          ▼
//!                                   SubscriberSet::emit(&Event)
//!                              ┌─────────┬─────────┐
//!                              ▼         ▼         ▼
//!                         [queue S1] [queue S2] [queue SN]
//!                              │         │         │
//!                         worker S1  worker S2  worker SN
//!                              │         │         │
//!                        sub.on_event(&Event) (per subscriber)
//! ```
//!
//! ## Contents
//! - [`Subscribe`] trait for custom event handlers
//! - [`SubscriberSet`] per-subscriber bounded queues + worker tasks
//! - [`LogWriter`] stdout logger (feature `logging`)

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
