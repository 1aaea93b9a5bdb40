//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by the runner.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: the [`Spark`](crate::Spark) run loop (cycle, alarm,
//!   summary, and shutdown events).
//! - **Consumers**: the runner's subscriber listener (fans out to the
//!   [`SubscriberSet`](crate::SubscriberSet)) and any receiver obtained via
//!   [`Spark::events`](crate::Spark::events).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
