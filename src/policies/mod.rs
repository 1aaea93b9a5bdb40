//! Notification pacing policies.
//!
//! This module groups the knobs that control **when** a computed batch is
//! actually handed to the notifier.
//!
//! ## Contents
//! - [`Throttle`] minimum elapsed time required between two dispatched
//!   summaries
//!
//! ## Quick wiring
//! ```text
//! Spark::dispatch {
//!     batch empty?      ─► skip
//!     silent?           ─► skip
//!     throttle.ready()? ─► notifier.send(batch); throttle.mark(now)
//!     else              ─► discard batch (never queued or deferred)
//! }
//! ```
//!
//! ## Defaults
//! - The runner configures the gap via [`Spark::throttle`](crate::Spark::throttle)
//!   (25 minutes unless overridden).

mod throttle;

pub use throttle::Throttle;
