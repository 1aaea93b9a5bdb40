//! Runtime core: the evaluation loop and its plumbing.
//!
//! This module contains the embedded implementation of the sparkwatch
//! runtime. The only public API from this module is [`Spark`], which owns
//! the alarm collection, the notifier, and all timing/mode state.
//!
//! Internal modules:
//! - [`spark`]: the runner itself (configuration surface + cycle loop);
//! - [`cycle`]: evaluates one alarm with timeout/panic isolation and event
//!   publishing;
//! - [`shutdown`]: binds OS termination signals to a cancellation token.

mod cycle;
mod shutdown;
mod spark;

pub use spark::Spark;
