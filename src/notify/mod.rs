//! # Notification sinks.
//!
//! This module provides the [`Notifier`] capability the runner dispatches
//! throttled alarm batches to, plus the built-in console sink:
//! - [`Notifier`] - trait for implementing batch sinks (console, email,
//!   webhook, ...)
//! - [`NotifierRef`] - shared reference to a notifier (`Arc<dyn Notifier>`)
//! - [`ConsoleNotifier`] - default sink printing one line per alarm

mod console;
mod notifier;

pub use console::ConsoleNotifier;
pub use notifier::{Notifier, NotifierRef};
