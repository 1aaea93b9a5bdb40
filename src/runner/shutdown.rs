//! # OS signal handling for the keep-alive loop.
//!
//! Provides [`cancel_on_termination`], which spawns a watcher that cancels
//! the given token when the process receives a termination signal. The run
//! loop only ever looks at the token; signals are just one way to cancel it.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Other platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use tokio_util::sync::CancellationToken;

/// Cancels `token` when a termination signal arrives.
///
/// Listeners are registered before returning, so an `Err` means no watcher
/// is running at all (and the caller should not assume signal-driven
/// shutdown works).
#[cfg(unix)]
pub(crate) fn cancel_on_termination(token: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigint.recv() => {},
            _ = sigterm.recv() => {},
            _ = sigquit.recv() => {},
        }
        token.cancel();
    });
    Ok(())
}

/// Cancels `token` when a termination signal arrives.
#[cfg(not(unix))]
pub(crate) fn cancel_on_termination(token: CancellationToken) -> std::io::Result<()> {
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        token.cancel();
    });
    Ok(())
}
