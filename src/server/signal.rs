// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) stop the accept loop. On non-Unix targets only
// Ctrl+C is available.

use crate::logger;

/// Resolves once the process is asked to shut down.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => logger::log_info("[Signal] SIGTERM received, shutting down"),
        () = ctrl_c() => {}
    }
}

/// Resolves once the process is asked to shut down.
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_info("[Signal] SIGINT received, shutting down"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
