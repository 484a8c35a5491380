// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both terminate the server cleanly with exit
// status 0. There is no reload signal; configuration is read once at start.

/// Resolve when a shutdown signal arrives (Unix: SIGINT or SIGTERM)
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
