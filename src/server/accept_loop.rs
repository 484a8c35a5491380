// Accept loop module
// Runs the listener until a shutdown signal arrives

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal;
use crate::config;
use crate::logger;

/// Accept connections until SIGINT/SIGTERM, then return cleanly.
///
/// In-flight connections finish on their own tasks; each is already bounded
/// by the request timeout.
pub async fn run_accept_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = signal::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
