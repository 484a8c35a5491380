// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::config;
use crate::handler;
use crate::logger;

/// Serve one accepted connection in a spawned local task.
///
/// Wraps the stream in `TokioIo`, configures HTTP/1.1 keep-alive, serves
/// the connection with the request handler, and bounds the whole exchange
/// with the configured request timeout.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
) {
    let state = Arc::clone(state);

    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let timeout_duration = std::time::Duration::from_secs(state.config.http.request_timeout);

        let mut builder = http1::Builder::new();
        if state.config.http.keep_alive {
            builder.keep_alive(true);
        }

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}
