//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Routes by method and path:
//! `POST /logs` (ingest), `GET /logs-view` (dump), `GET /gateway-sessions`
//! (proxy), `OPTIONS *` (preflight), and a static file fallback for every
//! other GET/HEAD path.

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::{gateway, ingest, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Route table outcome for a method + path pair
#[derive(Debug, PartialEq, Eq)]
enum Route {
    Preflight,
    Ingest,
    LogDump,
    GatewaySessions,
    Static,
    NotFound,
    MethodNotAllowed,
}

/// Explicit route-table dispatch: method + path to handler
fn route_for(method: &Method, path: &str) -> Route {
    match *method {
        Method::OPTIONS => Route::Preflight,
        Method::POST => {
            if path == "/logs" {
                Route::Ingest
            } else {
                Route::NotFound
            }
        }
        Method::GET | Method::HEAD => match path {
            "/logs-view" => Route::LogDump,
            "/gateway-sessions" => Route::GatewaySessions,
            _ => Route::Static,
        },
        _ => Route::MethodNotAllowed,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);
    let version = version_str(req.version());
    let is_head = method == Method::HEAD;
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = match check_body_size(&req, state.config.http.max_body_size) {
        Some(resp) => resp,
        None => dispatch(req, &state, is_head).await,
    };

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), uri);
        entry.http_version = version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes =
            usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
        entry.user_agent = user_agent;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch the request to its route handler
async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let path = req.uri().path().to_string();

    match route_for(req.method(), &path) {
        Route::Preflight => http::build_preflight_response(),
        Route::Ingest => ingest::handle(req, state).await,
        Route::LogDump => serve_log_dump(state).await,
        Route::GatewaySessions => serve_gateway_sessions(state).await,
        Route::Static => static_files::serve(&state.config.static_files, &path, is_head).await,
        Route::NotFound => http::build_404_response(),
        Route::MethodNotAllowed => {
            logger::log_warning(&format!("Method not allowed: {}", req.method()));
            http::build_405_response()
        }
    }
}

/// `GET /logs-view`: the whole log file as plain text
async fn serve_log_dump(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match state.store.read_all().await {
        Ok(Some(contents)) => http::build_log_dump_response(contents),
        Ok(None) => http::build_log_dump_response("No logs yet".to_string()),
        Err(e) => {
            logger::log_error(&format!("Error reading logs: {e}"));
            http::build_internal_error_response(&format!("Error reading logs: {e}"))
        }
    }
}

/// `GET /gateway-sessions`: relay the external tool's session list
async fn serve_gateway_sessions(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match gateway::fetch_sessions(&state.config.gateway).await {
        Ok(data) => http::build_sessions_response(data),
        Err(e) => {
            logger::log_error(&format!("Gateway CLI failed: {e}"));
            http::build_bad_gateway_response(&format!("Gateway error: {e}"))
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_hits_preflight_on_any_path() {
        assert_eq!(route_for(&Method::OPTIONS, "/"), Route::Preflight);
        assert_eq!(route_for(&Method::OPTIONS, "/logs"), Route::Preflight);
        assert_eq!(route_for(&Method::OPTIONS, "/anything"), Route::Preflight);
    }

    #[test]
    fn post_routes() {
        assert_eq!(route_for(&Method::POST, "/logs"), Route::Ingest);
        assert_eq!(route_for(&Method::POST, "/other"), Route::NotFound);
        assert_eq!(route_for(&Method::POST, "/logs-view"), Route::NotFound);
    }

    #[test]
    fn get_routes() {
        assert_eq!(route_for(&Method::GET, "/logs-view"), Route::LogDump);
        assert_eq!(
            route_for(&Method::GET, "/gateway-sessions"),
            Route::GatewaySessions
        );
        assert_eq!(route_for(&Method::GET, "/index.html"), Route::Static);
        assert_eq!(route_for(&Method::GET, "/"), Route::Static);
        // GET /logs has no handler; it falls through to static serving
        assert_eq!(route_for(&Method::GET, "/logs"), Route::Static);
    }

    #[test]
    fn head_follows_get_routes() {
        assert_eq!(route_for(&Method::HEAD, "/logs-view"), Route::LogDump);
        assert_eq!(route_for(&Method::HEAD, "/style.css"), Route::Static);
    }

    #[test]
    fn other_methods_are_rejected() {
        assert_eq!(route_for(&Method::PUT, "/logs"), Route::MethodNotAllowed);
        assert_eq!(route_for(&Method::DELETE, "/"), Route::MethodNotAllowed);
    }
}
