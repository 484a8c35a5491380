//! HTTP response building module
//!
//! Provides builders for the service's responses. Endpoint responses carry
//! the permissive CORS headers browsers need for cross-origin log posting;
//! plain static serving does not.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::Response;

/// Add the permissive CORS header set shared by the preflight and ingest
/// responses
fn with_cors_headers(builder: Builder) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

/// Build the CORS preflight response (OPTIONS on any path)
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    with_cors_headers(Response::builder().status(200))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the ingest success response: `{"status":"ok"}`
pub fn build_json_ok_response() -> Response<Full<Bytes>> {
    with_cors_headers(Response::builder().status(200))
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"status": "ok"}"#)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the log read-back response (full file contents as plain text)
pub fn build_log_dump_response(contents: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(contents)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the gateway session response from the tool's raw stdout bytes
///
/// The bytes are assumed to already be valid JSON and are not re-parsed.
pub fn build_sessions_response(data: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 Bad Request response with a diagnostic message
pub fn build_bad_request_response(message: &str) -> Response<Full<Bytes>> {
    build_error_response(400, message)
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, POST, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_response(413, "413 Payload Too Large")
}

/// Build 500 Internal Server Error response with a diagnostic message
pub fn build_internal_error_response(message: &str) -> Response<Full<Bytes>> {
    build_error_response(500, message)
}

/// Build 502 Bad Gateway response with a diagnostic message
pub fn build_bad_gateway_response(message: &str) -> Response<Full<Bytes>> {
    build_error_response(502, message)
}

/// Build static file response
pub fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_error_response(status: u16, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORS_HEADERS: [&str; 3] = [
        "Access-Control-Allow-Origin",
        "Access-Control-Allow-Methods",
        "Access-Control-Allow-Headers",
    ];

    #[test]
    fn preflight_is_200_with_all_cors_headers_and_no_body() {
        let resp = build_preflight_response();
        assert_eq!(resp.status(), 200);
        for name in CORS_HEADERS {
            assert!(resp.headers().contains_key(name), "missing {name}");
        }
        assert_eq!(
            resp.headers()["Access-Control-Allow-Methods"],
            "POST, OPTIONS"
        );
    }

    #[test]
    fn ingest_ok_carries_cors_and_json_body() {
        let resp = build_json_ok_response();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        for name in CORS_HEADERS {
            assert!(resp.headers().contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn log_dump_is_plain_text_with_origin_header() {
        let resp = build_log_dump_response("No logs yet".to_string());
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn error_statuses() {
        assert_eq!(build_bad_request_response("bad").status(), 400);
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_405_response().status(), 405);
        assert_eq!(build_413_response().status(), 413);
        assert_eq!(build_internal_error_response("boom").status(), 500);
        assert_eq!(build_bad_gateway_response("down").status(), 502);
    }

    #[test]
    fn head_static_response_has_empty_body_but_length() {
        let resp = build_static_file_response(b"hello".to_vec(), "text/plain", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "5");
    }
}
