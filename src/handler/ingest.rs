//! Log ingest module
//!
//! Implements `POST /logs`: validates the submitted JSON entry, injects the
//! server-side timestamp, and appends one NDJSON line to the log store.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Key injected into entries that lack a submission timestamp
const SERVER_TIMESTAMP_KEY: &str = "serverTimestamp";

/// Ingest failure classification
///
/// Malformed client input maps to 400; everything else (encoding, I/O) is an
/// internal failure reported as 500 with the error text in the body.
#[derive(Debug)]
pub enum IngestError {
    InvalidJson(serde_json::Error),
    NotAnObject,
    InvalidEncoding(std::str::Utf8Error),
    Serialize(serde_json::Error),
    Io(std::io::Error),
}

impl IngestError {
    /// HTTP status this error maps to
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidJson(_) | Self::NotAnObject => 400,
            Self::InvalidEncoding(_) | Self::Serialize(_) | Self::Io(_) => 500,
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(e) => write!(f, "Invalid JSON: {e}"),
            Self::NotAnObject => write!(f, "Log entry must be an object"),
            Self::InvalidEncoding(e) => write!(f, "Internal server error: {e}"),
            Self::Serialize(e) => write!(f, "Internal server error: {e}"),
            Self::Io(e) => write!(f, "Internal server error: {e}"),
        }
    }
}

/// Handle `POST /logs`
pub async fn handle(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return http::build_internal_error_response(&format!(
                "Internal server error: {e}"
            ));
        }
    };

    match ingest_entry(&body, state).await {
        Ok(()) => http::build_json_ok_response(),
        Err(e) => {
            let message = e.to_string();
            if e.status() == 400 {
                http::build_bad_request_response(&message)
            } else {
                logger::log_error(&format!("Failed to write log: {e}"));
                http::build_internal_error_response(&message)
            }
        }
    }
}

/// Validate the body and append it to the store. No write occurs on any
/// validation failure.
async fn ingest_entry(body: &[u8], state: &Arc<AppState>) -> Result<(), IngestError> {
    let text = std::str::from_utf8(body).map_err(IngestError::InvalidEncoding)?;
    let line = prepare_entry(text)?;
    state.store.append_line(&line).await.map_err(IngestError::Io)
}

/// Parse a log entry, require a JSON object, inject `serverTimestamp` if
/// absent, and serialize back to a single line. Non-ASCII characters are
/// preserved unescaped.
pub fn prepare_entry(body: &str) -> Result<String, IngestError> {
    let mut entry: Value = serde_json::from_str(body).map_err(IngestError::InvalidJson)?;

    let map = entry.as_object_mut().ok_or(IngestError::NotAnObject)?;
    map.entry(SERVER_TIMESTAMP_KEY)
        .or_insert_with(|| Value::String(current_timestamp()));

    serde_json::to_string(&entry).map_err(IngestError::Serialize)
}

/// Wall-clock time as an ISO-8601 string with microsecond precision
fn current_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
