//! Logger module
//!
//! Provides logging utilities for the server:
//! - Server lifecycle logging
//! - Access logging with ingest-traffic suppression
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Whether a formatted access line is suppressed.
///
/// Lines mentioning `/logs` are dropped so high-frequency ingest traffic
/// does not flood the output. The substring check intentionally also
/// matches `/logs-view`.
pub fn is_suppressed(message: &str) -> bool {
    message.contains("/logs")
}

/// Log a formatted access log entry, applying suppression
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    if !is_suppressed(&line) {
        write_info(&line);
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Log sink server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Log file: {}",
        config.ingest.log_path().display()
    ));
    write_info(&format!("Static root: {}", config.static_files.root));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("POST /logs             - Submit log entries");
    write_info("GET  /logs-view        - View accumulated log");
    write_info("GET  /gateway-sessions - Proxy gateway session list");
    write_info("GET  /*                - Static files");
    write_info("======================================\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_shutdown() {
    write_info("\nServer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_lines_are_suppressed() {
        assert!(is_suppressed(r#"[...] 127.0.0.1 "POST /logs HTTP/1.1" 200 16 "-""#));
    }

    #[test]
    fn logs_view_lines_are_also_suppressed() {
        // Substring match covers /logs-view on purpose
        assert!(is_suppressed(r#"[...] 127.0.0.1 "GET /logs-view HTTP/1.1" 200 42 "-""#));
    }

    #[test]
    fn other_lines_are_kept() {
        assert!(!is_suppressed(
            r#"[...] 127.0.0.1 "GET /index.html HTTP/1.1" 200 512 "-""#
        ));
        assert!(!is_suppressed(
            r#"[...] 127.0.0.1 "GET /gateway-sessions HTTP/1.1" 200 2 "-""#
        ));
    }
}
