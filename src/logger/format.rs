//! Access log format module
//!
//! Supports `combined` (Apache/Nginx style), `json`, and custom patterns
//! with `$variable` substitution.

use chrono::Local;

/// Access log entry containing request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI (path plus query string)
    pub uri: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// User-Agent header
    pub user_agent: Option<String>,
}

impl AccessLogEntry {
    /// Create a new access log entry with the current timestamp
    pub fn new(remote_addr: String, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            uri,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            user_agent: None,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.uri, self.http_version)
    }

    /// Combined-style format prefixed with an ISO-8601 timestamp
    /// `[$time_iso8601] $remote_addr "$request" $status $body_bytes_sent "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "[{}] {} \"{}\" {} {} \"{}\"",
            self.time.format("%Y-%m-%dT%H:%M:%S%.6f"),
            self.remote_addr,
            self.request_line(),
            self.status,
            self.body_bytes,
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "uri": self.uri,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "user_agent": self.user_agent,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables: `$remote_addr`, `$time_iso8601`, `$request`,
    /// `$request_method`, `$request_uri`, `$status`, `$body_bytes_sent`,
    /// `$http_user_agent`
    fn format_custom(&self, pattern: &str) -> String {
        // Longer variables first to avoid partial replacement
        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace(
                "$time_iso8601",
                &self.time.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            )
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.uri)
            .replace("$request", &self.request_line())
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
            .replace(
                "$http_user_agent",
                self.user_agent.as_deref().unwrap_or("-"),
            )
    }
}
