// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub ingest: IngestConfig,
    pub static_files: StaticConfig,
    pub gateway: GatewayConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
    /// Per-connection request timeout in seconds
    pub request_timeout: u64,
    pub keep_alive: bool,
}

/// Log ingestion configuration
#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Directory holding the log file, created recursively at startup
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`
    pub log_file: String,
}

impl IngestConfig {
    /// Full path of the append-only log file
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Root directory for the static fallback route
    pub root: String,
    /// Files tried when a directory is requested
    pub index_files: Vec<String>,
}

/// Gateway session proxy configuration
///
/// Describes the external CLI invoked by `GET /gateway-sessions`. The tool
/// is expected to print a JSON session list on stdout and exit zero.
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}
