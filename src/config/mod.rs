// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, GatewayConfig, HttpConfig, IngestConfig, LoggingConfig, ServerConfig, StaticConfig,
};

impl Config {
    /// Load configuration from the default file ("logsink.toml")
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("logsink")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Layering: config file (optional) < `LOGSINK_*` environment < defaults.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("LOGSINK").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("http.request_timeout", 30)?
            .set_default("http.keep_alive", true)?
            .set_default("ingest.log_dir", "logs")?
            .set_default("ingest.log_file", "browser.log")?
            .set_default("static_files.root", ".")?
            .set_default("static_files.index_files", vec!["index.html", "index.htm"])?
            .set_default("gateway.command", "openclaw")?
            .set_default("gateway.args", vec!["sessions", "list", "--json"])?
            .set_default("gateway.timeout_secs", 10)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.ingest.log_dir, std::path::PathBuf::from("logs"));
        assert_eq!(cfg.ingest.log_file, "browser.log");
        assert_eq!(cfg.gateway.command, "openclaw");
        assert_eq!(cfg.gateway.args, vec!["sessions", "list", "--json"]);
        assert_eq!(cfg.gateway.timeout_secs, 10);
        assert_eq!(cfg.static_files.root, ".");
    }

    #[test]
    fn socket_addr_parses() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        let addr = cfg.get_socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8080);
    }
}
