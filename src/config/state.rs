// Application state module
// Shared state handed to every connection task

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::store::LogStore;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Single-writer store behind the ingest endpoint
    pub store: LogStore,
    // Cached config value for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = LogStore::new(config.ingest.log_path());
        let cached_access_log = Arc::new(AtomicBool::new(config.logging.access_log));

        Self {
            config,
            store,
            cached_access_log,
        }
    }
}
