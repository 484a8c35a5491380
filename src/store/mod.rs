//! Append-only log store module
//!
//! Owns the newline-delimited JSON log file. The file is created on first
//! write, grows monotonically, and is never rotated or truncated here; the
//! on-disk format is the contract other tools read.

use std::io;
use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only NDJSON file store
///
/// Appends are serialized through an async mutex so concurrent requests
/// cannot interleave partial lines.
pub struct LogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LogStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create the log directory if it does not exist.
    ///
    /// Called once at process start, before the listener binds.
    pub fn init_dir(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Append one line plus a trailing newline, flushing before the handle
    /// is released. The handle is opened per call; no state is held between
    /// requests.
    pub async fn append_line(&self, line: &str) -> io::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        // Single write_all keeps the entry in one append syscall
        file.write_all(&buf).await?;
        file.flush().await?;
        Ok(())
    }

    /// Read the entire file into memory.
    ///
    /// Returns `Ok(None)` when no log file exists yet.
    pub async fn read_all(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn store_in(dir: &Path) -> LogStore {
        LogStore::new(dir.join("logs").join("browser.log"))
    }

    #[tokio::test]
    async fn read_before_any_write_is_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        store.init_dir().expect("init_dir");

        assert_eq!(store.read_all().await.expect("read"), None);
    }

    #[tokio::test]
    async fn appends_are_newline_terminated_and_ordered() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        store.init_dir().expect("init_dir");

        store
            .append_line(r#"{"msg":"first"}"#)
            .await
            .expect("append");
        store
            .append_line(r#"{"msg":"second"}"#)
            .await
            .expect("append");

        let contents = store.read_all().await.expect("read").expect("exists");
        assert_eq!(contents, "{\"msg\":\"first\"}\n{\"msg\":\"second\"}\n");

        // Each line independently parseable
        for line in contents.lines() {
            let value: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
            assert!(value.is_object());
        }
    }

    #[tokio::test]
    async fn init_dir_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        store.init_dir().expect("first");
        store.init_dir().expect("second");
    }
}
