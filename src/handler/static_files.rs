//! Static file serving module
//!
//! Fallback route for GET/HEAD paths no endpoint claims. Serves files from
//! the configured root with directory index resolution and MIME inference.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

use crate::config::StaticConfig;
use crate::http::{self, mime};
use crate::logger;

/// Serve a file from the static root, or 404 when missing
pub async fn serve(config: &StaticConfig, path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match load(&config.root, path, &config.index_files).await {
        Some((content, content_type)) => {
            http::build_static_file_response(content, content_type, is_head)
        }
        None => http::build_404_response(),
    }
}

/// Load a file from the root with index file support
async fn load(root: &str, path: &str, index_files: &[String]) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and prevent directory traversal
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let mut file_path = Path::new(root).join(&clean_path);

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{root}': {e}"
            ));
            return None;
        }
    };

    // Directory request: try index files
    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in index_files {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // File not found is common (404), no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }
    if file_path_canonical.is_dir() {
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::get_content_type(file_path_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).expect("write test file");
    }

    #[tokio::test]
    async fn serves_file_with_inferred_content_type() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_file(tmp.path(), "app.js", "console.log(1);");
        let root = tmp.path().to_str().expect("utf-8 path");

        let (content, content_type) = load(root, "/app.js", &[]).await.expect("found");
        assert_eq!(content, b"console.log(1);");
        assert_eq!(content_type, "application/javascript");
    }

    #[tokio::test]
    async fn resolves_directory_index() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_file(tmp.path(), "index.html", "<html></html>");
        let root = tmp.path().to_str().expect("utf-8 path");
        let index = vec!["index.html".to_string()];

        let (content, content_type) = load(root, "/", &index).await.expect("index found");
        assert_eq!(content, b"<html></html>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().to_str().expect("utf-8 path");

        assert!(load(root, "/nope.txt", &[]).await.is_none());
    }

    #[tokio::test]
    async fn traversal_is_blocked() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let sub = tmp.path().join("www");
        std::fs::create_dir(&sub).expect("mkdir");
        write_file(tmp.path(), "secret.txt", "secret");
        let root = sub.to_str().expect("utf-8 path");

        assert!(load(root, "/../secret.txt", &[]).await.is_none());
    }
}
