//! Gateway session proxy module
//!
//! Implements `GET /gateway-sessions` by invoking the configured external
//! CLI (`<tool> sessions list --json`) and relaying its stdout. The server
//! calls the tool so browsers avoid cross-origin restrictions.
//!
//! The collaborator is a narrow seam: `fetch_sessions(config)` returns raw
//! JSON bytes or a typed error, so the subprocess can later be replaced by
//! a direct API call without touching the routing logic.

use hyper::body::Bytes;
use std::fmt;
use std::time::Duration;
use tokio::process::Command;

use crate::config::GatewayConfig;

/// Gateway invocation failure
#[derive(Debug)]
pub enum GatewayError {
    /// The tool could not be started (missing from PATH, permissions)
    Spawn(std::io::Error),
    /// The tool did not finish within the configured timeout
    Timeout(u64),
    /// The tool exited non-zero; stderr is carried for diagnostics
    NonZeroExit {
        code: Option<i32>,
        stderr: String,
    },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to spawn gateway CLI: {e}"),
            Self::Timeout(secs) => write!(f, "gateway CLI timed out after {secs}s"),
            Self::NonZeroExit { code, stderr } => match code {
                Some(code) => write!(f, "gateway CLI exited with status {code}: {stderr}"),
                None => write!(f, "gateway CLI terminated by signal: {stderr}"),
            },
        }
    }
}

/// Run the session-listing tool and capture its stdout.
///
/// Arguments are passed directly to the process, never through a shell. A
/// child still running at the timeout is killed. The returned bytes are
/// assumed to already be valid JSON and are not re-parsed here.
pub async fn fetch_sessions(config: &GatewayConfig) -> Result<Bytes, GatewayError> {
    let output = tokio::time::timeout(
        Duration::from_secs(config.timeout_secs),
        Command::new(&config.command)
            .args(&config.args)
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| GatewayError::Timeout(config.timeout_secs))?
    .map_err(GatewayError::Spawn)?;

    if !output.status.success() {
        return Err(GatewayError::NonZeroExit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    Ok(Bytes::from(output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(command: &str, args: &[&str], timeout_secs: u64) -> GatewayConfig {
        GatewayConfig {
            command: command.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            timeout_secs,
        }
    }

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let bytes = fetch_sessions(&gateway("echo", &["[]"], 5))
            .await
            .expect("echo should succeed");
        assert_eq!(&bytes[..], b"[]\n");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let err = fetch_sessions(&gateway("false", &[], 5))
            .await
            .expect_err("false exits non-zero");
        assert!(matches!(err, GatewayError::NonZeroExit { .. }), "{err}");
    }

    #[tokio::test]
    async fn missing_command_is_a_spawn_error() {
        let err = fetch_sessions(&gateway("logsink-no-such-tool", &[], 5))
            .await
            .expect_err("missing tool");
        assert!(matches!(err, GatewayError::Spawn(_)), "{err}");
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let err = fetch_sessions(&gateway("sleep", &["5"], 1))
            .await
            .expect_err("must time out");
        assert!(matches!(err, GatewayError::Timeout(1)), "{err}");
    }
}
