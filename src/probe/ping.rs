//! Production prober shelling out to the system ping utility.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::{ProbeError, Prober};

/// Default probe timeout (5 seconds).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Prober that runs `ping -c 1 <target>` and captures its combined output.
///
/// The process exit status is logged at debug level and otherwise ignored;
/// only the textual output matters to the sampler.
#[derive(Debug, Clone)]
pub struct PingProber {
    command: String,
    timeout: Duration,
}

impl PingProber {
    /// Create a new prober running `command` with the given per-probe timeout.
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    /// The configured ping command.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for PingProber {
    fn default() -> Self {
        Self::new("ping", DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait::async_trait]
impl Prober for PingProber {
    async fn probe(&self, target: &str) -> Result<String, ProbeError> {
        let mut cmd = Command::new(&self.command);
        #[cfg(not(windows))]
        cmd.arg("-c").arg("1");
        #[cfg(windows)]
        cmd.arg("-n").arg("1");
        cmd.arg(target).stdin(Stdio::null()).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        if !output.status.success() {
            tracing::debug!(target, status = %output.status, "probe exited non-zero");
        }

        // Combined output: diagnostics on stderr (e.g. "unknown host") are
        // part of the text the parser sees, same as shell `2>&1`.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }
        Ok(text)
    }
}
