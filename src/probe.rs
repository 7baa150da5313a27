//! Probe Layer
//!
//! Invokes the external ping utility and extracts latency values from its
//! textual output.
//!
//! # Architecture
//!
//! - [`Prober`]: Core trait for executing one echo probe against a target
//! - [`PingProber`]: Production prober shelling out to the system `ping`
//! - [`extract_latency`]: Pure text-to-latency extraction
//! - [`FakeProber`] / [`DemoProber`]: Scripted and synthetic probers for
//!   tests and offline demo runs
//!
//! # Example
//!
//! ```rust,no_run
//! use pinggraph::probe::{PingProber, Prober};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), pinggraph::probe::ProbeError> {
//! let prober = PingProber::new("ping", Duration::from_secs(5));
//! let output = prober.probe("8.8.8.8").await?;
//! let _latency = pinggraph::probe::parse_latency_ms(&output);
//! # Ok(())
//! # }
//! ```

mod fake;
mod parse;
mod ping;

pub use fake::{DemoProber, FakeProbeEntry, FakeProber};
pub use parse::{extract_latency, parse_latency_ms};
pub use ping::{PingProber, DEFAULT_PROBE_TIMEOUT};

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while executing a probe.
///
/// Probe errors never terminate a sampling session: the loop treats the
/// error's display string as the iteration's output text, so a failed probe
/// simply produces no sample.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe process could not be launched or errored while running.
    #[error("Ping failed: {0}")]
    Spawn(#[from] std::io::Error),

    /// The probe process did not complete within the configured timeout.
    #[error("Ping timed out after {0:?}")]
    Timeout(Duration),
}

/// Core trait for executing one echo probe against a target.
///
/// A probe requests exactly one echo and resolves to the combined textual
/// output of the invocation. Implementations must not block the calling
/// task's executor thread; the blocking wait for the external process
/// belongs on the async runtime.
#[async_trait::async_trait]
pub trait Prober: Send + Sync + 'static {
    /// Execute a single probe against `target` and return its combined
    /// textual output.
    async fn probe(&self, target: &str) -> Result<String, ProbeError>;
}
