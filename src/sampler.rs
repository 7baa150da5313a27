//! Sampling Layer
//!
//! The polling loop and its data model. A [`Session`] handle owns one
//! sampling task from activation to deactivation: each iteration probes the
//! target, parses the output, and appends zero or one [`Sample`] to an
//! in-memory ordered series. Stopping the session terminates the loop at the
//! next iteration boundary and clears the series.
//!
//! # Example
//!
//! ```rust,no_run
//! use pinggraph::probe::PingProber;
//! use pinggraph::sampler::{Session, SessionConfig};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let config = SessionConfig::new("8.8.8.8");
//! let session = Session::start(config, Arc::new(PingProber::default()));
//! // ... read session.samples() / session.latest() ...
//! session.stop().await;
//! # }
//! ```

mod session;

pub use session::{Session, SessionConfig, DEFAULT_STOP_TIMEOUT, MIN_INTERVAL};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// A single latency measurement paired with its capture timestamp.
///
/// Immutable once created. Samples live in an append-only series for the
/// lifetime of a session; the whole series is cleared when the session stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Round-trip latency in milliseconds.
    pub latency_ms: f64,
    /// Wall-clock capture time (UTC).
    pub captured_at: DateTime<Utc>,
}

impl Sample {
    /// Create a sample stamped with the current wall-clock time.
    pub fn new(latency_ms: f64) -> Self {
        Self {
            latency_ms,
            captured_at: Utc::now(),
        }
    }

    /// Capture time as milliseconds since the Unix epoch.
    pub fn epoch_ms(&self) -> i64 {
        self.captured_at.timestamp_millis()
    }
}

/// Per-session iteration counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Iterations that produced a sample.
    pub produced: u64,
    /// Iterations whose output contained no latency pattern.
    pub parse_misses: u64,
    /// Iterations whose probe failed to execute.
    pub probe_failures: u64,
}

impl SessionStats {
    /// Total completed iterations.
    pub fn iterations(&self) -> u64 {
        self.produced + self.parse_misses + self.probe_failures
    }
}

/// Outcome of one sampling iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProbeOutcome {
    /// The output parsed to a latency and a sample was appended.
    Sample,
    /// The probe ran but its output had no latency pattern.
    ParseMiss,
    /// The probe itself failed to execute.
    ProbeFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_epoch_ms() {
        let sample = Sample::new(23.4);
        assert_eq!(sample.epoch_ms(), sample.captured_at.timestamp_millis());
        assert_eq!(sample.latency_ms, 23.4);
    }

    #[test]
    fn test_stats_iterations() {
        let stats = SessionStats {
            produced: 2,
            parse_misses: 1,
            probe_failures: 3,
        };
        assert_eq!(stats.iterations(), 6);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ProbeOutcome::Sample.as_ref(), "sample");
        assert_eq!(ProbeOutcome::ParseMiss.to_string(), "parse_miss");
        assert_eq!(ProbeOutcome::ProbeFailed.to_string(), "probe_failed");
    }
}
