//! Scripted and synthetic probers.
//!
//! [`FakeProber`] replays a fixed script of probe outcomes and is the
//! test double used by the integration tests. [`DemoProber`] synthesizes
//! plausible ping output so the front-end can run without network access.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{ProbeError, Prober};

/// One scripted probe outcome, optionally delivered after a delay.
pub struct FakeProbeEntry {
    response: Result<String, ProbeError>,
    delay: Option<Duration>,
}

impl FakeProbeEntry {
    /// An outcome delivered immediately.
    pub fn immediate(response: Result<String, ProbeError>) -> Self {
        Self {
            response,
            delay: None,
        }
    }

    /// An outcome delivered after `delay` of (tokio) time.
    pub fn with_delay(response: Result<String, ProbeError>, delay: Duration) -> Self {
        Self {
            response,
            delay: Some(delay),
        }
    }
}

impl From<Result<String, ProbeError>> for FakeProbeEntry {
    fn from(response: Result<String, ProbeError>) -> Self {
        Self::immediate(response)
    }
}

/// Prober that replays a fixed script of outcomes, one per probe.
///
/// An exhausted script reads as empty output, which the sampler treats as a
/// parse miss.
#[derive(Default)]
pub struct FakeProber {
    script: Mutex<VecDeque<FakeProbeEntry>>,
}

impl FakeProber {
    /// Create a prober from raw probe results.
    pub fn new(script: Vec<Result<String, ProbeError>>) -> Self {
        Self::with_script(script.into_iter().map(FakeProbeEntry::from).collect())
    }

    /// Create a prober from plain output strings.
    pub fn from_outputs(outputs: &[&str]) -> Self {
        Self::new(outputs.iter().map(|s| Ok((*s).to_string())).collect())
    }

    /// Create a prober from explicit entries.
    pub fn with_script(script: Vec<FakeProbeEntry>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }

    /// Number of scripted outcomes not yet consumed.
    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }

    /// Non-blocking variant of [`remaining`](Self::remaining); `None` while
    /// a probe holds the script lock.
    pub fn try_remaining(&self) -> Option<usize> {
        self.script.try_lock().ok().map(|script| script.len())
    }
}

#[async_trait::async_trait]
impl Prober for FakeProber {
    async fn probe(&self, _target: &str) -> Result<String, ProbeError> {
        let entry = self.script.lock().await.pop_front();
        match entry {
            Some(entry) => {
                if let Some(delay) = entry.delay {
                    tokio::time::sleep(delay).await;
                }
                entry.response
            }
            None => Ok(String::new()),
        }
    }
}

/// Prober that fabricates ping output with jittered latencies.
#[derive(Debug, Clone)]
pub struct DemoProber {
    base_ms: f64,
    jitter_ms: f64,
}

impl DemoProber {
    pub fn new(base_ms: f64, jitter_ms: f64) -> Self {
        Self { base_ms, jitter_ms }
    }
}

impl Default for DemoProber {
    fn default() -> Self {
        Self::new(18.0, 14.0)
    }
}

#[async_trait::async_trait]
impl Prober for DemoProber {
    async fn probe(&self, target: &str) -> Result<String, ProbeError> {
        let latency = self.base_ms + rand::random::<f64>() * self.jitter_ms;
        Ok(format!(
            "64 bytes from {target}: icmp_seq=1 ttl=117 time={latency:.1} ms"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::parse_latency_ms;

    #[tokio::test]
    async fn test_fake_prober_replays_script_in_order() {
        let prober = FakeProber::from_outputs(&["time=10 ms", "garbage"]);
        assert_eq!(prober.remaining().await, 2);
        assert_eq!(prober.probe("8.8.8.8").await.unwrap(), "time=10 ms");
        assert_eq!(prober.probe("8.8.8.8").await.unwrap(), "garbage");
        assert_eq!(prober.remaining().await, 0);
    }

    #[tokio::test]
    async fn test_fake_prober_exhausted_reads_empty() {
        let prober = FakeProber::default();
        assert_eq!(prober.probe("8.8.8.8").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_fake_prober_error_entry() {
        let prober = FakeProber::new(vec![Err(ProbeError::Timeout(Duration::from_secs(1)))]);
        assert!(prober.probe("8.8.8.8").await.is_err());
    }

    #[tokio::test]
    async fn test_demo_prober_output_parses() {
        let prober = DemoProber::new(20.0, 10.0);
        let output = prober.probe("8.8.8.8").await.unwrap();
        let latency = parse_latency_ms(&output).unwrap();
        assert!((20.0..=30.1).contains(&latency));
    }
}
