//! Session handle owning the sampling loop.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::probe::{parse_latency_ms, Prober};

use super::{ProbeOutcome, Sample, SessionStats};

/// Default timeout for awaiting the loop task on stop (5 seconds).
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimum allowed probe interval (1 second).
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Sampling parameters for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Probe target (hostname or IP address).
    pub target: String,
    /// Delay between iterations.
    pub interval: Duration,
}

impl SessionConfig {
    /// Create a configuration with the default 1 second interval.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            interval: MIN_INTERVAL,
        }
    }

    /// Set the probe interval.
    ///
    /// Intervals below the minimum are clamped to [`MIN_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if interval < MIN_INTERVAL {
            tracing::warn!(min_interval = ?MIN_INTERVAL,
                "Interval duration is less than minimum allowed. Using minimum duration."
            );
            self.interval = MIN_INTERVAL;
        } else {
            self.interval = interval;
        }
        self
    }
}

/// Handle for one continuous run of the sampling loop.
///
/// Starting a session spawns exactly one loop task; the handle owns that
/// task, the active flag, and the sample series, so there is never more than
/// one loop per handle. Stopping consumes the handle, terminates the loop at
/// the next iteration boundary, and clears the series. Dropping the handle
/// without stopping also terminates the loop within one interval (the loop
/// observes the closed flag channel), but skips the series dump.
pub struct Session {
    id: Uuid,
    config: SessionConfig,
    active: watch::Sender<bool>,
    samples: Arc<RwLock<Vec<Sample>>>,
    latest: watch::Receiver<Option<Sample>>,
    stats: Arc<RwLock<SessionStats>>,
    task: JoinHandle<()>,
}

impl Session {
    /// Start a new session: spawn the loop task and return its handle.
    pub fn start(config: SessionConfig, prober: Arc<dyn Prober>) -> Self {
        let id = Uuid::new_v4();
        let (active_tx, active_rx) = watch::channel(true);
        let (latest_tx, latest_rx) = watch::channel(None);
        let samples = Arc::new(RwLock::new(Vec::new()));
        let stats = Arc::new(RwLock::new(SessionStats::default()));

        let task = tokio::spawn(run_loop(
            id,
            config.clone(),
            prober,
            active_rx,
            Arc::clone(&samples),
            latest_tx,
            Arc::clone(&stats),
        ));

        tracing::info!(session = %id, target = %config.target, interval = ?config.interval, "session started");

        Self {
            id,
            config,
            active: active_tx,
            samples,
            latest: latest_rx,
            stats,
            task,
        }
    }

    /// Session identifier, tagged on all of this session's log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The probe target.
    pub fn target(&self) -> &str {
        &self.config.target
    }

    /// Whether the loop is still live.
    pub fn is_active(&self) -> bool {
        *self.active.borrow() && !self.task.is_finished()
    }

    /// Snapshot of the sample series, in capture order.
    pub fn samples(&self) -> Vec<Sample> {
        self.samples.read().clone()
    }

    /// Number of samples captured so far.
    pub fn sample_count(&self) -> usize {
        self.samples.read().len()
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        *self.latest.borrow()
    }

    /// Watch channel delivering each new sample as it is captured.
    pub fn watch_latest(&self) -> watch::Receiver<Option<Sample>> {
        self.latest.clone()
    }

    /// Snapshot of the iteration counters.
    pub fn stats(&self) -> SessionStats {
        *self.stats.read()
    }

    /// Stop the session with the default timeout.
    pub async fn stop(self) {
        self.stop_with_timeout(DEFAULT_STOP_TIMEOUT).await;
    }

    /// Stop the session: deactivate, await the loop task, clear the series.
    ///
    /// Deactivation is advisory; the loop observes it at the next iteration
    /// boundary (the interval sleep is woken early, so stop waits at most for
    /// the in-flight probe). If the task does not finish within `timeout` it
    /// is abandoned and the series is cleared regardless.
    pub async fn stop_with_timeout(self, timeout: Duration) {
        let Session {
            id,
            active,
            samples,
            stats,
            task,
            ..
        } = self;

        let _ = active.send(false);

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!(session = %id, error = %e, "sampling task failed");
            }
            Err(_) => {
                tracing::warn!(session = %id, timeout = ?timeout, "sampling task did not stop in time; abandoning");
            }
        }

        let series = std::mem::take(&mut *samples.write());
        let final_stats = *stats.read();
        tracing::debug!(
            session = %id,
            series = %serde_json::to_string(&series).unwrap_or_default(),
            produced = final_stats.produced,
            parse_misses = final_stats.parse_misses,
            probe_failures = final_stats.probe_failures,
            "session stopped, series cleared"
        );
        tracing::info!(session = %id, samples = series.len(), "session stopped");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("target", &self.config.target)
            .field("sample_count", &self.samples.read().len())
            .finish_non_exhaustive()
    }
}

/// The polling loop. One probe in flight at a time; samples append in
/// completion order.
async fn run_loop(
    id: Uuid,
    config: SessionConfig,
    prober: Arc<dyn Prober>,
    mut active: watch::Receiver<bool>,
    samples: Arc<RwLock<Vec<Sample>>>,
    latest: watch::Sender<Option<Sample>>,
    stats: Arc<RwLock<SessionStats>>,
) {
    tracing::debug!(session = %id, "sampling loop started");

    while *active.borrow() {
        let (output, probe_failed) = match prober.probe(&config.target).await {
            Ok(text) => (text, false),
            Err(e) => {
                // The error message stands in for the iteration's output
                // text; parsing it will miss and no sample is produced.
                tracing::warn!(session = %id, target = %config.target, error = %e, "probe failed");
                (e.to_string(), true)
            }
        };

        match parse_latency_ms(&output) {
            Some(latency_ms) => {
                let sample = Sample::new(latency_ms);
                samples.write().push(sample);
                stats.write().produced += 1;
                let _ = latest.send(Some(sample));
                tracing::debug!(session = %id, outcome = %ProbeOutcome::Sample, latency_ms, "sample captured");
            }
            None => {
                let outcome = if probe_failed {
                    stats.write().probe_failures += 1;
                    ProbeOutcome::ProbeFailed
                } else {
                    stats.write().parse_misses += 1;
                    ProbeOutcome::ParseMiss
                };
                tracing::debug!(session = %id, outcome = %outcome, "no sample this iteration");
            }
        }

        // Suspend for one interval. A deactivation wakes the sleeper early;
        // either way the flag is re-checked at the loop boundary.
        tokio::select! {
            _ = tokio::time::sleep(config.interval) => {}
            changed = active.changed() => {
                if changed.is_err() {
                    // Handle dropped without stop(); nothing left to observe.
                    break;
                }
            }
        }
    }

    tracing::debug!(session = %id, "sampling loop exited");
}
