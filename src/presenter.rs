//! Presentation Layer
//!
//! Pure projection of sampler state into a renderable view. No business
//! logic lives here: the display series is the last [`DISPLAY_WINDOW`]
//! samples in chronological order, and the readout is the latest latency as
//! text.

use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::sampler::Sample;

/// Number of trailing samples shown on the chart.
pub const DISPLAY_WINDOW: usize = 7;

/// Placeholder readout when no sample exists yet.
const EMPTY_READOUT: &str = "-- ms";

/// Whether a sampling session is currently live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SessionStatus {
    /// A session is active and sampling.
    Running,
    /// No session is active.
    Idle,
}

/// Renderable view of the sampler state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    /// Toggle state.
    pub status: SessionStatus,
    /// Latest latency as text, e.g. `"23.4 ms"`, or `"-- ms"` when empty.
    pub readout: String,
    /// Chart points: `x` = index within the displayed subsequence,
    /// `y` = latency in milliseconds, chronological.
    pub points: Vec<(f64, f64)>,
}

impl DisplayState {
    /// Largest displayed latency, for chart axis scaling.
    pub fn max_latency(&self) -> f64 {
        self.points.iter().map(|&(_, y)| y).fold(0.0, f64::max)
    }
}

/// Project sampler state into a [`DisplayState`].
///
/// The displayed subsequence is always `samples[max(0, len - window)..]`,
/// preserving chronological order, for any series length.
pub fn project(active: bool, samples: &[Sample], window: usize) -> DisplayState {
    let start = samples.len().saturating_sub(window);
    let points = samples[start..]
        .iter()
        .enumerate()
        .map(|(i, sample)| (i as f64, sample.latency_ms))
        .collect();

    let readout = match samples.last() {
        Some(sample) => format!("{} ms", sample.latency_ms),
        None => EMPTY_READOUT.to_string(),
    };

    DisplayState {
        status: if active {
            SessionStatus::Running
        } else {
            SessionStatus::Idle
        },
        readout,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn samples_of(latencies: &[f64]) -> Vec<Sample> {
        latencies.iter().map(|&ms| Sample::new(ms)).collect()
    }

    #[test]
    fn test_project_empty() {
        let view = project(false, &[], DISPLAY_WINDOW);
        assert_eq!(view.status, SessionStatus::Idle);
        assert_eq!(view.readout, "-- ms");
        assert!(view.points.is_empty());
        assert_eq!(view.max_latency(), 0.0);
    }

    #[test]
    fn test_project_short_series() {
        let samples = samples_of(&[10.0, 15.2]);
        let view = project(true, &samples, DISPLAY_WINDOW);
        assert_eq!(view.status, SessionStatus::Running);
        assert_eq!(view.readout, "15.2 ms");
        assert_eq!(view.points, vec![(0.0, 10.0), (1.0, 15.2)]);
    }

    #[test]
    fn test_project_takes_last_window_in_order() {
        let samples = samples_of(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let view = project(true, &samples, DISPLAY_WINDOW);
        assert_eq!(view.points.len(), 7);
        let latencies: Vec<f64> = view.points.iter().map(|&(_, y)| y).collect();
        assert_eq!(latencies, vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_project_exact_window() {
        let samples = samples_of(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let view = project(true, &samples, DISPLAY_WINDOW);
        assert_eq!(view.points.len(), 7);
        assert_eq!(view.points[0], (0.0, 1.0));
        assert_eq!(view.points[6], (6.0, 7.0));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Running.to_string(), "RUNNING");
        assert_eq!(SessionStatus::Idle.as_ref(), "IDLE");
    }

    proptest! {
        #[test]
        fn prop_window_is_chronological_tail(
            latencies in proptest::collection::vec(0.0f64..10_000.0, 0..200),
            window in 1usize..20,
        ) {
            let samples = samples_of(&latencies);
            let view = project(true, &samples, window);

            let start = latencies.len().saturating_sub(window);
            let expected: Vec<(f64, f64)> = latencies[start..]
                .iter()
                .enumerate()
                .map(|(i, &ms)| (i as f64, ms))
                .collect();

            prop_assert_eq!(view.points, expected);
        }
    }
}
