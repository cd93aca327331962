//! Reveal policy: how many seconds of the clip each attempt count unlocks.
//!
//! The policy is a plain threshold table. It is consulted fresh on every
//! playback event and never cached alongside the attempt history, so the cap
//! can not drift out of sync with the number of attempts consumed.

use crate::error::{Error, Result};
use crate::guess::Outcome;

/// Seconds revealed at attempt index 0..6.
pub const DEFAULT_THRESHOLDS: [f64; 6] = [1.0, 2.0, 4.0, 7.0, 11.0, 16.0];

#[derive(Clone, Debug, PartialEq)]
pub struct RevealPolicy {
    thresholds: Vec<f64>,
}

impl RevealPolicy {
    /// Build a policy from an ordered threshold list. Thresholds must be
    /// positive and non-decreasing; one threshold per attempt.
    pub fn new(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(Error::Config("reveal thresholds must not be empty".into()));
        }
        if thresholds.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(Error::Config(format!(
                "reveal thresholds must be positive, got {:?}",
                thresholds
            )));
        }
        if thresholds.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::Config(format!(
                "reveal thresholds must be non-decreasing, got {:?}",
                thresholds
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Seconds the player may hear after `attempt_count` attempts. Past the end of
    /// the table the whole track is revealed; with an unknown duration that is
    /// `f64::INFINITY`.
    pub fn allowed_seconds(&self, attempt_count: usize, track_duration: Option<f64>) -> f64 {
        match self.thresholds.get(attempt_count) {
            Some(t) => *t,
            None => track_duration.unwrap_or(f64::INFINITY),
        }
    }

    /// The active cap for a round, or `None` when playback is unconstrained
    /// (round won, round lost, or attempts past the table).
    pub fn cap(&self, attempt_count: usize, outcome: Outcome) -> Option<f64> {
        if outcome != Outcome::InProgress {
            return None;
        }
        self.thresholds.get(attempt_count).copied()
    }
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}
