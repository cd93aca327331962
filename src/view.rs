//! Render snapshot handed to the presentation layer each frame.

use serde::Serialize;

use crate::catalog::Track;
use crate::guess::Outcome;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameView {
    /// One row per attempt slot; unused slots are empty strings.
    pub attempts: Vec<String>,
    pub outcome: Outcome,
    pub input: String,
    pub suggestions: Vec<Track>,
    pub is_playing: bool,
    pub can_play: bool,
    pub loading: bool,
    pub can_skip: bool,
    pub can_submit: bool,
    /// Played fraction of the current reveal window, `0..=1`.
    pub progress: f64,
    pub elapsed_label: String,
    pub window_label: String,
    /// Catalog or audio failure shown in place of the player.
    pub error: Option<String>,
    /// The answer, once the round is over.
    pub answer: Option<String>,
}

/// `m:ss`, truncating fractional seconds. Negative and non-finite input
/// renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(7.9), "0:07");
        assert_eq!(format_clock(16.0), "0:16");
        assert_eq!(format_clock(125.4), "2:05");
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }
}
