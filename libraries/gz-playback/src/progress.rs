//! Progress projection
//!
//! Turns raw `(current, duration)` pairs into what the progress bar, the
//! scrubber and the elapsed/total labels render.

use serde::{Deserialize, Serialize};

/// Scrubber resolution (`0..=SCRUB_MAX`)
pub const SCRUB_MAX: u16 = 1000;

/// Format seconds as `m:ss`
///
/// Non-finite or negative input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Usable duration: known, finite and positive
pub(crate) fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Rendered playback progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Position in seconds
    pub current: f64,

    /// Duration in seconds, if known
    pub duration: Option<f64>,

    /// Progress bar fill, `0.0..=100.0`
    pub percent: f64,

    /// Scrubber value, `0..=1000`
    pub scrub_value: u16,

    /// Elapsed label (`m:ss`)
    pub elapsed_display: String,

    /// Total label (`m:ss`, `0:00` while unknown)
    pub duration_display: String,
}

impl ProgressUpdate {
    /// Project a position/duration pair
    pub fn new(current: f64, duration: Option<f64>) -> Self {
        let current = if current.is_finite() { current.max(0.0) } else { 0.0 };

        let percent = match known_duration(duration) {
            Some(d) => (current / d * 100.0).clamp(0.0, 100.0),
            None => 0.0,
        };

        Self {
            current,
            duration,
            percent,
            scrub_value: (percent * 10.0).round() as u16,
            elapsed_display: format_time(current),
            duration_display: duration.map(format_time).unwrap_or_else(|| format_time(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn format_time_rejects_garbage() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn update_with_known_duration() {
        let update = ProgressUpdate::new(30.0, Some(120.0));
        assert_eq!(update.percent, 25.0);
        assert_eq!(update.scrub_value, 250);
        assert_eq!(update.elapsed_display, "0:30");
        assert_eq!(update.duration_display, "2:00");
    }

    #[test]
    fn update_without_duration_is_zero_percent() {
        for duration in [None, Some(0.0), Some(f64::NAN)] {
            let update = ProgressUpdate::new(12.0, duration);
            assert_eq!(update.percent, 0.0);
            assert_eq!(update.scrub_value, 0);
        }
    }

    #[test]
    fn update_clamps_past_the_end() {
        let update = ProgressUpdate::new(130.0, Some(120.0));
        assert_eq!(update.percent, 100.0);
        assert_eq!(update.scrub_value, SCRUB_MAX);
    }
}
