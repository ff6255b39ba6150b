//! One-shot seek applied once the driver knows the duration

use gz_core::TrackId;

use crate::progress::known_duration;

/// Seek waiting for the next `MetadataLoaded`
///
/// Bound to the track it was registered for; starting another track drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSeek {
    /// Track the seek belongs to
    pub track_id: TrackId,
    /// Target position in seconds
    pub position: f64,
}

impl PendingSeek {
    /// Register a seek
    pub fn new(track_id: TrackId, position: f64) -> Self {
        Self { track_id, position }
    }

    /// Target position if `0 < position < duration`
    pub fn target_within(&self, duration: Option<f64>) -> Option<f64> {
        let duration = known_duration(duration)?;
        (self.position.is_finite() && self.position > 0.0 && self.position < duration)
            .then_some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seek(position: f64) -> PendingSeek {
        PendingSeek::new(TrackId::new("t3"), position)
    }

    #[test]
    fn target_inside_duration() {
        assert_eq!(seek(42.0).target_within(Some(120.0)), Some(42.0));
    }

    #[test]
    fn target_outside_duration_is_dropped() {
        assert_eq!(seek(120.0).target_within(Some(120.0)), None);
        assert_eq!(seek(500.0).target_within(Some(120.0)), None);
        assert_eq!(seek(0.0).target_within(Some(120.0)), None);
        assert_eq!(seek(f64::NAN).target_within(Some(120.0)), None);
    }

    #[test]
    fn unknown_duration_drops_target() {
        assert_eq!(seek(42.0).target_within(None), None);
        assert_eq!(seek(42.0).target_within(Some(f64::INFINITY)), None);
    }
}
