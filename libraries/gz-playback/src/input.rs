//! User input interpretation
//!
//! Maps keyboard keys and touch gestures on the now-playing surface to
//! player commands. Recognition is pure; the host feeds coordinates and
//! timestamps.

use gz_core::TrackId;
use serde::{Deserialize, Serialize};

/// Movement (px) after which a touch no longer counts as a tap
pub const TAP_SLOP_PX: f64 = 8.0;

/// Minimum horizontal travel (px) for a swipe
pub const SWIPE_MIN_PX: f64 = 60.0;

/// Maximum gap (ms) between two taps of a double tap
pub const DOUBLE_TAP_MS: f64 = 320.0;

/// Command understood by `Player::dispatch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "camelCase")]
pub enum InputCommand {
    /// Play/pause
    TogglePlay,
    /// Next track
    Next,
    /// Previous track
    Previous,
    /// Flip shuffle
    ToggleShuffle,
    /// Flip repeat-one
    ToggleRepeat,
    /// Flip the favorites-only filter
    ToggleFavoritesOnly,
    /// Flip a track's favorite flag
    ToggleFavorite(TrackId),
    /// Row button in the filtered list
    PlayRow(usize),
    /// Search box contents
    Search(String),
    /// Scrubber position, `0..=1000`
    Scrub(u16),
}

impl InputCommand {
    /// Keyboard shortcut for a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Spacebar" => Some(Self::TogglePlay),
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            _ => None,
        }
    }
}

/// Gesture recognized on touch end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureAction {
    /// Double tap
    TogglePlay,
    /// Swipe left
    Next,
    /// Swipe right
    Previous,
}

impl From<GestureAction> for InputCommand {
    fn from(action: GestureAction) -> Self {
        match action {
            GestureAction::TogglePlay => Self::TogglePlay,
            GestureAction::Next => Self::Next,
            GestureAction::Previous => Self::Previous,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    x: f64,
    y: f64,
    moved: bool,
}

/// Touch gesture recognizer for the now-playing surface
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    touch: Option<Touch>,
    last_tap_ms: Option<f64>,
}

impl GestureTracker {
    /// Create a tracker with no touch in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger down
    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.touch = Some(Touch { x, y, moved: false });
    }

    /// Finger moved to `(x, y)`
    pub fn touch_move(&mut self, x: f64, y: f64) {
        if let Some(touch) = &mut self.touch {
            if (x - touch.x).abs() > TAP_SLOP_PX || (y - touch.y).abs() > TAP_SLOP_PX {
                touch.moved = true;
            }
        }
    }

    /// Finger up at `(x, y)` and time `now_ms`
    pub fn touch_end(&mut self, x: f64, y: f64, now_ms: f64) -> Option<GestureAction> {
        let touch = self.touch.take()?;
        let dx = x - touch.x;
        let dy = y - touch.y;

        if dx.abs() > SWIPE_MIN_PX && dx.abs() > dy.abs() {
            self.last_tap_ms = None;
            return Some(if dx < 0.0 {
                GestureAction::Next
            } else {
                GestureAction::Previous
            });
        }

        if touch.moved {
            return None;
        }

        match self.last_tap_ms {
            Some(last) if now_ms - last < DOUBLE_TAP_MS => {
                self.last_tap_ms = None;
                Some(GestureAction::TogglePlay)
            }
            _ => {
                self.last_tap_ms = Some(now_ms);
                None
            }
        }
    }
}
