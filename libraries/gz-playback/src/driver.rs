//! Media driver contract
//!
//! Abstracts the single media element the player drives (an HTML audio
//! element in the browser, a simulated clock in the CLI and in tests).
//! Driver-side completions (metadata, progress, end of track) arrive back at
//! the player as [`MediaEvent`]s forwarded by the host.

use std::collections::HashMap;

use gz_core::AudioLocator;
use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};

/// Platform media element
///
/// Commands are fire-and-forget except `play`, which the platform may refuse
/// (autoplay policy, decode failure). Position and duration are in seconds.
pub trait MediaDriver {
    /// Replace the current source; playback is paused at position 0 until
    /// `play` is called, and duration is unknown until metadata arrives
    fn load(&mut self, locator: &AudioLocator);

    /// Start or resume playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead
    fn seek(&mut self, seconds: f64);

    /// Current playhead position
    fn position(&self) -> f64;

    /// Source duration, `Some` once metadata is known
    fn duration(&self) -> Option<f64>;

    /// Whether a source is loaded
    fn has_source(&self) -> bool;

    /// Whether playback is paused (true when nothing is loaded)
    fn is_paused(&self) -> bool;

    /// Drop the current source
    fn unload(&mut self);

    /// Whether audio is audibly playing
    fn is_playing(&self) -> bool {
        self.has_source() && !self.is_paused()
    }
}

/// Notifications raised by the media element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MediaEvent {
    /// Duration became known for the loaded source
    MetadataLoaded,

    /// Periodic playhead update
    Progress {
        /// Position in seconds
        current: f64,
        /// Duration in seconds, if known
        duration: Option<f64>,
    },

    /// Playback started or resumed
    Play,

    /// Playback paused (also raised right before `Ended`)
    Pause,

    /// Source played to the end
    Ended,
}

impl MediaEvent {
    /// Parse a DOM media event name (`loadedmetadata`, `play`, `pause`, `ended`)
    ///
    /// `timeupdate` needs position data and is not handled here.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        match name {
            "loadedmetadata" => Some(Self::MetadataLoaded),
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            "ended" => Some(Self::Ended),
            _ => None,
        }
    }
}

/// Command recorded by [`SimulatedDriver`]
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    /// `load`
    Load(AudioLocator),
    /// `play`
    Play,
    /// `pause`
    Pause,
    /// `seek`
    Seek(f64),
    /// `unload`
    Unload,
}

/// Key used to look up per-source durations
fn locator_key(locator: &AudioLocator) -> &str {
    match locator {
        AudioLocator::Remote { url } => url,
        AudioLocator::Imported { key, .. } => key,
    }
}

/// Clock-driven media driver with no audio output
///
/// Loading is asynchronous like a real element: metadata only becomes known
/// on `complete_load` (or the first `tick` after a load). Every command is
/// recorded, and raised events queue up until the host drains them with
/// `take_events` and forwards them to the player.
#[derive(Debug, Clone)]
pub struct SimulatedDriver {
    source: Option<AudioLocator>,
    paused: bool,
    position: f64,
    duration: Option<f64>,
    default_duration: f64,
    durations: HashMap<String, f64>,
    reject_play: bool,
    outbox: Vec<MediaEvent>,
    calls: Vec<DriverCall>,
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        Self::new(180.0)
    }
}

impl SimulatedDriver {
    /// Create a driver whose sources all last `default_duration` seconds
    pub fn new(default_duration: f64) -> Self {
        Self {
            source: None,
            paused: true,
            position: 0.0,
            duration: None,
            default_duration,
            durations: HashMap::new(),
            reject_play: false,
            outbox: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Override the duration of one source (URL or imported key)
    #[must_use]
    pub fn with_duration(mut self, key: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(key.into(), seconds);
        self
    }

    /// Make every subsequent `play` fail, as a browser autoplay policy would
    pub fn set_reject_play(&mut self, reject: bool) {
        self.reject_play = reject;
    }

    /// Currently loaded source
    pub fn source(&self) -> Option<&AudioLocator> {
        self.source.as_ref()
    }

    /// Finish loading the current source: duration becomes known and
    /// `MetadataLoaded` is raised. No-op without a source or when already done.
    pub fn complete_load(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        if self.duration.is_some() {
            return;
        }

        let duration = self
            .durations
            .get(locator_key(source))
            .copied()
            .unwrap_or(self.default_duration);
        self.duration = Some(duration);
        self.outbox.push(MediaEvent::MetadataLoaded);
    }

    /// Advance the clock by `dt` seconds
    ///
    /// A pending load completes first. While playing, the playhead moves and
    /// `Progress` is raised; reaching the end raises `Pause` then `Ended`.
    pub fn tick(&mut self, dt: f64) {
        if self.source.is_none() {
            return;
        }
        if self.duration.is_none() {
            self.complete_load();
            return;
        }
        if self.paused {
            return;
        }

        let duration = self.duration.unwrap_or(self.default_duration);
        self.position = (self.position + dt).min(duration);
        self.outbox.push(MediaEvent::Progress {
            current: self.position,
            duration: Some(duration),
        });

        if self.position >= duration {
            self.paused = true;
            self.outbox.push(MediaEvent::Pause);
            self.outbox.push(MediaEvent::Ended);
        }
    }

    /// Drain raised events, oldest first
    pub fn take_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Every command received so far
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// Forget recorded commands
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl MediaDriver for SimulatedDriver {
    fn load(&mut self, locator: &AudioLocator) {
        self.calls.push(DriverCall::Load(locator.clone()));
        self.source = Some(locator.clone());
        self.paused = true;
        self.position = 0.0;
        self.duration = None;
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(DriverCall::Play);
        if self.source.is_none() {
            return Err(PlaybackError::NoSourceLoaded);
        }
        if self.reject_play {
            return Err(PlaybackError::PlaybackRejected(
                "play() request was denied".to_string(),
            ));
        }

        if self.paused {
            self.paused = false;
            self.outbox.push(MediaEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(DriverCall::Pause);
        if !self.paused {
            self.paused = true;
            self.outbox.push(MediaEvent::Pause);
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(DriverCall::Seek(seconds));
        let upper = self.duration.unwrap_or(f64::MAX);
        self.position = seconds.clamp(0.0, upper);
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn unload(&mut self) {
        self.calls.push(DriverCall::Unload);
        self.source = None;
        self.paused = true;
        self.position = 0.0;
        self.duration = None;
    }
}
