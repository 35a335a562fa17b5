//! Read model handed to the presentation layer.

use crate::library::{TrackEntry, UNKNOWN_TIME, format_clock, format_duration};

use super::controller::PlaybackState;

/// What the play/pause button currently offers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayPauseIcon {
    Play,
    Pause,
}

/// Transport controls and time indicators.
///
/// Seek values are `u64` milliseconds, so long files do not overflow the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportView {
    pub play_pause_enabled: bool,
    pub seek_enabled: bool,
    pub next_enabled: bool,
    pub previous_enabled: bool,
    pub icon: PlayPauseIcon,
    pub current_time: String,
    pub total_time: String,
    pub seek_max_ms: u64,
    pub seek_position_ms: u64,
}

impl Default for TransportView {
    fn default() -> Self {
        Self {
            play_pause_enabled: false,
            seek_enabled: false,
            next_enabled: false,
            previous_enabled: false,
            icon: PlayPauseIcon::Play,
            current_time: UNKNOWN_TIME.to_string(),
            total_time: UNKNOWN_TIME.to_string(),
            seek_max_ms: 0,
            seek_position_ms: 0,
        }
    }
}

impl TransportView {
    /// Back to the disabled, zeroed idle look.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_current_time(&mut self, position_ms: u64) {
        self.current_time = format_clock(position_ms);
    }

    pub fn set_position(&mut self, position_ms: u64) {
        self.seek_position_ms = position_ms;
        self.set_current_time(position_ms);
    }

    pub fn set_total(&mut self, duration_ms: u64) {
        self.seek_max_ms = duration_ms;
        self.total_time = format_duration(duration_ms);
    }

    /// Seek bar fill in `[0, 1]`.
    pub fn seek_ratio(&self) -> f64 {
        if self.seek_max_ms == 0 {
            return 0.0;
        }
        (self.seek_position_ms as f64 / self.seek_max_ms as f64).clamp(0.0, 1.0)
    }
}

/// Snapshot of everything the screen renders.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub tracks: &'a [TrackEntry],
    pub current: Option<usize>,
    pub state: PlaybackState,
    pub transport: &'a TransportView,
    pub haptics_attached: bool,
}

impl PlayerView<'_> {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&TrackEntry> {
        self.current.and_then(|i| self.tracks.get(i))
    }
}
