//! Audio-related small types shared by the player seam and its backends.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Identity of an audio route. Haptic effects are keyed to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Usage {
    Media,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentType {
    Music,
}

/// How a player's output should be routed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioAttributes {
    pub usage: Usage,
    pub content_type: ContentType,
    /// Haptic channels embedded in the stream stay audible to the actuator.
    pub haptic_channels_muted: bool,
}

impl AudioAttributes {
    /// Attributes for music playback with haptic channels enabled.
    pub fn music() -> Self {
        Self {
            usage: Usage::Media,
            content_type: ContentType::Music,
            haptic_channels_muted: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no source was set before prepare")]
    NoSource,
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
}

/// Events a player reports back to its owner.
#[derive(Debug)]
pub enum PlayerEvent {
    /// The source played to its natural end.
    Completed,
    /// Playback cannot continue.
    Error(PlayerError),
}
