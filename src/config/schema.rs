use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/haptos/config.toml` or `~/.config/haptos/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `HAPTOS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub haptics: HapticsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the progress display samples the player while playing (milliseconds).
    pub progress_interval_ms: u64,
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 100,
            scrub_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether folder children are sniffed for an audio media type.
    pub sniff_media_type: bool,
    /// Whether to include hidden files (dotfiles) when listing a folder.
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "wav", "aac", "m4a", "ogg", "flac", "opus"]
                .into_iter()
                .map(String::from)
                .collect(),
            sniff_media_type: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the list cursor jumps to the track that starts playing.
    pub follow_playback: bool,
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long transient notices stay on screen (milliseconds).
    pub notice_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            follow_playback: true,
            header_text: " ~ feel the music ~ ".to_string(),
            notice_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HapticsSettings {
    /// Set to false to never attach haptic effects.
    pub enabled: bool,
}

impl Default for HapticsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory for the rolling log file. Defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
    /// `tracing` filter directive, used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "haptos=info,warn".to_string(),
        }
    }
}
