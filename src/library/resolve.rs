use std::path::Path;

use tracing::{debug, warn};

use super::listing::{DirectoryListing, sniff_media_type};
use super::metadata::MetadataReader;
use super::model::TrackEntry;

/// Name used when a picked file has no readable name.
pub const UNKNOWN_FILE: &str = "Unknown File";
/// Name used when a folder child has no readable name.
pub const UNKNOWN_TRACK: &str = "Unknown Track";

/// Outcome of resolving a folder selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Tracks(Vec<TrackEntry>),
    /// Nothing in the selection qualified as audio.
    Empty,
}

impl From<Vec<TrackEntry>> for Resolution {
    fn from(entries: Vec<TrackEntry>) -> Self {
        if entries.is_empty() {
            Self::Empty
        } else {
            Self::Tracks(entries)
        }
    }
}

/// Turns picked files and folders into [`TrackEntry`] values.
pub struct TrackResolver<L, M> {
    listing: L,
    metadata: M,
    extensions: Vec<String>,
}

fn is_audio_media_type(media_type: &str) -> bool {
    media_type.to_ascii_lowercase().starts_with("audio/")
}

impl<L: DirectoryListing, M: MetadataReader> TrackResolver<L, M> {
    /// `extensions` are matched case-insensitively, with or without a leading dot.
    pub fn new(listing: L, metadata: M, extensions: &[String]) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            listing,
            metadata,
            extensions,
        }
    }

    pub fn has_audio_extension(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }

    /// Whether a single picked file is acceptable as audio.
    pub fn accepts_file(&self, location: &Path) -> bool {
        if !location.is_file() {
            return false;
        }
        let by_name = location
            .file_name()
            .and_then(|s| s.to_str())
            .map(|n| self.has_audio_extension(n))
            .unwrap_or(false);

        by_name
            || sniff_media_type(location)
                .map(|mt| is_audio_media_type(&mt))
                .unwrap_or(false)
    }

    /// Resolve a single picked file. Never fails; unreadable details become placeholders.
    pub fn resolve_file(&self, location: &Path) -> TrackEntry {
        let name = location
            .file_name()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_FILE);

        self.entry(location, name)
    }

    /// Resolve the immediate audio children of `dir`.
    ///
    /// An unreadable folder is reported as [`Resolution::Empty`], like a folder
    /// without audio.
    pub fn resolve_folder(&self, dir: &Path) -> Resolution {
        let children = match self.listing.list(dir) {
            Ok(c) => c,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "could not list folder");
                return Resolution::Empty;
            }
        };

        let entries: Vec<TrackEntry> = children
            .iter()
            .filter(|child| {
                child
                    .media_type
                    .as_deref()
                    .map(is_audio_media_type)
                    .unwrap_or(false)
                    || child
                        .name
                        .as_deref()
                        .map(|n| self.has_audio_extension(n))
                        .unwrap_or(false)
            })
            .map(|child| {
                let name = child.name.as_deref().unwrap_or(UNKNOWN_TRACK);
                self.entry(&child.location, name)
            })
            .collect();

        debug!(
            dir = %dir.display(),
            listed = children.len(),
            kept = entries.len(),
            "resolved folder"
        );
        Resolution::from(entries)
    }

    fn entry(&self, location: &Path, name: &str) -> TrackEntry {
        let duration_ms = self.metadata.duration_ms(location).unwrap_or(0);
        TrackEntry::new(location, name, duration_ms)
    }
}
