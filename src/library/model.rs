use std::path::PathBuf;

use super::display::format_duration;

/// A resolved, playable playlist entry.
///
/// `duration_ms == 0` means the duration could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackEntry {
    pub location: PathBuf,
    pub name: String,
    pub duration_ms: u64,
}

impl TrackEntry {
    pub fn new(location: impl Into<PathBuf>, name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            duration_ms,
        }
    }

    /// Duration as `m:ss`, or `-:--` when unknown.
    pub fn duration_text(&self) -> String {
        format_duration(self.duration_ms)
    }
}
