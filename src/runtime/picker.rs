//! Turns a typed path into a playlist load.

use std::env;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::PickerKind;
use crate::audio::{AudioBackend, HapticEngine};
use crate::library::{DirectoryListing, MetadataReader, Resolution, TrackResolver};
use crate::playback::{LoadOutcome, PlaybackController};

pub const NO_AUDIO_NOTICE: &str = "No audio files found in this folder";

/// Expand a leading `~` to `$HOME`.
pub fn expand_home(input: &str) -> PathBuf {
    let home = env::var_os("HOME").map(PathBuf::from);
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}

/// Which picker a path given on the command line stands for.
pub fn kind_for(path: &Path) -> PickerKind {
    if path.is_dir() {
        PickerKind::Folder
    } else {
        PickerKind::File
    }
}

/// Resolve a picked path. A file that is not audio is rejected with a
/// message; a folder always resolves, possibly to nothing.
pub fn resolve_selection<L: DirectoryListing, M: MetadataReader>(
    kind: PickerKind,
    path: &Path,
    resolver: &TrackResolver<L, M>,
) -> Result<Resolution, String> {
    match kind {
        PickerKind::File => {
            if !resolver.accepts_file(path) {
                return Err(format!("Not an audio file: {}", path.display()));
            }
            Ok(Resolution::Tracks(vec![resolver.resolve_file(path)]))
        }
        PickerKind::Folder => Ok(resolver.resolve_folder(path)),
    }
}

/// Resolve `path` and hand the result to `controller`. Returns a notice for
/// the user, if any.
pub fn open<L, M, B, H>(
    kind: PickerKind,
    path: &Path,
    resolver: &TrackResolver<L, M>,
    controller: &mut PlaybackController<B, H>,
) -> Option<String>
where
    L: DirectoryListing,
    M: MetadataReader,
    B: AudioBackend,
    H: HapticEngine,
{
    let resolution = match resolve_selection(kind, path, resolver) {
        Ok(r) => r,
        Err(msg) => return Some(msg),
    };

    match controller.load(resolution) {
        LoadOutcome::Loaded(count) => {
            info!(path = %path.display(), count, "selection loaded");
            None
        }
        LoadOutcome::NothingFound => {
            info!(path = %path.display(), "selection had no audio");
            Some(NO_AUDIO_NOTICE.to_string())
        }
    }
}
