use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use lofty::file::FileType;
use lofty::probe::Probe;
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
}

/// One immediate child of a listed folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    /// `None` when the name is not valid UTF-8.
    pub name: Option<String>,
    /// Media type such as `audio/flac`, when one could be determined.
    pub media_type: Option<String>,
    pub location: PathBuf,
}

/// Lists the immediate file children of a folder.
pub trait DirectoryListing {
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, ListingError>;
}

/// Filesystem listing backed by `walkdir`, one level deep.
#[derive(Debug, Clone)]
pub struct FsListing {
    /// Sniff file contents for a media type.
    pub sniff_media_type: bool,
    pub include_hidden: bool,
}

impl Default for FsListing {
    fn default() -> Self {
        Self {
            sniff_media_type: true,
            include_hidden: true,
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

impl DirectoryListing for FsListing {
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, ListingError> {
        if !dir.is_dir() {
            return Err(ListingError::NotADirectory(dir.to_path_buf()));
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker.into_iter() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || (!self.include_hidden && is_hidden(path)) {
                continue;
            }

            let media_type = if self.sniff_media_type {
                sniff_media_type(path)
            } else {
                None
            };

            entries.push(DirEntry {
                name: entry.file_name().to_str().map(str::to_string),
                media_type,
                location: path.to_path_buf(),
            });
        }

        Ok(entries)
    }
}

/// Guess a media type from the file's leading bytes (falling back to its extension).
pub(crate) fn sniff_media_type(path: &Path) -> Option<String> {
    let guessed = Probe::open(path).ok()?.guess_file_type().ok()?;
    let file_type = guessed.file_type()?;
    if file_type == FileType::Mp4 && !is_audio_mp4(path) {
        return Some("video/mp4".to_string());
    }
    Some(media_type_for(&file_type).to_string())
}

/// Major brands used by audio-only MPEG-4 files.
const AUDIO_MP4_BRANDS: [&[u8; 4]; 5] = [b"M4A ", b"M4B ", b"M4P ", b"F4A ", b"F4B "];

/// Audio extensions that share the MPEG-4 container with video.
const AUDIO_MP4_EXTENSIONS: [&str; 4] = ["m4a", "m4b", "m4p", "aac"];

/// Lofty reports every `ftyp` file as MP4, including video. Trust an audio
/// extension or an audio major brand; anything else is treated as video.
fn is_audio_mp4(path: &Path) -> bool {
    let audio_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            AUDIO_MP4_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false);
    audio_extension || major_brand(path).is_some_and(|b| AUDIO_MP4_BRANDS.contains(&&b))
}

/// Reads the major brand from a leading `ftyp` box.
fn major_brand(path: &Path) -> Option<[u8; 4]> {
    let mut header = [0u8; 12];
    File::open(path).ok()?.read_exact(&mut header).ok()?;
    if &header[4..8] != b"ftyp" {
        return None;
    }
    let mut brand = [0u8; 4];
    brand.copy_from_slice(&header[8..12]);
    Some(brand)
}

fn media_type_for(file_type: &FileType) -> &'static str {
    match file_type {
        FileType::Aac => "audio/aac",
        FileType::Aiff => "audio/aiff",
        FileType::Flac => "audio/flac",
        FileType::Mpeg => "audio/mpeg",
        FileType::Mp4 => "audio/mp4",
        FileType::Opus => "audio/opus",
        FileType::Vorbis => "audio/ogg",
        FileType::Wav => "audio/wav",
        _ => "audio/x-unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn plain() -> FsListing {
        FsListing {
            sniff_media_type: false,
            include_hidden: true,
        }
    }

    #[test]
    fn list_returns_only_immediate_files_sorted_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), b"x").unwrap();
        fs::write(dir.path().join("a.txt"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("nested.mp3"), b"x").unwrap();

        let entries = plain().list(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().filter_map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["a.txt".to_string(), "b.mp3".to_string()]);
        assert!(entries.iter().all(|e| e.media_type.is_none()));
    }

    #[test]
    fn list_can_skip_hidden_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

        let listing = FsListing {
            sniff_media_type: false,
            include_hidden: false,
        };
        let entries = listing.list(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("visible.mp3"));
    }

    #[test]
    fn list_rejects_a_file_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mp3");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            plain().list(&file),
            Err(ListingError::NotADirectory(_))
        ));
    }

    fn ftyp(major: &[u8; 4], compatible: &[u8; 4]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 0, 0x18];
        bytes.extend_from_slice(b"ftyp");
        bytes.extend_from_slice(major);
        bytes.extend_from_slice(&[0, 0, 2, 0]);
        bytes.extend_from_slice(major);
        bytes.extend_from_slice(compatible);
        bytes
    }

    #[test]
    fn sniffing_reports_video_mp4_as_video() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("holiday.mp4");
        fs::write(&file, ftyp(b"isom", b"avc1")).unwrap();
        assert_eq!(sniff_media_type(&file).as_deref(), Some("video/mp4"));
    }

    #[test]
    fn sniffing_keeps_audio_mp4_by_brand_or_extension() {
        let dir = tempdir().unwrap();
        let by_brand = dir.path().join("untitled");
        fs::write(&by_brand, ftyp(b"M4A ", b"mp42")).unwrap();
        let by_extension = dir.path().join("song.m4a");
        fs::write(&by_extension, ftyp(b"isom", b"mp42")).unwrap();

        assert_eq!(sniff_media_type(&by_brand).as_deref(), Some("audio/mp4"));
        assert_eq!(sniff_media_type(&by_extension).as_deref(), Some("audio/mp4"));
    }

    #[test]
    fn sniffing_ignores_plain_text() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes");
        fs::write(&file, b"just some words, nothing to hear").unwrap();
        assert_eq!(sniff_media_type(&file), None);
    }
}
