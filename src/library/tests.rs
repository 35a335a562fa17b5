use super::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

struct StaticListing(Vec<DirEntry>);

impl DirectoryListing for StaticListing {
    fn list(&self, _dir: &Path) -> Result<Vec<DirEntry>, ListingError> {
        Ok(self.0.clone())
    }
}

struct FailingListing;

impl DirectoryListing for FailingListing {
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, ListingError> {
        Err(ListingError::NotADirectory(dir.to_path_buf()))
    }
}

#[derive(Default)]
struct Durations(HashMap<PathBuf, u64>);

impl MetadataReader for Durations {
    fn duration_ms(&self, location: &Path) -> Option<u64> {
        self.0.get(location).copied()
    }
}

fn child(name: &str, media_type: Option<&str>) -> DirEntry {
    DirEntry {
        name: Some(name.to_string()),
        media_type: media_type.map(str::to_string),
        location: PathBuf::from("/music").join(name),
    }
}

fn default_extensions() -> Vec<String> {
    crate::config::LibrarySettings::default().extensions
}

#[test]
fn format_clock_renders_minutes_and_padded_seconds() {
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(999), "0:00");
    assert_eq!(format_clock(3_000), "0:03");
    assert_eq!(format_clock(61_500), "1:01");
    assert_eq!(format_clock(75 * 60_000 + 3_000), "75:03");
}

#[test]
fn format_duration_uses_placeholder_for_unknown() {
    assert_eq!(format_duration(0), UNKNOWN_TIME);
    assert_eq!(format_duration(3_000), "0:03");
    assert_eq!(TrackEntry::new("/a.mp3", "a.mp3", 0).duration_text(), "-:--");
}

#[test]
fn folder_keeps_only_audio_by_extension() {
    let listing = StaticListing(vec![
        child("a.mp3", None),
        child("b.txt", None),
        child("c.flac", None),
    ]);
    let resolver = TrackResolver::new(listing, Durations::default(), &default_extensions());

    let Resolution::Tracks(entries) = resolver.resolve_folder(Path::new("/music")) else {
        panic!("expected tracks");
    };
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.mp3", "c.flac"]);
}

#[test]
fn folder_keeps_audio_media_type_without_known_extension() {
    let listing = StaticListing(vec![
        child("voice-memo", Some("audio/x-unknown")),
        child("cover.jpg", Some("image/jpeg")),
    ]);
    let resolver = TrackResolver::new(listing, Durations::default(), &default_extensions());

    assert_eq!(
        resolver.resolve_folder(Path::new("/music")),
        Resolution::Tracks(vec![TrackEntry::new("/music/voice-memo", "voice-memo", 0)])
    );
}

#[test]
fn folder_extension_match_is_case_insensitive() {
    let listing = StaticListing(vec![child("LOUD.OPUS", None), child("Quiet.M4a", None)]);
    let resolver = TrackResolver::new(listing, Durations::default(), &default_extensions());

    match resolver.resolve_folder(Path::new("/music")) {
        Resolution::Tracks(entries) => assert_eq!(entries.len(), 2),
        Resolution::Empty => panic!("expected tracks"),
    }
}

#[test]
fn folder_without_audio_is_empty_not_an_error() {
    let listing = StaticListing(vec![child("readme.txt", None), child("cover.png", None)]);
    let resolver = TrackResolver::new(listing, Durations::default(), &default_extensions());
    assert_eq!(resolver.resolve_folder(Path::new("/music")), Resolution::Empty);

    let resolver = TrackResolver::new(FailingListing, Durations::default(), &default_extensions());
    assert_eq!(resolver.resolve_folder(Path::new("/nope")), Resolution::Empty);
}

#[test]
fn folder_child_without_name_gets_placeholder() {
    let nameless = DirEntry {
        name: None,
        media_type: Some("audio/flac".into()),
        location: PathBuf::from("/music/\u{fffd}.flac"),
    };
    let resolver = TrackResolver::new(
        StaticListing(vec![nameless]),
        Durations::default(),
        &default_extensions(),
    );

    let Resolution::Tracks(entries) = resolver.resolve_folder(Path::new("/music")) else {
        panic!("expected tracks");
    };
    assert_eq!(entries[0].name, UNKNOWN_TRACK);
}

#[test]
fn durations_come_from_metadata_and_default_to_zero() {
    let mut durations = Durations::default();
    durations.0.insert(PathBuf::from("/music/a.mp3"), 3_000);
    let listing = StaticListing(vec![child("a.mp3", None), child("b.wav", None)]);
    let resolver = TrackResolver::new(listing, durations, &default_extensions());

    let Resolution::Tracks(entries) = resolver.resolve_folder(Path::new("/music")) else {
        panic!("expected tracks");
    };
    assert_eq!(entries[0].duration_ms, 3_000);
    assert_eq!(entries[1].duration_ms, 0);
}

#[test]
fn extensions_accept_leading_dots_and_mixed_case() {
    let resolver = TrackResolver::new(
        StaticListing(Vec::new()),
        Durations::default(),
        &[".MP3".to_string(), " flac ".to_string(), String::new()],
    );
    assert!(resolver.has_audio_extension("a.mp3"));
    assert!(resolver.has_audio_extension("a.FLAC"));
    assert!(!resolver.has_audio_extension("a.ogg"));
    assert!(!resolver.has_audio_extension("mp3"));
}

#[test]
fn single_file_uses_its_file_name() {
    let resolver = TrackResolver::new(
        StaticListing(Vec::new()),
        Durations::default(),
        &default_extensions(),
    );
    let entry = resolver.resolve_file(Path::new("/music/song.ogg"));
    assert_eq!(entry.name, "song.ogg");
    assert_eq!(entry.duration_ms, 0);

    let entry = resolver.resolve_file(Path::new("/"));
    assert_eq!(entry.name, UNKNOWN_FILE);
}

#[test]
fn real_folder_with_unreadable_audio_still_resolves() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("b.txt"), b"ignore me").unwrap();
    fs::write(dir.path().join("c.flac"), b"not a real flac").unwrap();

    let resolver = TrackResolver::new(FsListing::default(), LoftyMetadata, &default_extensions());
    let Resolution::Tracks(entries) = resolver.resolve_folder(dir.path()) else {
        panic!("expected tracks");
    };

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.mp3", "c.flac"]);
    assert!(entries.iter().all(|e| e.duration_ms == 0));
}

#[test]
fn real_folder_skips_video_mp4() {
    let dir = tempdir().unwrap();
    let mut header = vec![0, 0, 0, 0x18];
    header.extend_from_slice(b"ftypisom\x00\x00\x02\x00isomavc1");
    fs::write(dir.path().join("holiday.mp4"), &header).unwrap();
    fs::write(dir.path().join("song.mp3"), b"not a real mp3").unwrap();

    let resolver = TrackResolver::new(FsListing::default(), LoftyMetadata, &default_extensions());
    let Resolution::Tracks(entries) = resolver.resolve_folder(dir.path()) else {
        panic!("expected tracks");
    };

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["song.mp3"]);
}

#[test]
fn accepts_file_checks_existence_and_kind() {
    let dir = tempdir().unwrap();
    let song = dir.path().join("song.wav");
    let notes = dir.path().join("notes.txt");
    fs::write(&song, b"RIFF but not really").unwrap();
    fs::write(&notes, b"plain words").unwrap();

    let resolver = TrackResolver::new(FsListing::default(), LoftyMetadata, &default_extensions());
    assert!(resolver.accepts_file(&song));
    assert!(!resolver.accepts_file(&notes));
    assert!(!resolver.accepts_file(dir.path()));
    assert!(!resolver.accepts_file(&dir.path().join("missing.mp3")));
}
