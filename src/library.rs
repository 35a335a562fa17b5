//! Track resolution: turns a picked file or folder into playlist entries.
//!
//! Folder children are kept when their media type is audio or their name
//! carries a known audio extension. Missing names and durations degrade to
//! placeholders instead of errors.

mod display;
mod listing;
mod metadata;
mod model;
mod resolve;

pub use display::{UNKNOWN_TIME, format_clock, format_duration};
pub use listing::{DirEntry, DirectoryListing, FsListing, ListingError};
pub use metadata::{LoftyMetadata, MetadataReader};
pub use model::TrackEntry;
pub use resolve::{Resolution, TrackResolver, UNKNOWN_FILE, UNKNOWN_TRACK};

#[cfg(test)]
mod tests;
