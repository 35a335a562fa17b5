//! Application module: the presentation state the TUI and runtime share.
//!
//! The `App` model lives in `app::model` and holds the list selection, the
//! input mode, transient notices and the screen areas used for mouse input.
//! Playback itself is owned by [`crate::playback::PlaybackController`].

mod model;

pub use model::*;
