//! Playback control: the session state machine, progress reporting and the
//! read model the screen renders from.

mod controller;
mod progress;
mod session;
mod view;

pub use controller::{LoadOutcome, PlaybackController, PlaybackState, SeekOrigin};
pub use view::{PlayPauseIcon, PlayerView, TransportView};
