//! The player seam: what the playback controller needs from an audio engine.

use std::path::Path;

use super::types::{AudioAttributes, PlayerError, PlayerEvent, RouteId};

/// One loaded source on one audio route.
///
/// Positions are milliseconds from the start of the source.
pub trait MediaPlayer {
    fn set_source(&mut self, location: &Path) -> Result<(), PlayerError>;
    /// Load the source synchronously. Must follow `set_source`.
    fn prepare(&mut self) -> Result<(), PlayerError>;
    fn start(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek_to(&mut self, position_ms: u64);
    fn current_position(&self) -> u64;
    fn is_playing(&self) -> bool;
    /// Free the output resources. The player is unusable afterwards.
    fn release(&mut self);
    /// Next pending completion/error event, if any.
    fn poll_event(&mut self) -> Option<PlayerEvent>;
}

/// Creates players and hands out route identities.
pub trait AudioBackend {
    type Player: MediaPlayer;

    /// A fresh route identity, or `None` when the backend cannot provide one.
    fn generate_route_id(&mut self) -> Option<RouteId>;

    fn create_player(&mut self, attributes: AudioAttributes, route: Option<RouteId>)
    -> Self::Player;
}
