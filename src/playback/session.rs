use tracing::{debug, warn};

use crate::audio::{HapticEffect, MediaPlayer, RouteId};

/// The live player (and optional haptic effect) for the track at `index`.
pub(super) struct Session<P: MediaPlayer, F: HapticEffect> {
    pub player: P,
    pub haptic: Option<F>,
    pub route: Option<RouteId>,
    pub index: usize,
}

impl<P: MediaPlayer, F: HapticEffect> Session<P, F> {
    /// Stop and release everything the session holds.
    pub fn close(mut self) {
        debug!(index = self.index, route = ?self.route, "closing session");
        self.player.stop();
        self.player.release();
        if let Some(mut fx) = self.haptic.take() {
            if let Err(e) = fx.set_enabled(false) {
                warn!(error = %e, "failed to disable haptic effect");
            }
            fx.release();
        }
    }
}
