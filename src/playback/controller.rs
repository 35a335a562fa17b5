use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::audio::{
    AudioAttributes, AudioBackend, HapticEffect, HapticEngine, MediaPlayer, PlayerError,
    PlayerEvent,
};
use crate::library::{Resolution, TrackEntry};
use crate::playlist::Playlist;

use super::progress::ProgressReporter;
use super::session::Session;
use super::view::{PlayPauseIcon, PlayerView, TransportView};

/// The playback state of the screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No session.
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Where a seek request came from. Only user seeks reach the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeekOrigin {
    User,
    Progress,
}

/// Result of loading a picked selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    NothingFound,
}

/// Owns the playlist, the single playback session and the progress reporter.
///
/// All methods run on the UI thread; player events are pulled with
/// [`PlaybackController::handle_player_event`].
pub struct PlaybackController<B: AudioBackend, H: HapticEngine> {
    backend: B,
    haptics: H,
    playlist: Playlist,
    session: Option<Session<B::Player, H::Effect>>,
    state: PlaybackState,
    reporter: ProgressReporter,
    transport: TransportView,
}

impl<B: AudioBackend, H: HapticEngine> PlaybackController<B, H> {
    pub fn new(backend: B, haptics: H, progress_interval: Duration) -> Self {
        Self {
            backend,
            haptics,
            playlist: Playlist::default(),
            session: None,
            state: PlaybackState::Idle,
            reporter: ProgressReporter::new(progress_interval),
            transport: TransportView::default(),
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn transport(&self) -> &TransportView {
        &self.transport
    }

    pub fn haptics_available(&self) -> bool {
        self.haptics.is_available()
    }

    #[cfg(test)]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    #[cfg(test)]
    pub fn is_reporting_progress(&self) -> bool {
        self.reporter.is_scheduled()
    }

    pub fn view(&self) -> PlayerView<'_> {
        PlayerView {
            tracks: self.playlist.entries(),
            current: self.playlist.cursor(),
            state: self.state,
            transport: &self.transport,
            haptics_attached: self
                .session
                .as_ref()
                .map(|s| s.haptic.is_some())
                .unwrap_or(false),
        }
    }

    /// Apply a resolved selection: replace the playlist, or clear it when
    /// nothing qualified.
    pub fn load(&mut self, resolution: Resolution) -> LoadOutcome {
        match resolution {
            Resolution::Tracks(entries) => {
                let count = entries.len();
                self.replace(entries);
                LoadOutcome::Loaded(count)
            }
            Resolution::Empty => {
                self.clear();
                LoadOutcome::NothingFound
            }
        }
    }

    /// Install a new playlist and start its first entry.
    pub fn replace(&mut self, entries: Vec<TrackEntry>) {
        self.teardown();
        self.playlist.replace(entries);
        info!(tracks = self.playlist.len(), "playlist replaced");

        if self.playlist.is_empty() {
            self.clear();
        } else {
            self.play_track(0);
        }
    }

    /// Drop the session and the playlist, back to the empty idle screen.
    pub fn clear(&mut self) {
        self.teardown();
        self.playlist.clear();
        self.state = PlaybackState::Idle;
        self.transport.reset();
        debug!("playlist cleared");
    }

    /// Start the entry at `index` in a fresh session.
    ///
    /// An out-of-range index leaves the controller idle with a reset transport.
    pub fn play_track(&mut self, index: usize) {
        if !self.playlist.select(index) {
            debug!(index, len = self.playlist.len(), "track index out of range");
            self.teardown();
            self.state = PlaybackState::Idle;
            self.transport.reset();
            return;
        }

        if let Err(e) = self.open_session(index) {
            error!(index, error = %e, "could not load track; clearing playlist");
            self.clear();
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.player.start();
        }
        self.state = PlaybackState::Playing;
        self.transport.icon = PlayPauseIcon::Pause;
        self.reporter.start(Instant::now());
        self.enable_transport();
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match self.state {
            PlaybackState::Playing => {
                session.player.pause();
                self.reporter.cancel();
                self.state = PlaybackState::Paused;
                self.transport.icon = PlayPauseIcon::Play;
            }
            PlaybackState::Paused => {
                session.player.start();
                self.state = PlaybackState::Playing;
                self.transport.icon = PlayPauseIcon::Pause;
                self.reporter.start(Instant::now());
            }
            PlaybackState::Idle => {}
        }
    }

    /// Advance to the next entry, wrapping to the first.
    ///
    /// When a single-entry playlist finishes on its own the track is rewound
    /// and paused instead of replayed.
    pub fn next(&mut self, from_completion: bool) {
        let Some((index, wrapped)) = self.playlist.advance() else {
            return;
        };

        if wrapped && from_completion && self.playlist.len() == 1 {
            if let Some(session) = self.session.as_mut() {
                session.player.seek_to(0);
                session.player.pause();
            }
            self.reporter.cancel();
            self.state = PlaybackState::Paused;
            self.transport.icon = PlayPauseIcon::Play;
            self.transport.set_position(0);
            return;
        }

        self.play_track(index);
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.playlist.retreat() {
            self.play_track(index);
        }
    }

    pub fn seek(&mut self, position_ms: u64, origin: SeekOrigin) {
        if origin != SeekOrigin::User {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let position_ms = if self.transport.seek_max_ms > 0 {
            position_ms.min(self.transport.seek_max_ms)
        } else {
            position_ms
        };
        session.player.seek_to(position_ms);
        self.transport.set_position(position_ms);
    }

    /// User seek relative to the displayed position.
    pub fn scrub(&mut self, delta_ms: i64) {
        let base = self
            .session
            .as_ref()
            .map(|s| s.player.current_position())
            .unwrap_or(self.transport.seek_position_ms);
        let target = base.saturating_add_signed(delta_ms);
        self.seek(target, SeekOrigin::User);
    }

    /// The user grabbed the seek control: stop fighting their input.
    pub fn begin_seek_drag(&mut self) {
        self.reporter.begin_drag();
    }

    pub fn end_seek_drag(&mut self) {
        self.reporter.end_drag();
        let playing = self
            .session
            .as_ref()
            .map(|s| s.player.is_playing())
            .unwrap_or(false);
        if self.state == PlaybackState::Playing && playing {
            self.reporter.start(Instant::now());
        }
    }

    /// Handle at most one pending player event. Returns true if one was handled.
    pub fn handle_player_event(&mut self) -> bool {
        let Some(event) = self.session.as_mut().and_then(|s| s.player.poll_event()) else {
            return false;
        };

        match event {
            PlayerEvent::Completed => {
                debug!(cursor = ?self.playlist.cursor(), "track completed");
                self.next(true);
            }
            PlayerEvent::Error(e) => {
                error!(error = %e, "player failed; clearing playlist");
                self.clear();
            }
        }
        true
    }

    /// Run the progress reporter if it is due. Returns true when the display changed.
    pub fn tick_progress(&mut self, now: Instant) -> bool {
        let player = match (self.state, self.session.as_ref()) {
            (PlaybackState::Playing, Some(session)) => Some(&session.player),
            _ => None,
        };

        match self.reporter.tick(now, player) {
            Some(position) => {
                self.transport.set_position(position);
                true
            }
            None => false,
        }
    }

    /// How long the event loop may sleep before the reporter needs to run.
    pub fn next_progress_deadline(&self, now: Instant) -> Option<Duration> {
        self.reporter.time_until_due(now)
    }

    /// Release everything before the screen goes away.
    pub fn shutdown(&mut self) {
        self.teardown();
        self.state = PlaybackState::Idle;
    }

    fn teardown(&mut self) {
        self.reporter.cancel();
        if let Some(session) = self.session.take() {
            session.close();
        }
    }

    fn open_session(&mut self, index: usize) -> Result<(), PlayerError> {
        self.teardown();

        let Some(entry) = self.playlist.get(index) else {
            return Err(PlayerError::NoSource);
        };

        let route = self.backend.generate_route_id();
        let mut player = self.backend.create_player(AudioAttributes::music(), route);
        let loaded = player
            .set_source(&entry.location)
            .and_then(|()| player.prepare());
        if let Err(e) = loaded {
            player.release();
            return Err(e);
        }

        self.transport.set_position(0);
        self.transport.set_total(entry.duration_ms);

        let haptic = match route {
            Some(route) if self.haptics.is_available() => {
                match self
                    .haptics
                    .create(route)
                    .and_then(|mut fx| fx.set_enabled(true).map(|()| fx))
                {
                    Ok(fx) => Some(fx),
                    Err(e) => {
                        warn!(%route, error = %e, "haptic effect not attached");
                        None
                    }
                }
            }
            _ => None,
        };

        debug!(
            index,
            track = %entry.name,
            ?route,
            haptics = haptic.is_some(),
            "session opened"
        );
        self.session = Some(Session {
            player,
            haptic,
            route,
            index,
        });
        Ok(())
    }

    fn enable_transport(&mut self) {
        let several = self.playlist.len() > 1;
        self.transport.play_pause_enabled = true;
        self.transport.seek_enabled = true;
        self.transport.next_enabled = several;
        self.transport.previous_enabled = several;
    }
}

impl<B: AudioBackend, H: HapticEngine> Drop for PlaybackController<B, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
