//! `rodio` implementation of the player seam.
//!
//! One output stream is opened for the lifetime of the backend; every player
//! gets its own `Sink` on that stream's mixer. Completion is detected by
//! polling for an empty sink.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::player::{AudioBackend, MediaPlayer};
use super::types::{AudioAttributes, PlayerError, PlayerEvent, RouteId};

pub struct RodioBackend {
    stream: OutputStream,
    next_route: u32,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped; that would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            next_route: 1,
        })
    }
}

impl AudioBackend for RodioBackend {
    type Player = RodioPlayer;

    fn generate_route_id(&mut self) -> Option<RouteId> {
        let id = self.next_route;
        self.next_route = self.next_route.checked_add(1).unwrap_or(1);
        Some(RouteId(id))
    }

    fn create_player(&mut self, attributes: AudioAttributes, route: Option<RouteId>) -> RodioPlayer {
        debug!(?attributes, ?route, "creating player");
        RodioPlayer::new(Sink::connect_new(self.stream.mixer()))
    }
}

pub struct RodioPlayer {
    /// `None` once released.
    sink: Option<Sink>,
    source: Option<PathBuf>,
    prepared: bool,
    started: bool,
    completion_reported: bool,
    events: VecDeque<PlayerEvent>,
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, PlayerError> {
    let file = File::open(path).map_err(|source| PlayerError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl RodioPlayer {
    pub(super) fn new(sink: Sink) -> Self {
        Self {
            sink: Some(sink),
            source: None,
            prepared: false,
            started: false,
            completion_reported: false,
            events: VecDeque::new(),
        }
    }

    /// Queue the source again, paused, after it played to the end.
    fn reload(&mut self) -> Result<(), PlayerError> {
        let (Some(sink), Some(path)) = (self.sink.as_ref(), self.source.as_deref()) else {
            return Err(PlayerError::NoSource);
        };
        let decoder = decode(path)?;
        sink.pause();
        sink.append(decoder);
        self.completion_reported = false;
        Ok(())
    }
}

impl MediaPlayer for RodioPlayer {
    fn set_source(&mut self, location: &Path) -> Result<(), PlayerError> {
        self.source = Some(location.to_path_buf());
        self.prepared = false;
        Ok(())
    }

    fn prepare(&mut self) -> Result<(), PlayerError> {
        let Some(path) = self.source.as_deref() else {
            return Err(PlayerError::NoSource);
        };
        let Some(sink) = self.sink.as_ref() else {
            return Err(PlayerError::Output("player already released".into()));
        };

        let decoder = decode(path)?;
        sink.pause();
        sink.append(decoder);
        self.prepared = true;
        Ok(())
    }

    fn start(&mut self) {
        if !self.prepared {
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
            self.started = true;
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.stop();
        }
        self.prepared = false;
        self.started = false;
    }

    fn seek_to(&mut self, position_ms: u64) {
        if !self.prepared {
            return;
        }
        let ended = self.sink.as_ref().map(Sink::empty).unwrap_or(false);
        if ended {
            if let Err(e) = self.reload() {
                self.events.push_back(PlayerEvent::Error(e));
                return;
            }
            if position_ms == 0 {
                return;
            }
        }

        if let Some(sink) = self.sink.as_ref() {
            if let Err(e) = sink.try_seek(Duration::from_millis(position_ms)) {
                // Some decoders cannot seek; playback simply continues where it was.
                warn!(position_ms, error = %e, "seek failed");
            }
        }
    }

    fn current_position(&self) -> u64 {
        self.sink
            .as_ref()
            .map(|s| u64::try_from(s.get_pos().as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }

    fn is_playing(&self) -> bool {
        self.prepared
            && self
                .sink
                .as_ref()
                .map(|s| !s.is_paused() && !s.empty())
                .unwrap_or(false)
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.source = None;
        self.prepared = false;
        self.started = false;
        self.events.clear();
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        if self.prepared && self.started && !self.completion_reported {
            if let Some(sink) = self.sink.as_ref() {
                if sink.empty() {
                    self.completion_reported = true;
                    // Mirror a finished player: not playing until started again.
                    sink.pause();
                    self.events.push_back(PlayerEvent::Completed);
                }
            }
        }
        self.events.pop_front()
    }
}
