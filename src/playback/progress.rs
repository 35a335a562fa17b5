//! Progress reporter: a cancelable, self-rescheduling position sampler.
//!
//! The event loop asks for the next deadline, sleeps at most that long, then
//! calls [`ProgressReporter::tick`]. A tick re-checks the player before doing
//! anything, so a tick that races a pause or teardown is a no-op.

use std::time::{Duration, Instant};

use crate::audio::MediaPlayer;

#[derive(Debug)]
pub struct ProgressReporter {
    interval: Duration,
    due: Option<Instant>,
    dragging: bool,
}

impl ProgressReporter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: None,
            dragging: false,
        }
    }

    /// Schedule an immediate sample. Ignored while the user drags the seek control.
    pub fn start(&mut self, now: Instant) {
        if !self.dragging {
            self.due = Some(now);
        }
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    #[cfg(test)]
    pub fn is_scheduled(&self) -> bool {
        self.due.is_some()
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.cancel();
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Time left until the next sample, `None` when dormant.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Sample `player` if a tick is due. Returns the sampled position.
    ///
    /// Goes dormant instead of rescheduling when there is no player, it is not
    /// playing, or the user is dragging.
    pub fn tick<P: MediaPlayer + ?Sized>(&mut self, now: Instant, player: Option<&P>) -> Option<u64> {
        let due = self.due?;
        if now < due {
            return None;
        }
        self.due = None;

        if self.dragging {
            return None;
        }
        let player = player?;
        if !player.is_playing() {
            return None;
        }

        let position = player.current_position();
        self.due = Some(now + self.interval);
        Some(position)
    }
}
