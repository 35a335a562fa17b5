//! Application model types: `App`, the input `Mode` and `ScreenLayout`.
//!
//! The `App` struct holds the list selection, the open prompt or dialog, the
//! current notice and where the last frame put the list and the seek gauge.

use std::time::{Duration, Instant};

use ratatui::layout::{Margin, Position, Rect};

/// Which picker a path prompt feeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerKind {
    File,
    Folder,
}

impl PickerKind {
    pub fn title(self) -> &'static str {
        match self {
            PickerKind::File => " open file ",
            PickerKind::Folder => " open folder ",
        }
    }
}

/// What keyboard input currently drives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a path for one of the pickers.
    Prompt { kind: PickerKind, input: String },
    /// The "haptics not supported" modal.
    SupportDialog,
}

/// A short message shown on top of the screen until it expires.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    expires: Instant,
}

/// Areas of the last rendered frame, used to hit-test mouse input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    /// The bordered track list.
    pub list_area: Rect,
    /// Playlist index of the first visible row.
    pub list_offset: usize,
    /// The bordered seek gauge.
    pub seek_area: Rect,
}

/// The main presentation model.
pub struct App {
    pub selected: usize,
    pub follow_playback: bool,
    pub mode: Mode,
    pub layout: ScreenLayout,
    /// True between a mouse press on the seek gauge and its release.
    pub seek_dragging: bool,

    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl App {
    /// Create a new `App`. `notice_ttl` is how long notices stay visible.
    pub fn new(follow_playback: bool, notice_ttl: Duration) -> Self {
        Self {
            selected: 0,
            follow_playback,
            mode: Mode::Normal,
            layout: ScreenLayout::default(),
            seek_dragging: false,
            notice: None,
            notice_ttl,
        }
    }

    /// Enable following playback (cursor follows the current track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the selection onto `current` when following playback, and keep it
    /// inside a list of `len` rows.
    pub fn sync_selection(&mut self, current: Option<usize>, len: usize) {
        if self.follow_playback {
            if let Some(idx) = current {
                self.selected = idx;
            }
        }
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Move selection to the next row, wrapping to the first.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move selection to the previous row, wrapping to the last.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = match self.selected {
            0 => len - 1,
            s if s >= len => len - 1,
            s => s - 1,
        };
    }

    pub fn open_prompt(&mut self, kind: PickerKind) {
        self.mode = Mode::Prompt {
            kind,
            input: String::new(),
        };
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Mode::Prompt { input, .. } = &mut self.mode {
            input.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Mode::Prompt { input, .. } = &mut self.mode {
            input.pop();
        }
    }

    /// Close the prompt, returning what was typed. Blank input yields `None`.
    pub fn submit_prompt(&mut self) -> Option<(PickerKind, String)> {
        match std::mem::take(&mut self.mode) {
            Mode::Prompt { kind, input } => {
                let input = input.trim();
                (!input.is_empty()).then(|| (kind, input.to_string()))
            }
            other => {
                self.mode = other;
                None
            }
        }
    }

    pub fn cancel_prompt(&mut self) {
        if matches!(self.mode, Mode::Prompt { .. }) {
            self.mode = Mode::Normal;
        }
    }

    pub fn show_support_dialog(&mut self) {
        self.mode = Mode::SupportDialog;
    }

    pub fn dismiss_support_dialog(&mut self) {
        if self.mode == Mode::SupportDialog {
            self.mode = Mode::Normal;
        }
    }

    /// Show `text` until `now + notice_ttl`, replacing any current notice.
    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            expires: now + self.notice_ttl,
        });
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    /// Drop the notice once it has expired. Returns true if one was dropped.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some(n) if now >= n.expires => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the current notice expires.
    pub fn notice_deadline(&self, now: Instant) -> Option<Duration> {
        self.notice
            .as_ref()
            .map(|n| n.expires.saturating_duration_since(now))
    }

    /// Playlist index of the list row under (`column`, `row`), if any.
    ///
    /// `len` is the playlist length; rows past the end do not count.
    pub fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let inner = self.layout.list_area.inner(Margin::new(1, 1));
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let idx = self.layout.list_offset + (row - inner.y) as usize;
        (idx < len).then_some(idx)
    }

    /// Whether (`column`, `row`) lies on the seek gauge.
    pub fn on_seek_bar(&self, column: u16, row: u16) -> bool {
        self.layout.seek_area.contains(Position::new(column, row))
    }

    /// Gauge fill in `[0, 1]` for a pointer at `column`, clamped to the bar.
    pub fn seek_ratio_at(&self, column: u16) -> f64 {
        let inner = self.layout.seek_area.inner(Margin::new(1, 1));
        let span = inner.width.saturating_sub(1);
        if span == 0 {
            return 0.0;
        }
        let offset = column.saturating_sub(inner.x).min(span);
        f64::from(offset) / f64::from(span)
    }
}
