use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Mode, PickerKind};
use crate::audio::{AudioBackend, HapticEngine};
use crate::config;
use crate::library::{DirectoryListing, MetadataReader, TrackResolver};
use crate::playback::{PlaybackController, SeekOrigin};
use crate::runtime::picker;
use crate::ui;

/// Longest the loop sleeps while waiting for input. Player completion is
/// polled, so this bounds how late auto-advance can be.
const MAX_WAIT: Duration = Duration::from_millis(50);

/// Everything the loop drives, borrowed from `runtime::run`.
pub struct Context<'a, L, M, B: AudioBackend, H: HapticEngine> {
    pub settings: &'a config::Settings,
    pub app: &'a mut App,
    pub controller: &'a mut PlaybackController<B, H>,
    pub resolver: &'a TrackResolver<L, M>,
}

/// Main terminal event loop: dispatches player events, runs the progress
/// reporter, draws, then handles at most one input event. Returns `Ok(())`
/// when the user quits.
pub fn run<L, M, B, H>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    cx: &mut Context<'_, L, M, B, H>,
) -> Result<(), Box<dyn std::error::Error>>
where
    L: DirectoryListing,
    M: MetadataReader,
    B: AudioBackend,
    H: HapticEngine,
{
    loop {
        let now = Instant::now();

        cx.controller.handle_player_event();
        cx.controller.tick_progress(now);
        cx.app.expire_notice(now);

        let haptics_available = cx.controller.haptics_available();
        let view = cx.controller.view();
        cx.app.sync_selection(view.current, view.tracks.len());

        let app = &*cx.app;
        let mut layout = app.layout;
        terminal.draw(|f| {
            layout = ui::draw(
                f,
                &view,
                app,
                &cx.settings.ui,
                haptics_available,
                cx.settings.playback.scrub_seconds,
            )
        })?;
        cx.app.layout = layout;

        let timeout = [
            cx.controller.next_progress_deadline(now),
            cx.app.notice_deadline(now),
        ]
        .into_iter()
        .flatten()
        .fold(MAX_WAIT, Duration::min);

        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(key, cx) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, cx),
            _ => {}
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key_event<L, M, B, H>(key: KeyEvent, cx: &mut Context<'_, L, M, B, H>) -> bool
where
    L: DirectoryListing,
    M: MetadataReader,
    B: AudioBackend,
    H: HapticEngine,
{
    match cx.app.mode {
        Mode::SupportDialog => {
            match key.code {
                KeyCode::Enter => cx.app.dismiss_support_dialog(),
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }
        Mode::Prompt { .. } => {
            match key.code {
                KeyCode::Esc => cx.app.cancel_prompt(),
                KeyCode::Backspace => cx.app.pop_prompt_char(),
                KeyCode::Enter => {
                    if let Some((kind, input)) = cx.app.submit_prompt() {
                        let path = picker::expand_home(&input);
                        debug!(?kind, path = %path.display(), "path submitted");
                        if let Some(notice) = picker::open(kind, &path, cx.resolver, cx.controller)
                        {
                            cx.app.notify(notice, Instant::now());
                        }
                        cx.app.follow_playback_on();
                    }
                }
                KeyCode::Char(c) if !c.is_control() => cx.app.push_prompt_char(c),
                _ => {}
            }
            return false;
        }
        Mode::Normal => {}
    }

    let len = cx.controller.playlist().len();
    let transport = cx.controller.transport().clone();
    let scrub_ms = cx.settings.playback.scrub_seconds.saturating_mul(1000);
    let scrub_ms = i64::try_from(scrub_ms).unwrap_or(i64::MAX);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('o') => cx.app.open_prompt(PickerKind::File),
        KeyCode::Char('O') => cx.app.open_prompt(PickerKind::Folder),
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            if transport.play_pause_enabled {
                cx.app.follow_playback_on();
                cx.controller.toggle_play_pause();
            }
        }
        KeyCode::Char('l') => {
            if transport.next_enabled {
                cx.app.follow_playback_on();
                cx.controller.next(false);
            }
        }
        KeyCode::Char('h') => {
            if transport.previous_enabled {
                cx.app.follow_playback_on();
                cx.controller.previous();
            }
        }
        KeyCode::Char('L') => {
            if transport.seek_enabled {
                cx.controller.scrub(scrub_ms);
            }
        }
        KeyCode::Char('H') => {
            if transport.seek_enabled {
                cx.controller.scrub(-scrub_ms);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            cx.app.follow_playback_off();
            cx.app.next(len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            cx.app.follow_playback_off();
            cx.app.prev(len);
        }
        KeyCode::Enter => {
            if cx.app.selected < len {
                cx.app.follow_playback_on();
                cx.controller.play_track(cx.app.selected);
            }
        }
        _ => {}
    }
    false
}

fn handle_mouse_event<L, M, B, H>(mouse: MouseEvent, cx: &mut Context<'_, L, M, B, H>)
where
    L: DirectoryListing,
    M: MetadataReader,
    B: AudioBackend,
    H: HapticEngine,
{
    if cx.app.mode != Mode::Normal {
        return;
    }
    let len = cx.controller.playlist().len();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if cx.app.on_seek_bar(mouse.column, mouse.row) {
                if cx.controller.transport().seek_enabled {
                    cx.app.seek_dragging = true;
                    cx.controller.begin_seek_drag();
                    seek_to_pointer(mouse.column, cx);
                }
            } else if let Some(index) = cx.app.row_at(mouse.column, mouse.row, len) {
                cx.app.selected = index;
                cx.app.follow_playback_on();
                cx.controller.play_track(index);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if cx.app.seek_dragging {
                seek_to_pointer(mouse.column, cx);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if cx.app.seek_dragging {
                seek_to_pointer(mouse.column, cx);
                cx.app.seek_dragging = false;
                cx.controller.end_seek_drag();
            }
        }
        MouseEventKind::ScrollDown => {
            cx.app.follow_playback_off();
            cx.app.next(len);
        }
        MouseEventKind::ScrollUp => {
            cx.app.follow_playback_off();
            cx.app.prev(len);
        }
        _ => {}
    }
}

fn seek_to_pointer<L, M, B, H>(column: u16, cx: &mut Context<'_, L, M, B, H>)
where
    B: AudioBackend,
    H: HapticEngine,
{
    let max = cx.controller.transport().seek_max_ms;
    if max == 0 {
        return;
    }
    let target = (cx.app.seek_ratio_at(column) * max as f64).round() as u64;
    cx.controller.seek(target, SeekOrigin::User);
}
