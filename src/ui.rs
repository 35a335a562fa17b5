//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the player screen with `ratatui` from a
//! [`PlayerView`] snapshot and the [`App`] presentation state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Mode, PickerKind, ScreenLayout};
use crate::config::UiSettings;
use crate::playback::{PlayPauseIcon, PlaybackState, PlayerView, TransportView};

const EMPTY_TEXT: &str = "No tracks loaded. Press [o] to open a file or [O] to open a folder.";

const SUPPORT_TITLE: &str = " your device is not supported :( ";

const SUPPORT_TEXT: &str = "This app won't work on your device.\n\
    You can still use it as a media player.";

/// One footer entry: key, label, and whether the action is currently possible.
fn controls(transport: &TransportView, scrub_seconds: u64) -> Vec<(&'static str, String, bool)> {
    let play_label = match transport.icon {
        PlayPauseIcon::Play => "play",
        PlayPauseIcon::Pause => "pause",
    };
    vec![
        ("o/O", "open file/folder".to_string(), true),
        ("space/p", play_label.to_string(), transport.play_pause_enabled),
        ("h/l", "prev/next song".to_string(), transport.next_enabled),
        (
            "H/L",
            format!("scrub -/+{scrub_seconds}s"),
            transport.seek_enabled,
        ),
        ("j/k", "up/down".to_string(), true),
        ("enter", "play selected song".to_string(), true),
        ("q", "quit".to_string(), true),
    ]
}

fn controls_line(transport: &TransportView, scrub_seconds: u64) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label, enabled)) in controls(transport, scrub_seconds).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let span = Span::raw(format!("[{key}] {label}"));
        spans.push(if enabled { span } else { span.dim() });
    }
    Line::from(spans)
}

fn state_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

fn status_text(view: &PlayerView<'_>, app: &App, haptics_available: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    if app.follow_playback {
        parts.push(" CURSOR: Follow".to_string());
    } else {
        parts.push(" CURSOR: Free-roam".to_string());
    }

    parts.push(format!("STATE: {}", state_text(view.state)));

    if let Some(track) = view.current_track() {
        parts.push(format!(
            "Song: {} [{} / {}]",
            track.name, view.transport.current_time, view.transport.total_time
        ));
    }

    let haptics = if !haptics_available {
        "HAPTICS: unavailable"
    } else if view.haptics_attached {
        "HAPTICS: on"
    } else {
        "HAPTICS: off"
    };
    parts.push(haptics.to_string());

    parts.join(" • ")
}

/// Window of rows `[start, end)` to show so that `selected` stays visible,
/// centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn draw_track_list(frame: &mut Frame, area: Rect, view: &PlayerView<'_>, app: &App) -> usize {
    let block = Block::default().borders(Borders::ALL).title(" tracks ");

    if view.is_empty() {
        let empty = Paragraph::new(EMPTY_TEXT)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return 0;
    }

    // Only build ListItems for the visible window.
    let total = view.tracks.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(total, list_height, app.selected);

    let items: Vec<ListItem> = view.tracks[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let index = start + offset;
            let is_current = view.current == Some(index);
            let marker = if is_current { "♪ " } else { "  " };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::raw(format!("{:>6}  ", track.duration_text())).dim(),
                Span::raw(track.name.as_str()),
            ]);
            let item = ListItem::new(line);
            if is_current {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.selected >= start && app.selected < end {
        state.select(Some(app.selected - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
    start
}

fn draw_seek_bar(frame: &mut Frame, area: Rect, transport: &TransportView) {
    let label = format!("{} / {}", transport.current_time, transport.total_time);
    let mut gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" seek "))
        .ratio(transport.seek_ratio())
        .label(label);
    if !transport.seek_enabled {
        gauge = gauge.dim();
    }
    frame.render_widget(gauge, area);
}

fn draw_overlays(frame: &mut Frame, area: Rect, app: &App) {
    match &app.mode {
        Mode::Normal => {}
        Mode::Prompt { kind, input } => {
            let popup = centered_rect_sized(64, 5, area);
            frame.render_widget(Clear, popup);
            let hint = match kind {
                PickerKind::File => "path to an audio file",
                PickerKind::Folder => "path to a folder",
            };
            let text = vec![
                Line::from(vec![Span::raw(input.as_str()), Span::raw("█")]),
                Line::from(format!("{hint} • [enter] open • [esc] cancel")).dim(),
            ];
            let prompt = Paragraph::new(text).block(padded_block(kind.title()));
            frame.render_widget(prompt, popup);
        }
        Mode::SupportDialog => {
            let popup = centered_rect_sized(60, 7, area);
            frame.render_widget(Clear, popup);
            let text = format!("{SUPPORT_TEXT}\n\n[enter] OK • [q] Quit");
            let dialog = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(padded_block(SUPPORT_TITLE));
            frame.render_widget(dialog, popup);
        }
    }

    if let Some(notice) = app.notice() {
        let width = (notice.chars().count() as u16).saturating_add(4);
        let popup = centered_rect_sized(width, 3, area);
        frame.render_widget(Clear, popup);
        let paragraph = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, popup);
    }
}

/// Render the entire UI into `frame` and report where the list and the seek
/// gauge ended up.
pub fn draw(
    frame: &mut Frame,
    view: &PlayerView<'_>,
    app: &App,
    ui_settings: &UiSettings,
    haptics_available: bool,
    scrub_seconds: u64,
) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" haptos ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(view, app, haptics_available))
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let list_offset = draw_track_list(frame, chunks[2], view, app);
    draw_seek_bar(frame, chunks[3], view.transport);

    let footer = Paragraph::new(controls_line(view.transport, scrub_seconds))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    draw_overlays(frame, chunks[2], app);

    ScreenLayout {
        list_area: chunks[2],
        list_offset,
        seek_area: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::library::TrackEntry;

    fn render(view: &PlayerView<'_>, app: &App) -> (String, ScreenLayout) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|f| layout = draw(f, view, app, &UiSettings::default(), false, 5))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text = buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        (text, layout)
    }

    fn idle_view(transport: &TransportView) -> PlayerView<'_> {
        PlayerView {
            tracks: &[],
            current: None,
            state: PlaybackState::Idle,
            transport,
            haptics_attached: false,
        }
    }

    #[test]
    fn visible_window_centers_selection() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(100, 10, 0), (0, 10));
        assert_eq!(visible_window(100, 10, 50), (45, 55));
        assert_eq!(visible_window(100, 10, 99), (90, 100));
        assert_eq!(visible_window(100, 0, 50), (0, 100));
    }

    #[test]
    fn empty_screen_shows_placeholder_and_idle_times() {
        let transport = TransportView::default();
        let app = App::new(true, Duration::from_secs(2));
        let (text, layout) = render(&idle_view(&transport), &app);

        assert!(text.contains("No tracks loaded"));
        assert!(text.contains("-:-- / -:--"));
        assert!(text.contains("STATE: Idle"));
        assert!(text.contains("HAPTICS: unavailable"));
        assert_eq!(layout.list_offset, 0);
        assert_eq!(layout.seek_area.height, 3);
    }

    #[test]
    fn rows_show_name_and_duration() {
        let tracks = vec![
            TrackEntry::new("/m/a.mp3", "alpha.mp3", 185_000),
            TrackEntry::new("/m/b.mp3", "beta.mp3", 0),
        ];
        let mut transport = TransportView::default();
        transport.set_total(185_000);
        transport.set_position(61_000);
        let view = PlayerView {
            tracks: &tracks,
            current: Some(0),
            state: PlaybackState::Playing,
            transport: &transport,
            haptics_attached: false,
        };
        let app = App::new(true, Duration::from_secs(2));
        let (text, _) = render(&view, &app);

        assert!(text.contains("3:05  alpha.mp3"));
        assert!(text.contains("-:--  beta.mp3"));
        assert!(text.contains("1:01 / 3:05"));
        assert!(text.contains("Song: alpha.mp3"));
    }

    #[test]
    fn support_dialog_and_notice_render_over_list() {
        let transport = TransportView::default();
        let mut app = App::new(true, Duration::from_secs(2));
        app.show_support_dialog();
        let (text, _) = render(&idle_view(&transport), &app);
        assert!(text.contains("your device is not supported"));
        assert!(text.contains("won't work on your device"));
        assert!(text.contains("[q] Quit"));

        app.dismiss_support_dialog();
        app.notify("No audio files found in this folder", Instant::now());
        let (text, _) = render(&idle_view(&transport), &app);
        assert!(text.contains("No audio files found in this folder"));
    }
}
