use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{HapticEngine, HapticGate, NoHaptics, RodioBackend};
use crate::library::{FsListing, LoftyMetadata, TrackResolver};
use crate::playback::PlaybackController;

mod event_loop;
mod logging;
mod picker;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    // Keeps the log writer flushing until we return.
    let _log_guard = match logging::init(&settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("haptos: logging disabled: {e}");
            None
        }
    };
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let backend = RodioBackend::open_default()?;
    let haptics = HapticGate::new(NoHaptics, settings.haptics.enabled);
    let haptics_unsupported = !haptics.switched_off() && !haptics.is_available();

    let mut controller = PlaybackController::new(
        backend,
        haptics,
        Duration::from_millis(settings.playback.progress_interval_ms),
    );
    let resolver = TrackResolver::new(
        FsListing {
            sniff_media_type: settings.library.sniff_media_type,
            include_hidden: settings.library.include_hidden,
        },
        LoftyMetadata,
        &settings.library.extensions,
    );

    let mut app = App::new(
        settings.ui.follow_playback,
        Duration::from_millis(settings.ui.notice_ms),
    );
    if haptics_unsupported {
        warn!("haptic feedback is not supported on this device");
        app.show_support_dialog();
    }

    if let Some(arg) = env::args_os().nth(1) {
        let path = PathBuf::from(arg);
        let kind = picker::kind_for(&path);
        if let Some(notice) = picker::open(kind, &path, &resolver, &mut controller) {
            app.notify(notice, Instant::now());
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut cx = event_loop::Context {
            settings: &settings,
            app: &mut app,
            controller: &mut controller,
            resolver: &resolver,
        };
        event_loop::run(&mut terminal, &mut cx)
    };

    // Player and reporter go before the terminal is handed back.
    controller.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    run_result
}
