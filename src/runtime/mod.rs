use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::cli::Args;
use crate::config::{SettingsStore, resolve_config_path};
use crate::error::LibraryError;
use crate::library::{Library, LoftyExtractor};
use crate::logging;
use crate::mpris::ControlCmd;
use crate::playback::{PlaybackEngine, RodioBackend};
use crate::playlist::{PlaylistStore, default_playlist_dir};

mod commands;
mod event_loop;
mod mpris_sync;
mod session;
mod settings;
mod startup;
mod ticker;

use session::Session;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_file.as_deref())?;

    let settings = settings::load_settings();
    let music_dir = args.music_dir();
    tracing::info!("starting with library {}", music_dir.display());

    let mut library = Library::new(&music_dir)?;
    let scan_warning = match library.scan(&LoftyExtractor, !args.no_cover_art) {
        Ok(count) => {
            tracing::info!("library scan found {count} songs");
            None
        }
        Err(e @ LibraryError::Walk { .. }) => {
            tracing::warn!("{e}");
            Some(e.to_string())
        }
        Err(e) => return Err(e.into()),
    };

    let backend = RodioBackend::open_default(settings.buffer_size)?;
    let engine = PlaybackEngine::new(Box::new(backend));
    startup::apply_playback_defaults(&engine, &settings);

    let playlists = match args.playlist_dir.clone().or_else(default_playlist_dir) {
        Some(dir) => PlaylistStore::open(dir)
            .inspect_err(|e| tracing::warn!("playlists unavailable: {e}"))
            .ok(),
        None => None,
    };

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    let (tick_tx, tick_rx) = mpsc::channel::<()>();
    ticker::spawn_ticker(Duration::from_millis(settings.update_interval_ms), tick_tx)?;

    let mut app = App::new(library, settings.show_progress_bar, engine.state());
    if let Some(warning) = scan_warning {
        app.set_status(warning);
    }
    let store = SettingsStore::new(settings, resolve_config_path());
    let mut session = Session::new(app, engine, store, playlists, Some(mpris));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut session, &control_rx, &tick_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    tracing::info!("shutting down");
    run_result
}
