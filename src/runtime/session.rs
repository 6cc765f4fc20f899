//! The single command path shared by keys, mouse, MPRIS and the ticker.

use std::path::{Path, PathBuf};

use super::commands::Command;
use super::mpris_sync::update_mpris;
use super::startup::repeat_setting;
use crate::app::App;
use crate::config::{Settings, SettingsStore};
use crate::error::{PlaybackError, PlaylistError, SettingsError};
use crate::mpris::MprisHandle;
use crate::playback::{FinishedOutcome, PlaybackEngine, TransportPhase, handle_finished};
use crate::playlist::PlaylistStore;

pub const FAVORITES: &str = "Favorites";
const VOLUME_STEP: f32 = 0.1;

pub struct Session {
    pub app: App,
    engine: PlaybackEngine,
    settings: SettingsStore,
    playlists: Option<PlaylistStore>,
    mpris: Option<MprisHandle>,
}

impl Session {
    pub fn new(
        app: App,
        engine: PlaybackEngine,
        settings: SettingsStore,
        playlists: Option<PlaylistStore>,
        mpris: Option<MprisHandle>,
    ) -> Self {
        let mut session = Self {
            app,
            engine,
            settings,
            playlists,
            mpris,
        };
        session.refresh();
        session
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// Run one command. Returns `true` when the player should quit.
    pub fn execute(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => {
                self.engine.stop();
                return true;
            }
            Command::Play => match self.engine.state().phase {
                TransportPhase::Paused => self.engine.resume(),
                TransportPhase::Stopped => self.play_selected(),
                TransportPhase::Playing => {}
            },
            Command::Pause => self.engine.pause(),
            Command::PlayPause => match self.engine.state().phase {
                TransportPhase::Stopped => self.play_selected(),
                _ => self.engine.toggle_play_pause(),
            },
            Command::Stop => self.engine.stop(),
            Command::Activate => self.activate(),
            Command::Back => {
                self.app.go_back();
            }
            Command::Next => {
                if let Some(path) = self.app.queue.next().map(Path::to_path_buf) {
                    self.play_path(path);
                }
            }
            Command::Prev => {
                if let Some(path) = self.app.queue.previous().map(Path::to_path_buf) {
                    self.play_path(path);
                }
            }
            Command::MoveDown => self.app.next(),
            Command::MoveUp => self.app.prev(),
            Command::SeekBy(secs) => self.seek_result(self.engine.seek_by(secs)),
            Command::VolumeUp => self.change_volume(VOLUME_STEP),
            Command::VolumeDown => self.change_volume(-VOLUME_STEP),
            Command::CycleRepeat => {
                let mode = self.engine.cycle_repeat_mode();
                let saved = self.settings.set_repeat_mode(repeat_setting(mode));
                self.app.set_status(format!("Repeat: {}", mode.label()));
                self.persist(saved);
            }
            Command::ToggleProgressBar => {
                let saved = self.settings.toggle_progress_bar();
                let visible = self.settings.settings().show_progress_bar;
                self.app.set_progress_visible(visible);
                self.app.set_status(if visible {
                    "Progress bar shown"
                } else {
                    "Progress bar hidden"
                });
                self.persist(saved);
            }
            Command::AddToFavorites => self.add_to_favorites(),
            Command::ToggleSettingsInfo => self.app.show_settings = !self.app.show_settings,

            Command::StartSearch => self.app.enter_search_mode(),
            Command::SearchInput(c) => self.app.push_search_char(c),
            Command::SearchBackspace => self.app.pop_search_char(),
            Command::ApplySearch => self.app.apply_search(),
            Command::CancelSearch => self.app.cancel_search(),

            Command::ProgressPress { column, width } => {
                if let Some(bar) = self.app.progress.as_mut()
                    && let Some(fraction) = bar.hit_test(column, width)
                {
                    bar.start_drag(fraction);
                }
            }
            Command::ProgressDrag { column, width } => {
                if let Some(bar) = self.app.progress.as_mut()
                    && bar.is_dragging()
                {
                    let fraction = bar.drag_fraction(column, width);
                    bar.update_drag(fraction);
                }
            }
            Command::ProgressRelease => {
                let target = self.app.progress.as_mut().and_then(|bar| bar.end_drag());
                if let Some(target) = target {
                    self.seek_result(self.engine.seek(target));
                }
            }

            Command::Tick => self.tick(),
        }
        self.refresh();
        false
    }

    /// Pull the engine state into the app and out to MPRIS.
    fn refresh(&mut self) {
        self.app.apply_snapshot(self.engine.state());
        if let Some(mpris) = &self.mpris {
            update_mpris(mpris, &self.app);
        }
    }

    fn tick(&mut self) {
        match handle_finished(&self.engine, &mut self.app.queue) {
            Ok(FinishedOutcome::StillPlaying) => {}
            Ok(FinishedOutcome::Stopped) => self.app.set_status("End of queue"),
            Ok(FinishedOutcome::Started(path)) => self.announce(&path),
            Err(e) => {
                tracing::warn!("advancing the queue failed: {e}");
                self.engine.stop();
                self.app.set_status(format!("Playback error: {e}"));
            }
        }
    }

    fn activate(&mut self) {
        match self.app.open_selected() {
            Ok(Some(path)) => self.play_path(path),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("cannot open selection: {e}");
                self.app.set_status(e.to_string());
            }
        }
    }

    /// Start the selected song, or the queue's current song when a folder
    /// is selected.
    fn play_selected(&mut self) {
        if self.app.selected_song().is_some() {
            self.activate();
        } else if let Some(path) = self.app.queue.current().map(Path::to_path_buf) {
            self.play_path(path);
        } else {
            self.app.set_status("Select a song to play");
        }
    }

    fn play_path(&mut self, path: PathBuf) {
        match self.engine.play(&path) {
            Ok(()) => self.announce(&path),
            Err(e) => {
                tracing::warn!("playback failed: {e}");
                self.app.set_status(format!("Cannot play: {e}"));
            }
        }
    }

    fn announce(&mut self, path: &Path) {
        let name = self
            .app
            .library
            .song(path)
            .map(|s| s.display())
            .unwrap_or_else(|| path.display().to_string());
        tracing::info!("now playing {}", path.display());
        self.app.set_status(format!("Now playing: {name}"));
    }

    fn seek_result(&mut self, result: Result<std::time::Duration, PlaybackError>) {
        match result {
            Ok(_) => {}
            Err(PlaybackError::NothingLoaded) => self.app.set_status("Nothing is playing"),
            Err(e) => {
                tracing::warn!("seek failed: {e}");
                self.app.set_status(e.to_string());
            }
        }
    }

    fn change_volume(&mut self, delta: f32) {
        let volume = self.engine.set_volume(self.engine.volume() + delta);
        self.app
            .set_status(format!("Volume: {}%", (volume * 100.0).round() as u8));
        let saved = self.settings.set_volume(volume);
        self.persist(saved);
    }

    fn add_to_favorites(&mut self) {
        let Some(song) = self.app.selected_song().cloned() else {
            self.app.set_status("Select a song first");
            return;
        };
        let Some(store) = self.playlists.as_mut() else {
            self.app.set_status("Playlists are unavailable");
            return;
        };

        let ready = if store.get(FAVORITES).is_none() {
            store.create(FAVORITES, "Songs marked with 'a'").map(|_| ())
        } else {
            Ok(())
        };
        let result = ready.and_then(|()| store.add_song(FAVORITES, &song));

        match result {
            Ok(()) => self
                .app
                .set_status(format!("Added to {FAVORITES}: {}", song.title)),
            Err(PlaylistError::DuplicateSong { .. }) => {
                self.app.set_status(format!("Already in {FAVORITES}"))
            }
            Err(e) => {
                tracing::warn!("could not update {FAVORITES}: {e}");
                self.app.set_status(e.to_string());
            }
        }
    }

    fn persist(&mut self, result: Result<(), SettingsError>) {
        match result {
            Ok(()) => {}
            Err(SettingsError::NoConfigPath) => {
                tracing::debug!("no settings path; change kept in memory")
            }
            Err(e) => {
                tracing::warn!("failed to save settings: {e}");
                self.app.set_status(format!("Settings not saved: {e}"));
            }
        }
    }
}
