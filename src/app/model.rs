//! Application model: what the UI shows and where the cursor is.
//!
//! `App` owns the library index, the current listing, the play queue and
//! the optional progress control. It never drives playback itself; it
//! mirrors the engine through [`App::apply_snapshot`].

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::LibraryError;
use crate::library::{Folder, Library, LibraryItem, Song};
use crate::playback::{PlayQueue, PlaybackSnapshot};
use crate::progress::ProgressBar;

/// How long a transient status message stays up.
pub const STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    shown_at: Instant,
}

/// The main application model.
pub struct App {
    pub library: Library,
    /// Current listing: the browse directory, or search results.
    pub items: Vec<LibraryItem>,
    pub selected: usize,

    /// Typing into the search box.
    pub search_mode: bool,
    pub search_input: String,
    /// Filter currently applied to the listing.
    pub active_query: Option<String>,

    pub queue: PlayQueue,
    /// Present only while the progress line is shown.
    pub progress: Option<ProgressBar>,
    /// Last engine state read by the ticker.
    pub playback: PlaybackSnapshot,

    pub show_settings: bool,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library, show_progress: bool, playback: PlaybackSnapshot) -> Self {
        let mut app = Self {
            library,
            items: Vec::new(),
            selected: 0,
            search_mode: false,
            search_input: String::new(),
            active_query: None,
            queue: PlayQueue::default(),
            progress: show_progress.then(ProgressBar::new),
            playback,
            show_settings: false,
            status: None,
        };
        app.refresh_items();
        app
    }

    /// Rebuild the listing from the library.
    pub fn refresh_items(&mut self) {
        self.items = match self.active_query.as_deref() {
            Some(q) => self
                .library
                .search(q)
                .into_iter()
                .map(LibraryItem::Song)
                .collect(),
            None => self.library.current_items(),
        };
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn selected_item(&self) -> Option<&LibraryItem> {
        self.items.get(self.selected)
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.selected_item().and_then(LibraryItem::as_song)
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.items.len() - 1);
        }
    }

    fn select_path(&mut self, path: &Path) {
        if let Some(i) = self.items.iter().position(|item| match item {
            LibraryItem::Folder(f) => f.path == path,
            LibraryItem::Song(s) => s.path == path,
        }) {
            self.selected = i;
        }
    }

    /// Paths of the songs in the current listing, in listing order.
    pub fn visible_song_paths(&self) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter_map(LibraryItem::as_song)
            .map(|s| s.path.clone())
            .collect()
    }

    /// Enter the selected folder, or pick the selected song. A picked song
    /// becomes the head of a new queue built from the listing, and its path
    /// is returned for the caller to play.
    pub fn open_selected(&mut self) -> Result<Option<PathBuf>, LibraryError> {
        let Some(item) = self.selected_item().cloned() else {
            return Ok(None);
        };
        match item {
            LibraryItem::Folder(folder) if folder.is_parent() => {
                self.go_up();
                Ok(None)
            }
            LibraryItem::Folder(Folder { path, .. }) => {
                self.library.navigate_to(&path)?;
                self.selected = 0;
                self.refresh_items();
                Ok(None)
            }
            LibraryItem::Song(song) => {
                self.queue = PlayQueue::new(self.visible_song_paths(), &song.path);
                Ok(Some(song.path))
            }
        }
    }

    fn go_up(&mut self) -> bool {
        let from = self.library.current_dir().to_path_buf();
        if !self.library.navigate_up() {
            return false;
        }
        self.selected = 0;
        self.refresh_items();
        self.select_path(&from);
        true
    }

    /// Leave search results, or go to the parent directory.
    pub fn go_back(&mut self) -> bool {
        if self.active_query.is_some() {
            self.clear_search();
            return true;
        }
        self.go_up()
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
        self.search_input = self.active_query.clone().unwrap_or_default();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
    }

    /// Apply the typed query. An empty query removes the filter.
    pub fn apply_search(&mut self) {
        self.search_mode = false;
        let query = self.search_input.trim().to_string();
        self.active_query = (!query.is_empty()).then_some(query);
        self.selected = 0;
        self.refresh_items();
    }

    /// Leave the search box without touching the applied filter.
    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
    }

    pub fn clear_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
        self.active_query = None;
        self.selected = 0;
        self.refresh_items();
    }

    /// Breadcrumb for the header.
    pub fn breadcrumb(&self) -> String {
        match &self.active_query {
            Some(q) => format!("Search: {q} ({} results)", self.items.len()),
            None => self.library.relative_path(),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// The status message, if it has not expired by `now`.
    pub fn status_text(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| now.saturating_duration_since(m.shown_at) < STATUS_TTL)
            .map(|m| m.text.as_str())
    }

    /// Show or hide the progress line. Showing it starts a fresh control.
    pub fn set_progress_visible(&mut self, visible: bool) {
        match (visible, self.progress.is_some()) {
            (true, false) => {
                let mut bar = ProgressBar::new();
                bar.update(self.playback.position, self.playback.duration);
                self.progress = Some(bar);
            }
            (false, true) => self.progress = None,
            _ => {}
        }
    }

    /// Record the engine's latest state and push it into the progress line.
    pub fn apply_snapshot(&mut self, snapshot: PlaybackSnapshot) {
        if let Some(bar) = self.progress.as_mut() {
            bar.update(snapshot.position, snapshot.duration);
        }
        self.playback = snapshot;
    }

    /// The catalog entry for the song the engine has loaded.
    pub fn now_playing(&self) -> Option<&Song> {
        self.playback
            .song
            .as_deref()
            .and_then(|p| self.library.song(p))
    }
}
