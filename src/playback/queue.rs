//! The list a song was started from, and what plays after it.

use std::path::{Path, PathBuf};

use super::engine::PlaybackEngine;
use super::types::RepeatMode;
use crate::error::PlaybackError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayQueue {
    songs: Vec<PathBuf>,
    index: usize,
}

impl PlayQueue {
    /// Queue over `songs` positioned at `current`, or at the start when
    /// `current` is not part of it.
    pub fn new(songs: Vec<PathBuf>, current: &Path) -> Self {
        let index = songs.iter().position(|p| p == current).unwrap_or(0);
        Self { songs, index }
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Path> {
        self.songs.get(self.index).map(PathBuf::as_path)
    }

    /// Step forward, wrapping to the first song.
    pub fn next(&mut self) -> Option<&Path> {
        if self.songs.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.songs.len();
        self.current()
    }

    /// Step back, wrapping to the last song.
    pub fn previous(&mut self) -> Option<&Path> {
        if self.songs.is_empty() {
            return None;
        }
        self.index = self.index.checked_sub(1).unwrap_or(self.songs.len() - 1);
        self.current()
    }

    /// Pick the song to play after the current one ended under `mode`.
    /// `None` means playback should stop. Unlike `next`, `RepeatMode::None`
    /// deliberately stops after the last song instead of wrapping.
    pub fn after_finished(&mut self, mode: RepeatMode) -> Option<PathBuf> {
        if self.songs.is_empty() {
            return None;
        }
        match mode {
            RepeatMode::Single => {}
            RepeatMode::All => self.index = (self.index + 1) % self.songs.len(),
            RepeatMode::None => {
                if self.index + 1 >= self.songs.len() {
                    return None;
                }
                self.index += 1;
            }
        }
        self.current().map(Path::to_path_buf)
    }
}

/// What the finished-song policy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishedOutcome {
    /// Playback is still going; nothing to do.
    StillPlaying,
    /// The queue was exhausted and the engine stopped.
    Stopped,
    /// This song was started.
    Started(PathBuf),
}

/// React to the end of a song: replay, advance or stop according to the
/// engine's repeat mode. Only acts while a song is loaded and playing.
pub fn handle_finished(
    engine: &PlaybackEngine,
    queue: &mut PlayQueue,
) -> Result<FinishedOutcome, PlaybackError> {
    let snapshot = engine.state();
    if snapshot.song.is_none() || !engine.is_finished() {
        return Ok(FinishedOutcome::StillPlaying);
    }

    match queue.after_finished(snapshot.repeat_mode) {
        Some(next) => {
            engine.play(&next)?;
            Ok(FinishedOutcome::Started(next))
        }
        None => {
            tracing::info!("end of queue");
            engine.stop();
            Ok(FinishedOutcome::Stopped)
        }
    }
}
