//! Error types shared across the core modules.
//!
//! Each concern gets its own enum so callers can decide what is fatal:
//! library and playback errors surface as status messages, settings load
//! errors are swallowed, and only an unusable music root stops startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning or browsing the music library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The root directory could not be resolved at construction.
    #[error("music root {path:?} is not accessible: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walk hit an I/O error; `collected` songs were kept.
    #[error("library scan stopped after {collected} songs: {source}")]
    Walk {
        collected: usize,
        #[source]
        source: walkdir::Error,
    },

    /// Navigation target resolves outside the root subtree.
    #[error("{0:?} is outside the music library")]
    OutsideRoot(PathBuf),

    /// Navigation target does not exist or is not a directory.
    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),
}

/// Per-file metadata failures. Never fatal: the scan degrades the record.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read tags: {0}")]
    Read(String),

    #[error("no tag found")]
    NoTag,
}

/// Errors raised by the playback engine and its audio backend.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("no track currently loaded")]
    NothingLoaded,
}

/// Errors raised while persisting the settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no config directory could be determined")]
    NoConfigPath,

    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by the playlist store.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("playlist '{0}' already exists")]
    AlreadyExists(String),

    #[error("playlist '{0}' not found")]
    NotFound(String),

    #[error("song {path:?} already exists in playlist '{playlist}'")]
    DuplicateSong { playlist: String, path: PathBuf },

    #[error("playlist I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("playlist document error: {0}")]
    Serialize(#[from] serde_json::Error),
}
