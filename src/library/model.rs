use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::art::CoverArt;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// One catalog entry. Built by the scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub track: u32,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub duration: Duration,
    #[serde(skip)]
    pub cover_art: Option<CoverArt>,
    /// Top-level folder under the library root, empty for root-level songs.
    #[serde(default)]
    pub playlist: String,
}

impl Song {
    /// "Artist - Title", the way songs are listed.
    pub fn display(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// A sub-directory entry in a browse listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    pub path: PathBuf,
    /// Number of MP3 files anywhere below `path`.
    pub song_count: usize,
}

impl Folder {
    pub const PARENT_NAME: &'static str = "..";

    pub fn is_parent(&self) -> bool {
        self.name == Self::PARENT_NAME
    }
}

/// Browse listing entry: ".." first, then folders, then songs.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryItem {
    Folder(Folder),
    Song(Song),
}

impl LibraryItem {
    pub fn is_folder(&self) -> bool {
        matches!(self, LibraryItem::Folder(_))
    }

    pub fn as_song(&self) -> Option<&Song> {
        match self {
            LibraryItem::Song(s) => Some(s),
            LibraryItem::Folder(_) => None,
        }
    }
}
