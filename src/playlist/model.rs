use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::library::Song;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: description.into(),
            songs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.songs.iter().any(|s| s.path == path)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
