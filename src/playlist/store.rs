use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::model::Playlist;
use crate::error::PlaylistError;
use crate::library::Song;

/// `$XDG_DATA_HOME/cadenza/playlists`, or `~/.local/share/cadenza/playlists`.
pub fn default_playlist_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };
    data_home.map(|d| d.join("cadenza").join("playlists"))
}

/// File name a playlist is stored under. Names that are not a plain file
/// name fall back to "playlist".
fn file_name_for(name: &str) -> String {
    let safe = Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("playlist");
    format!("{safe}.json")
}

/// Playlists kept in memory and mirrored to `dir`, one file each.
#[derive(Debug)]
pub struct PlaylistStore {
    dir: PathBuf,
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    /// Create `dir` if needed and load every playlist in it.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PlaylistError> {
        let mut store = Self {
            dir: dir.into(),
            playlists: Vec::new(),
        };
        fs::create_dir_all(&store.dir)?;
        store.load_all()?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Re-read the directory. Unreadable documents are skipped.
    pub fn load_all(&mut self) -> Result<usize, PlaylistError> {
        let mut playlists = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(PlaylistError::from)
                .and_then(|raw| serde_json::from_str::<Playlist>(&raw).map_err(Into::into))
            {
                Ok(p) => playlists.push(p),
                Err(e) => tracing::warn!("skipping playlist {}: {e}", path.display()),
            }
        }
        playlists.sort_by(|a, b| a.name.cmp(&b.name));
        self.playlists = playlists;
        Ok(self.playlists.len())
    }

    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    pub fn create(&mut self, name: &str, description: &str) -> Result<&Playlist, PlaylistError> {
        if self.get(name).is_some() {
            return Err(PlaylistError::AlreadyExists(name.to_string()));
        }
        let playlist = Playlist::new(name, description);
        self.save(&playlist)?;
        tracing::info!("created playlist '{name}'");
        self.playlists.push(playlist);
        Ok(&self.playlists[self.playlists.len() - 1])
    }

    pub fn add_song(&mut self, name: &str, song: &Song) -> Result<(), PlaylistError> {
        let idx = self.index_of(name)?;
        if self.playlists[idx].contains(&song.path) {
            return Err(PlaylistError::DuplicateSong {
                playlist: name.to_string(),
                path: song.path.clone(),
            });
        }
        let mut updated = self.playlists[idx].clone();
        updated.songs.push(song.clone());
        updated.touch();
        self.commit(idx, updated)
    }

    /// Remove `path` from the playlist. Returns whether it was there.
    pub fn remove_song(&mut self, name: &str, path: &Path) -> Result<bool, PlaylistError> {
        let idx = self.index_of(name)?;
        if !self.playlists[idx].contains(path) {
            return Ok(false);
        }
        let mut updated = self.playlists[idx].clone();
        updated.songs.retain(|s| s.path != path);
        updated.touch();
        self.commit(idx, updated)?;
        Ok(true)
    }

    /// Save `updated` and only then replace the in-memory entry, so memory
    /// never holds a change the directory does not.
    fn commit(&mut self, idx: usize, updated: Playlist) -> Result<(), PlaylistError> {
        self.save(&updated)?;
        self.playlists[idx] = updated;
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<usize, PlaylistError> {
        self.playlists
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| PlaylistError::NotFound(name.to_string()))
    }

    fn save(&self, playlist: &Playlist) -> Result<(), PlaylistError> {
        let path = self.dir.join(file_name_for(&playlist.name));
        let json = serde_json::to_string_pretty(playlist)?;
        fs::write(&path, json)?;
        tracing::debug!("saved playlist to {}", path.display());
        Ok(())
    }
}
