use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::metadata::MetadataExtractor;
use super::model::{Folder, LibraryItem, Song};
use super::scan::{count_songs, is_hidden, is_mp3, song_from_file, top_level_folder};
use crate::error::LibraryError;

/// In-memory song catalog plus a browse cursor confined to `root`.
#[derive(Debug)]
pub struct Library {
    root: PathBuf,
    songs: Vec<Song>,
    current: PathBuf,
}

impl Library {
    /// Resolve `root` and start browsing there. The catalog is empty until
    /// [`Library::scan`] runs.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = root.as_ref();
        let root = path
            .canonicalize()
            .map_err(|source| LibraryError::RootUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        if !root.is_dir() {
            return Err(LibraryError::NotADirectory(root));
        }

        Ok(Self {
            current: root.clone(),
            root,
            songs: Vec::new(),
        })
    }

    /// Walk the tree below the root and rebuild the catalog.
    ///
    /// Per-file metadata failures degrade the record and never abort. A
    /// walk-level error stops the scan; the songs collected up to that point
    /// stay in the catalog and the error is returned.
    pub fn scan(
        &mut self,
        extractor: &dyn MetadataExtractor,
        cover_art: bool,
    ) -> Result<usize, LibraryError> {
        self.songs.clear();
        tracing::info!("scanning {}", self.root.display());

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let collected = self.songs.len();
                    tracing::error!("library walk failed after {collected} songs: {source}");
                    return Err(LibraryError::Walk { collected, source });
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && is_mp3(path) {
                let song = song_from_file(&self.root, path, extractor, cover_art);
                tracing::debug!("indexed {}", song.path.display());
                self.songs.push(song);
            }
        }

        tracing::info!("indexed {} songs", self.songs.len());
        Ok(self.songs.len())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_dir(&self) -> &Path {
        &self.current
    }

    /// Full catalog in scan order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song(&self, path: &Path) -> Option<&Song> {
        self.songs.iter().find(|s| s.path == path)
    }

    /// Listing of the current directory: "..", then sub-directories with
    /// their recursive song counts, then the songs directly inside it.
    /// Computed fresh on every call.
    pub fn current_items(&self) -> Vec<LibraryItem> {
        let mut items = Vec::new();

        if self.can_go_back() {
            if let Some(parent) = self.current.parent() {
                items.push(LibraryItem::Folder(Folder {
                    name: Folder::PARENT_NAME.to_string(),
                    path: parent.to_path_buf(),
                    song_count: 0,
                }));
            }
        }

        items.extend(self.sub_folders().into_iter().map(LibraryItem::Folder));
        items.extend(
            self.songs_in_current_folder()
                .into_iter()
                .cloned()
                .map(LibraryItem::Song),
        );
        items
    }

    fn sub_folders(&self) -> Vec<Folder> {
        let entries = match std::fs::read_dir(&self.current) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("cannot list {}: {e}", self.current.display());
                return Vec::new();
            }
        };

        let mut folders: Vec<Folder> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir() && !is_hidden(p))
            .map(|path| Folder {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                song_count: count_songs(&path, true),
                path,
            })
            .collect();

        folders.sort_by_key(|f| f.name.to_lowercase());
        folders
    }

    /// Songs whose parent directory is the browse cursor, in scan order.
    pub fn songs_in_current_folder(&self) -> Vec<&Song> {
        self.songs
            .iter()
            .filter(|s| s.path.parent() == Some(self.current.as_path()))
            .collect()
    }

    /// Move the cursor to `path`. Relative paths resolve against the cursor.
    /// On error the cursor is left untouched.
    pub fn navigate_to(&mut self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let path = path.as_ref();
        let target = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current.join(path)
        };

        let resolved = target
            .canonicalize()
            .map_err(|_| LibraryError::NotADirectory(target.clone()))?;
        if !resolved.starts_with(&self.root) {
            return Err(LibraryError::OutsideRoot(resolved));
        }
        if !resolved.is_dir() {
            return Err(LibraryError::NotADirectory(resolved));
        }

        tracing::debug!("browse {}", resolved.display());
        self.current = resolved;
        Ok(())
    }

    /// Move the cursor to its parent. Returns `false` when already at root.
    pub fn navigate_up(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        match self.current.parent() {
            Some(parent) => {
                self.current = parent.to_path_buf();
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.current != self.root
    }

    /// Breadcrumb for the cursor: "/" at root, "/Rock/70s" below it.
    pub fn relative_path(&self) -> String {
        match self.current.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => "/".to_string(),
            Ok(rel) => {
                let parts: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                format!("/{}", parts.join("/"))
            }
            Err(_) => "/".to_string(),
        }
    }

    /// Case-insensitive substring match on title, artist or album across the
    /// whole catalog. An empty query matches every song.
    pub fn search(&self, query: &str) -> Vec<Song> {
        let needle = query.to_lowercase();
        self.songs
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle)
                    || s.artist.to_lowercase().contains(&needle)
                    || s.album.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Top-level folder under root holding `song`, empty at root.
    pub fn playlist_name_for(&self, song: &Song) -> String {
        top_level_folder(&self.root, &song.path)
    }

    pub fn songs_by_artist(&self, artist: &str) -> Vec<&Song> {
        self.songs
            .iter()
            .filter(|s| s.artist.eq_ignore_ascii_case(artist))
            .collect()
    }

    pub fn songs_by_album(&self, album: &str) -> Vec<&Song> {
        self.songs
            .iter()
            .filter(|s| s.album.eq_ignore_ascii_case(album))
            .collect()
    }

    pub fn unique_artists(&self) -> Vec<String> {
        unique(self.songs.iter().map(|s| s.artist.as_str()))
    }

    pub fn unique_albums(&self) -> Vec<String> {
        unique(self.songs.iter().map(|s| s.album.as_str()))
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
