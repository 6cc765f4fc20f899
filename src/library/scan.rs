use std::path::Path;
use std::time::Duration;

use walkdir::WalkDir;

use super::art::{ART_HEIGHT, ART_WIDTH, render_cover};
use super::metadata::{MetadataExtractor, TagInfo};
use super::model::{Song, UNKNOWN_ALBUM, UNKNOWN_ARTIST};

/// Bytes per second assumed for a 128 kbps MP3 when nothing better is known.
pub const ASSUMED_BYTES_PER_SECOND: u64 = 16_000;

/// Upper bound on size-based estimates, so a mislabelled file cannot claim
/// to be days long.
pub const MAX_ESTIMATED_DURATION: Duration = Duration::from_secs(2 * 60 * 60);

pub(super) fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Estimate a duration from the file size, capped at [`MAX_ESTIMATED_DURATION`].
pub fn estimate_duration(file_size: u64) -> Duration {
    Duration::from_secs(file_size / ASSUMED_BYTES_PER_SECOND).min(MAX_ESTIMATED_DURATION)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Name of the first path component of `path` below `root`, or empty when
/// the song sits directly in `root`.
pub(super) fn top_level_folder(root: &Path, path: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return String::new();
    };
    let mut components = rel.components();
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first.as_os_str().to_string_lossy().into_owned(),
        _ => String::new(),
    }
}

/// Build a `Song` for `path`, degrading to sentinel fields when the
/// extractor fails.
pub(super) fn song_from_file(
    root: &Path,
    path: &Path,
    extractor: &dyn MetadataExtractor,
    cover_art: bool,
) -> Song {
    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let playlist = top_level_folder(root, path);

    match extractor.extract(path) {
        Ok(tags) => song_from_tags(path, tags, file_size, playlist, cover_art),
        Err(e) => {
            tracing::warn!("metadata for {} unavailable: {e}", path.display());
            Song {
                path: path.to_path_buf(),
                title: file_stem(path),
                artist: UNKNOWN_ARTIST.to_string(),
                album: UNKNOWN_ALBUM.to_string(),
                year: String::new(),
                genre: String::new(),
                track: 0,
                file_size,
                duration: Duration::ZERO,
                cover_art: None,
                playlist,
            }
        }
    }
}

fn song_from_tags(
    path: &Path,
    tags: TagInfo,
    file_size: u64,
    playlist: String,
    cover_art: bool,
) -> Song {
    let cover_art = if cover_art {
        tags.cover_art
            .as_deref()
            .and_then(|bytes| render_cover(bytes, ART_WIDTH, ART_HEIGHT))
    } else {
        None
    };

    Song {
        path: path.to_path_buf(),
        title: tags.title.unwrap_or_else(|| file_stem(path)),
        artist: tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album: tags.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        year: tags.year.unwrap_or_default(),
        genre: tags.genre.unwrap_or_default(),
        track: tags.track.unwrap_or(0),
        file_size,
        duration: tags
            .duration
            .unwrap_or_else(|| estimate_duration(file_size)),
        cover_art,
        playlist,
    }
}

/// Count MP3 files anywhere under `dir`. Unreadable entries are skipped.
pub(super) fn count_songs(dir: &Path, follow_links: bool) -> usize {
    WalkDir::new(dir)
        .follow_links(follow_links)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_mp3(e.path()))
        .count()
}
