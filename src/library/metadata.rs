//! Tag extraction seam.
//!
//! The scanner only depends on [`MetadataExtractor`]; [`LoftyExtractor`] is
//! the production implementation.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;

use crate::error::MetadataError;

/// Raw tag fields for one file. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub track: Option<u32>,
    /// Duration reported by the container, when it knows one.
    pub duration: Option<Duration>,
    pub cover_art: Option<Vec<u8>>,
}

pub trait MetadataExtractor {
    fn extract(&self, path: &Path) -> Result<TagInfo, MetadataError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyExtractor;

impl MetadataExtractor for LoftyExtractor {
    fn extract(&self, path: &Path) -> Result<TagInfo, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Read(e.to_string()))?;

        let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());
        // An untagged stream is still a song; the scan fills in sentinels.
        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(TagInfo {
                duration,
                ..TagInfo::default()
            });
        };

        let year = tag
            .items()
            .find(|item| matches!(item.key(), ItemKey::Year | ItemKey::RecordingDate))
            .and_then(|item| item.value().text())
            .map(str::to_string);

        let track = tag.track().or_else(|| {
            tag.items()
                .find(|item| matches!(item.key(), ItemKey::TrackNumber))
                .and_then(|item| item.value().text())
                .and_then(parse_track_number)
        });

        Ok(TagInfo {
            title: non_empty(tag.title().map(|s| s.to_string())),
            artist: non_empty(tag.artist().map(|s| s.to_string())),
            album: non_empty(tag.album().map(|s| s.to_string())),
            year: non_empty(year),
            genre: non_empty(tag.genre().map(|s| s.to_string())),
            track,
            duration,
            cover_art: tag.pictures().first().map(|p| p.data().to_vec()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse "7" or "7/12" into 7.
pub fn parse_track_number(text: &str) -> Option<u32> {
    text.split('/').next()?.trim().parse().ok()
}
