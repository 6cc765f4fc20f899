//! Fixtures shared by tests across the crate.

use std::fs;
use std::path::Path;
use std::time::Duration;

use super::metadata::{MetadataExtractor, TagInfo};
use crate::error::MetadataError;

/// Derives tags from the file name: "Artist - Title.mp3". Files without the
/// separator fail extraction.
pub(crate) struct NameExtractor;

impl MetadataExtractor for NameExtractor {
    fn extract(&self, path: &Path) -> Result<TagInfo, MetadataError> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let (artist, title) = stem.split_once(" - ").ok_or(MetadataError::NoTag)?;
        Ok(TagInfo {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            album: Some(format!("{artist} Album")),
            duration: Some(Duration::from_secs(120)),
            ..TagInfo::default()
        })
    }
}

pub(crate) fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0u8; 1024]).unwrap();
}

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, stereo, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
const FRAME_LEN: usize = 144 * 128_000 / 44_100;

/// Write `frames` silent MPEG frames with no tag at all.
pub(crate) fn write_bare_mp3(path: &Path, frames: usize) {
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);
    let data: Vec<u8> = frame.iter().copied().cycle().take(FRAME_LEN * frames).collect();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, data).unwrap();
}
