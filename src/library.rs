//! Music library: scanning, tag extraction and folder browsing.

mod art;
mod index;
mod metadata;
mod model;
mod scan;

pub use art::{ART_HEIGHT, ART_WIDTH, CoverArt, placeholder_art, render_cover};
pub use index::Library;
pub use metadata::{LoftyExtractor, MetadataExtractor, TagInfo};
pub use model::{Folder, LibraryItem, Song, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
pub use scan::{MAX_ESTIMATED_DURATION, estimate_duration};

#[cfg(test)]
pub(crate) mod test_support;
