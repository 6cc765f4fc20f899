//! Named playlists persisted as one JSON document per playlist.

mod model;
mod store;

pub use model::Playlist;
pub use store::{PlaylistStore, default_playlist_dir};
