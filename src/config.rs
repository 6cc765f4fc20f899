//! Settings schema, loading and persistence.
//!
//! Settings are loaded once at startup (best effort) and saved by
//! [`SettingsStore`] after every change made from the UI.

mod load;
mod schema;
mod store;

pub use load::resolve_config_path;
pub use schema::*;
pub use store::SettingsStore;
