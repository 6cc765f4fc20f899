//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the library listing,
//! selection, search box, play queue and progress control.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
