use serde::{Deserialize, Serialize};

/// Persisted user settings.
///
/// File format: JSON
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/settings.json` or
/// `~/.config/cadenza/settings.json`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`)
/// 2) Settings file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the progress line under the library.
    pub show_progress_bar: bool,
    /// Repeat mode restored at startup.
    pub repeat_mode: RepeatModeSetting,
    /// Output volume in `[0, 1]`.
    pub volume: f32,
    pub theme: String,
    pub compact_mode: bool,
    /// Decoder read buffer size in bytes.
    pub buffer_size: usize,
    /// Interval between progress refreshes (milliseconds).
    pub update_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_progress_bar: false,
            repeat_mode: RepeatModeSetting::None,
            volume: 0.8,
            theme: "default".to_string(),
            compact_mode: false,
            buffer_size: 4096,
            update_interval_ms: 500,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatModeSetting {
    #[default]
    #[serde(alias = "off", alias = "no-repeat", alias = "no_repeat")]
    None,
    #[serde(alias = "one", alias = "track", alias = "repeat-one")]
    Single,
    #[serde(alias = "playlist", alias = "repeat-all")]
    All,
}
