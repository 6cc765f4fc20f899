use crate::config;

/// Load settings, falling back to defaults on any error. Config is optional;
/// a broken file must not keep the player from starting.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(mut s) => match s.validate() {
            Ok(()) => s,
            Err(msg) => {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
