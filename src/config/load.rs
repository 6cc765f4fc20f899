use std::{env, path::PathBuf};

use super::schema::Settings;

/// Largest accepted refresh interval; anything slower makes the progress
/// line useless.
const MAX_UPDATE_INTERVAL_MS: u64 = 10_000;

/// Settings loading helpers.
///
/// `Settings::load` reads the optional settings file, then lets environment
/// variables (prefix `CADENZA__`) override it, and falls back to struct
/// defaults for anything missing.
impl Settings {
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(
                ::config::File::from(path.as_path())
                    .format(::config::FileFormat::Json)
                    .required(false),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENZA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Clamp recoverable values into range and reject the rest.
    pub fn validate(&mut self) -> Result<(), String> {
        if self.update_interval_ms == 0 {
            return Err("update_interval_ms must be >= 1".to_string());
        }
        if self.update_interval_ms > MAX_UPDATE_INTERVAL_MS {
            return Err(format!(
                "update_interval_ms must be <= {MAX_UPDATE_INTERVAL_MS}"
            ));
        }
        if self.volume.is_nan() {
            return Err("volume must be a number".to_string());
        }
        self.volume = self.volume.clamp(0.0, 1.0);
        if self.buffer_size == 0 {
            self.buffer_size = Settings::default().buffer_size;
        }
        Ok(())
    }
}

/// Resolve the settings path from `CADENZA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENZA_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default path under `$XDG_CONFIG_HOME/cadenza/settings.json`
/// or `~/.config/cadenza/settings.json` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("cadenza").join("settings.json"))
}
