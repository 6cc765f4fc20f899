use std::fs;
use std::path::{Path, PathBuf};

use super::schema::{RepeatModeSetting, Settings};
use crate::error::SettingsError;

/// Settings plus the file they are saved to after every change.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Settings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new(settings: Settings, path: Option<PathBuf>) -> Self {
        Self { settings, path }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply `f` and save. The change is kept in memory even when saving
    /// fails.
    pub fn update<F>(&mut self, f: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.save()
    }

    pub fn toggle_progress_bar(&mut self) -> Result<(), SettingsError> {
        self.update(|s| s.show_progress_bar = !s.show_progress_bar)
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatModeSetting) -> Result<(), SettingsError> {
        self.update(|s| s.repeat_mode = mode)
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<(), SettingsError> {
        self.update(|s| s.volume = volume.clamp(0.0, 1.0))
    }

    /// Write the document as pretty JSON, creating parent directories.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = self.path.as_ref().ok_or(SettingsError::NoConfigPath)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(path, json)?;
        tracing::debug!("settings saved to {}", path.display());
        Ok(())
    }
}
