//! Persisted session settings.
//!
//! A machine-written JSON blob holding the saved plugin set and the last
//! display scale. Opened once at startup, written once at clean shutdown.
//! Writes are atomic (temp file, then rename).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plugins::PluginInit;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Window display-scale ratios indexed by the persisted `window_size`.
pub const WINDOW_SCALES: [f64; 4] = [1.0, 0.75, 0.5, 0.25];

/// Ratio for a persisted display-scale index (out-of-range clamps to the
/// smallest scale).
pub fn window_scale(index: u8) -> f64 {
    WINDOW_SCALES[(index as usize).min(WINDOW_SCALES.len() - 1)]
}

/// Root persisted state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Saved plugin initializers, in execution order. `None` means no
    /// session has been saved yet (first run), which is distinct from an
    /// explicitly empty plugin set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginInit>>,

    /// Last-used display-scale index into [`WINDOW_SCALES`].
    #[serde(default)]
    pub window_size: u8,

    /// RFC 3339 stamp of the last clean shutdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
}

/// Manages the settings file.
pub struct SettingsManager {
    path: PathBuf,
    settings: SessionSettings,
}

impl SettingsManager {
    /// Create a manager for the given file path. Does not load; call
    /// `load_or_create` after.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: SessionSettings::default(),
        }
    }

    /// Settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Mutable settings; changes are in memory until `save`.
    pub fn settings_mut(&mut self) -> &mut SessionSettings {
        &mut self.settings
    }

    /// Load the settings file, falling back to defaults if it does not
    /// exist. A malformed file is logged and replaced with defaults at
    /// the next save; it never aborts startup.
    pub fn load_or_create(&mut self) -> SettingsResult<()> {
        if !self.path.exists() {
            self.settings = SessionSettings::default();
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(settings) => self.settings = settings,
            Err(e) => {
                tracing::warn!(
                    "settings file {} is malformed ({}), using defaults",
                    self.path.display(),
                    e
                );
                self.settings = SessionSettings::default();
            }
        }
        Ok(())
    }

    /// Write the settings atomically: temp file in the same directory,
    /// then rename.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.settings)?;
        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::PluginArgs;
    use tempfile::tempdir;

    #[test]
    fn first_run_has_no_saved_plugin_list() {
        let dir = tempdir().unwrap();
        let mut manager = SettingsManager::new(dir.path().join("settings.json"));

        manager.load_or_create().unwrap();

        assert!(manager.settings().plugins.is_none());
        assert_eq!(manager.settings().window_size, 0);
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut manager = SettingsManager::new(&path);
        manager.load_or_create().unwrap();
        manager.settings_mut().plugins =
            Some(vec![PluginInit::new("gaze_circle", PluginArgs::new())]);
        manager.settings_mut().window_size = 2;
        manager.save().unwrap();

        let mut fresh = SettingsManager::new(&path);
        fresh.load_or_create().unwrap();

        let plugins = fresh.settings().plugins.as_ref().unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].name, "gaze_circle");
        assert_eq!(fresh.settings().window_size, 2);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let mut manager = SettingsManager::new(&path);
        manager.load_or_create().unwrap();

        assert!(manager.settings().plugins.is_none());
    }

    #[test]
    fn empty_plugin_list_stays_distinct_from_first_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut manager = SettingsManager::new(&path);
        manager.settings_mut().plugins = Some(Vec::new());
        manager.save().unwrap();

        let mut fresh = SettingsManager::new(&path);
        fresh.load_or_create().unwrap();
        assert_eq!(fresh.settings().plugins.as_deref(), Some(&[][..]));
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let manager = SettingsManager::new(&path);
        manager.save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn window_scale_clamps_out_of_range() {
        assert_eq!(window_scale(0), 1.0);
        assert_eq!(window_scale(1), 0.75);
        assert_eq!(window_scale(3), 0.25);
        assert_eq!(window_scale(200), 0.25);
    }
}
