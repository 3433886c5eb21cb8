//! Path management for EmDia
//!
//! Resolves where the settings file lives. EmDia keeps no application data on
//! disk, so the config directory only ever holds `config.json`.
//!
//! ## Path Resolution Order
//!
//! 1. `EMDIA_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/emdia` or `~/.config/emdia`
//! 3. Windows: `%APPDATA%\emdia`

use std::path::{Path, PathBuf};

use crate::error::EmDiaError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "EMDIA_CONFIG_DIR";

/// Manages the paths used by EmDia
#[derive(Debug, Clone)]
pub struct EmDiaPaths {
    base_dir: PathBuf,
    /// Explicit settings file, overriding `base_dir/config.json`
    config_file: Option<PathBuf>,
}

impl EmDiaPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory is set.
    pub fn new() -> Result<Self, EmDiaError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_path()?,
        };

        Ok(Self {
            base_dir,
            config_file: None,
        })
    }

    /// Create EmDiaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            config_file: None,
        }
    }

    /// Use an explicit settings file instead of `config.json` in the base dir
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.base_dir.join("config.json"))
    }

    /// Ensure the directory holding the settings file exists
    pub fn ensure_directories(&self) -> Result<(), EmDiaError> {
        let settings_file = self.settings_file();
        let dir = settings_file.parent().unwrap_or(&self.base_dir);

        std::fs::create_dir_all(dir)
            .map_err(|e| EmDiaError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, EmDiaError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("emdia"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| EmDiaError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("emdia"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, EmDiaError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| EmDiaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("emdia"))
}
