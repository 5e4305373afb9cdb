//! Path management for onboard-cli
//!
//! ## Path Resolution Order
//!
//! 1. `ONBOARD_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/onboard-cli` on Linux, `~/Library/Application Support/...`
//!    on macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::OnboardError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ONBOARD_CLI_DATA_DIR";

/// Manages all paths used by onboard-cli
#[derive(Debug, Clone)]
pub struct OnboardPaths {
    /// Base directory for settings and logs
    base_dir: PathBuf,
}

impl OnboardPaths {
    /// Create a new OnboardPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, OnboardError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OnboardPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure the base and log directories exist
    pub fn ensure_directories(&self) -> Result<(), OnboardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| OnboardError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.log_dir())
            .map_err(|e| OnboardError::Io(format!("Failed to create log directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, OnboardError> {
    ProjectDirs::from("", "", "onboard-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| OnboardError::Config("Could not determine a config directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OnboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_dir(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("onboard");
        let paths = OnboardPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();

        assert!(base.exists());
        assert!(paths.log_dir().exists());
        assert!(!paths.is_initialized());
    }
}
