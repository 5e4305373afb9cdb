//! User settings for onboard-cli
//!
//! Holds the partner redirect target, wizard timings and logging preferences.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::OnboardPaths;
use crate::error::OnboardError;

/// Settings for onboard-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Credit-monitoring partner landing page
    #[serde(default = "default_partner_url")]
    pub partner_url: String,

    /// Affiliate identifier sent as the `GUID` query parameter
    #[serde(default = "default_partner_guid")]
    pub partner_guid: String,

    /// Seconds the completion step waits before redirecting
    #[serde(default = "default_redirect_delay_secs")]
    pub redirect_delay_secs: u64,

    /// How close (in rows) to the bottom of the terms text counts as read
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: usize,

    /// Whether to hand the redirect URL to the system browser
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_partner_url() -> String {
    "http://app.myryze.com/redirect.asp".to_string()
}

fn default_partner_guid() -> String {
    "BTW1135HKQ8Y".to_string()
}

fn default_redirect_delay_secs() -> u64 {
    8
}

fn default_scroll_threshold() -> usize {
    5
}

fn default_open_browser() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            partner_url: default_partner_url(),
            partner_guid: default_partner_guid(),
            redirect_delay_secs: default_redirect_delay_secs(),
            scroll_threshold: default_scroll_threshold(),
            open_browser: default_open_browser(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Redirect delay as a Duration
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_secs(self.redirect_delay_secs)
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &OnboardPaths) -> Result<Self, OnboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                OnboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                OnboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - `onboard init` decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OnboardPaths) -> Result<(), OnboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            OnboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            OnboardError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
