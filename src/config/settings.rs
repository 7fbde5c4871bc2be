//! User settings for the expense tracker
//!
//! Holds the backend location and key, display preferences and whether the
//! biometric prompt gates sign-in. Backend values can be overridden from the
//! environment so a CI job or a shell profile can point at another project.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::remote::BackendConfig;
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Environment variable overriding the backend URL
pub const BACKEND_URL_ENV: &str = "EXPENSE_TRACKER_URL";
/// Environment variable overriding the backend API key
pub const API_KEY_ENV: &str = "EXPENSE_TRACKER_API_KEY";

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Project URL, e.g. `https://abc.example.co`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public (anon) API key sent as the `apikey` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Backend connection
    #[serde(default)]
    pub backend: BackendSettings,

    /// Currency prefix for amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Require the device biometric prompt after password sign-in
    #[serde(default)]
    pub biometric_enabled: bool,

    /// Rows shown by `expense list` when no limit is given
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_list_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: BackendSettings::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            biometric_enabled: false,
            list_limit: default_list_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            read_json_required(&settings_path).map_err(|e| {
                TrackerError::Config(format!("Failed to load settings file: {}", e))
            })
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Resolve the backend connection, letting the environment win
    pub fn backend_config(&self) -> Result<BackendConfig, TrackerError> {
        self.backend_config_with(|key| std::env::var(key).ok())
    }

    /// Resolve the backend connection with a custom environment lookup
    pub fn backend_config_with<F>(&self, lookup: F) -> Result<BackendConfig, TrackerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |env_key: &str, stored: &Option<String>| {
            lookup(env_key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| stored.clone())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = pick(BACKEND_URL_ENV, &self.backend.url).ok_or_else(|| {
            TrackerError::Config(format!(
                "Backend URL is not set. Run 'expenses config set-backend' or set {}",
                BACKEND_URL_ENV
            ))
        })?;
        let api_key = pick(API_KEY_ENV, &self.backend.api_key).ok_or_else(|| {
            TrackerError::Config(format!(
                "Backend API key is not set. Run 'expenses config set-backend' or set {}",
                API_KEY_ENV
            ))
        })?;

        Ok(BackendConfig {
            base_url: url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs: self.backend.request_timeout_secs,
        })
    }
}
