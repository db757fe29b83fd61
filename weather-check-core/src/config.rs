use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};
use tracing::debug;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_CITY: &str = "Warsaw";

pub const TEMPERATURE_CONVERSION_TOLERANCE: f64 = 0.5;
pub const COORDINATE_TOLERANCE: f64 = 0.01;
pub const CONSISTENCY_TOLERANCE: f64 = 1.5;
pub const MAX_RESPONSE_SECS: f64 = 5.0;
pub const MIN_FORECAST_ENTRIES: usize = 30;

/// Comparison thresholds used by the scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Kelvin vs. metric/imperial readings of the same location.
    pub temperature_conversion: f64,
    /// Requested vs. returned coordinates, per axis, in degrees.
    pub coordinates: f64,
    /// Current weather vs. first forecast slot.
    pub consistency: f64,
    pub max_response_secs: f64,
    pub min_forecast_entries: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            temperature_conversion: TEMPERATURE_CONVERSION_TOLERANCE,
            coordinates: COORDINATE_TOLERANCE,
            consistency: CONSISTENCY_TOLERANCE,
            max_response_secs: MAX_RESPONSE_SECS,
            min_forecast_entries: MIN_FORECAST_ENTRIES,
        }
    }
}

impl Tolerances {
    pub fn max_response_time(&self) -> Duration {
        Duration::from_secs_f64(self.max_response_secs)
    }
}

/// Suite configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Warsaw"
///
/// [tolerances]
/// consistency = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Stored credential; `API_KEY` in the environment wins over it.
    pub api_key: Option<String>,
    /// Directory holding `schemas/` and `data/`; the copies built into
    /// the binary are used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<PathBuf>,
    pub default_city: String,
    pub tolerances: Tolerances,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            api_key: None,
            resources_dir: None,
            default_city: DEFAULT_CITY.to_string(),
            tolerances: Tolerances::default(),
        }
    }
}

impl SuiteConfig {
    /// Load config from disk (or defaults), then apply `.env` and the
    /// process environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;

        dotenv::dotenv().ok();
        cfg.apply_env_api_key(std::env::var(API_KEY_ENV).ok());

        Ok(cfg)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: SuiteConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-check", "weather-check")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-blank environment value replaces the stored key.
    pub fn apply_env_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Returns the API key, treating a blank value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SuiteConfig::default();
        assert_eq!(cfg.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.default_city, "Warsaw");
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.resources_dir, None);
        assert_eq!(cfg.tolerances.min_forecast_entries, 30);
        assert_eq!(cfg.tolerances.max_response_time(), Duration::from_secs(5));
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let mut cfg = SuiteConfig::default();
        cfg.set_api_key("STORED".into());

        cfg.apply_env_api_key(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut cfg = SuiteConfig::default();
        cfg.set_api_key("STORED".into());

        cfg.apply_env_api_key(Some("   ".into()));
        assert_eq!(cfg.api_key(), Some("STORED"));

        cfg.apply_env_api_key(None);
        assert_eq!(cfg.api_key(), Some("STORED"));
    }

    #[test]
    fn blank_stored_key_counts_as_absent() {
        let mut cfg = SuiteConfig::default();
        cfg.set_api_key(String::new());
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = SuiteConfig::load_from(&dir.path().join("nope.toml")).expect("defaults");
        assert_eq!(cfg, SuiteConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = SuiteConfig::default();
        cfg.set_api_key("KEY".into());
        cfg.tolerances.consistency = 2.5;
        cfg.save_to(&path).expect("save");

        let loaded = SuiteConfig::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \"Oslo\"\n[tolerances]\ncoordinates = 0.05\n").expect("write");

        let cfg = SuiteConfig::load_from(&path).expect("load");
        assert_eq!(cfg.default_city, "Oslo");
        assert_eq!(cfg.tolerances.coordinates, 0.05);
        assert_eq!(cfg.tolerances.consistency, CONSISTENCY_TOLERANCE);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn resources_dir_override_is_read_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "resources_dir = \"/srv/weather-check\"\n").expect("write");

        let cfg = SuiteConfig::load_from(&path).expect("load");
        assert_eq!(cfg.resources_dir, Some(PathBuf::from("/srv/weather-check")));
    }

    #[test]
    fn broken_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").expect("write");

        let err = SuiteConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
