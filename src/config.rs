use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WxError;
use crate::owm::BASE_URL;
use crate::units::temperature::Scale;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "citywx.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// OpenWeatherMap API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub base_url: String,

    pub timeout_secs: u64,

    pub scale: Scale,

    /// Last city that produced a weather card; pre-fills the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_city: Option<String>,

    /// Fallback filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            timeout_secs: 10,
            scale: Scale::default(),
            last_city: None,
            log_level: "warn".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "citywx")
}

/// `config.toml` under the platform config directory.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Where the TUI writes its log, since stderr belongs to the screen.
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, WxError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), WxError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Apply `OPENWEATHER_API_KEY` and then an explicit command line key.
    pub fn with_overrides(mut self, env_key: Option<String>, cli_key: Option<String>) -> Self {
        for key in [env_key, cli_key].into_iter().flatten() {
            if !key.trim().is_empty() {
                self.api_key = Some(key.trim().to_string());
            }
        }
        self
    }

    pub fn api_key(&self) -> Result<&str, WxError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WxError::config(format!(
                    "No API key configured. Set {API_KEY_ENV}, pass --api-key, or add api_key to the config file."
                ))
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.scale, Scale::Fahrenheit);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            api_key: Some("abc123".to_string()),
            last_city: Some("Miami".to_string()),
            scale: Scale::Celsius,
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "scale = \"celsius\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.scale, Scale::Celsius);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "scale = 12").unwrap();
        assert!(matches!(Config::load(&path), Err(WxError::TomlParse(_))));
    }

    #[test]
    fn test_key_precedence() {
        let file = Config {
            api_key: Some("from-file".to_string()),
            ..Config::default()
        };
        let config = file.clone().with_overrides(Some("from-env".to_string()), None);
        assert_eq!(config.api_key().unwrap(), "from-env");

        let config = file
            .clone()
            .with_overrides(Some("from-env".to_string()), Some("from-cli".to_string()));
        assert_eq!(config.api_key().unwrap(), "from-cli");

        let config = file.with_overrides(Some("  ".to_string()), None);
        assert_eq!(config.api_key().unwrap(), "from-file");
    }

    #[test]
    fn test_missing_key() {
        let err = Config::default().api_key().unwrap_err();
        assert!(matches!(err, WxError::Config(_)));
        assert!(err.user_message().contains(API_KEY_ENV));
    }
}
