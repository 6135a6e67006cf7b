use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the application folder below the data directory
const APP_NAME: &str = "tool-version";

/// Tool-version configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub security: SecurityConfig,
    pub repository: RepositoryConfig,
}

/// Vulnerability evaluation configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityConfig {
    /// CVEs with a lower severity are ignored
    pub min_severity: f64,
}

/// Tool repository configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryConfig {
    /// Root folder of the local tool repository
    pub urls_path: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration file, falling back to the defaults if it does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Returns the configured tool repository root or the default one.
    pub fn urls_path(&self) -> PathBuf {
        self.repository
            .urls_path
            .clone()
            .unwrap_or_else(|| data_dir().join("urls"))
    }
}

/// Returns the path to the data directory for tool-version.
/// Uses $XDG_DATA_HOME/tool-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/tool-version,
/// or ./tool-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("tool-version.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}
