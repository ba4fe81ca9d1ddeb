//! Configuration - optional YAML file plus defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::APP_DIR;
use crate::error::{PhotonError, Result};

const CONFIG_FILE: &str = "config.yaml";
const DATA_DIR_ENV: &str = "PHOTON_DATA_DIR";

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where persisted state lives
    pub data_dir: PathBuf,
    /// Log file name inside `data_dir`
    pub log_file: String,
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: app_dir(),
            log_file: String::from("photon.log"),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Load `~/.photon/config.yaml` if present, then apply the environment override
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&app_dir().join(CONFIG_FILE))?;
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| PhotonError::Config(e.to_string()))?;
        config.log_level()?;
        Ok(config)
    }

    /// Parsed log level
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| PhotonError::Config(format!("unknown log level `{}`", self.log_level)))
    }
}

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
