// Configuration: where the task file lives

use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default store file, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "task-cli.json";

/// Environment variable overriding the store file
pub const STORE_FILE_ENV: &str = "TASK_CLI_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
}

/// Optional YAML config file contents
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl Config {
    /// `<config dir>/task-cli/config.yaml`, if the platform has a config dir
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("task-cli").join("config.yaml"))
    }

    /// Resolve from the process environment and the user config file
    pub fn load(flag: Option<PathBuf>) -> Result<Self> {
        let env = std::env::var_os(STORE_FILE_ENV).map(PathBuf::from);
        Self::resolve(flag, env, Self::default_file().as_deref())
    }

    /// Precedence: flag, then environment, then config file, then default
    pub fn resolve(flag: Option<PathBuf>, env: Option<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        if let Some(store_path) = flag {
            debug!(?store_path, "Store path from --file");
            return Ok(Self { store_path });
        }

        if let Some(store_path) = env.filter(|p| !p.as_os_str().is_empty()) {
            debug!(?store_path, "Store path from {}", STORE_FILE_ENV);
            return Ok(Self { store_path });
        }

        if let Some(path) = config_file.filter(|p| p.exists()) {
            let file = Self::read_file(path)?;
            if let Some(store_path) = file.store_path {
                debug!(?store_path, config = ?path, "Store path from config file");
                return Ok(Self { store_path });
            }
        }

        Ok(Self::default())
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let raw = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        if raw.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))
    }
}
