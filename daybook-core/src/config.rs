//! User configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::calendar_file::BUFFER_CHUNK;
use crate::error::ConfigError;

fn default_read_buffer_size() -> usize {
    BUFFER_CHUNK
}

/// Configuration at ~/.config/daybook/config.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DaybookConfig {
    /// Calendar file used when none is given on the command line.
    #[serde(default)]
    pub calendar_file: Option<PathBuf>,

    /// Initial size of the line buffer used while loading.
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            calendar_file: None,
            read_buffer_size: BUFFER_CHUNK,
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the config from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The configured calendar file with `~` and environment variables
    /// expanded.
    pub fn calendar_file(&self) -> Option<PathBuf> {
        self.calendar_file.as_ref().map(|path| {
            let raw = path.to_string_lossy();
            match shellexpand::full(&raw) {
                Ok(expanded) => PathBuf::from(expanded.as_ref()),
                Err(_) => path.clone(),
            }
        })
    }
}
