// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::series::SeriesEndpoint;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "series.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_ENV_VAR: &str = "SUMPPI_CONFIG";

/// A series entry in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeriesEntry {
    pub guid: String,
    /// `s3://bucket/key` the feed is published to
    pub s3_path: String,
}

/// Contents of `series.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Series API URL template with a `{guid}` placeholder
    #[serde(default)]
    pub endpoint: Option<String>,
    /// AWS region for uploads; the environment decides when unset
    #[serde(default)]
    pub region: Option<String>,
    /// Directory for locally generated feeds
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub series: Vec<SeriesEntry>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Path of the config file, honouring `SUMPPI_CONFIG`
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load the config from [`Config::config_path`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&Self::config_path())
    }

    /// Load and check a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        if config.series.is_empty() {
            return Err(ConfigError::NoSeries(path.to_path_buf()));
        }

        Ok(config)
    }

    /// Series API endpoint, falling back to the built-in one
    pub fn endpoint(&self) -> SeriesEndpoint {
        self.endpoint
            .as_deref()
            .map(SeriesEndpoint::new)
            .unwrap_or_default()
    }
}
