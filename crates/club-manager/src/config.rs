//! Configuration file loading for the club manager.
//!
//! Settings come from `club.toml` in the current directory unless another
//! path is given on the command line. Every field has a default, so a
//! missing file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Where club and tournament data lives on disk.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ClubConfig {
    /// Directory holding one JSON file per club.
    /// Defaults to "data/clubs".
    #[serde(default = "default_clubs_dir")]
    pub clubs_dir: PathBuf,
    /// Directory holding the in-progress and completed tournament files.
    /// Defaults to "data/tournaments".
    #[serde(default = "default_tournaments_dir")]
    pub tournaments_dir: PathBuf,
}

fn default_clubs_dir() -> PathBuf {
    PathBuf::from("data/clubs")
}

fn default_tournaments_dir() -> PathBuf {
    PathBuf::from("data/tournaments")
}

impl Default for ClubConfig {
    fn default() -> Self {
        ClubConfig {
            clubs_dir: default_clubs_dir(),
            tournaments_dir: default_tournaments_dir(),
        }
    }
}

impl ClubConfig {
    /// Loads the configuration from `path`, or from [`Self::default_path()`]
    /// when no path is given.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map_or_else(Self::default_path, Path::to_path_buf);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns `club.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("club.toml")
    }
}
