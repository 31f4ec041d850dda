//! # Configuration Module
//!
//! Data directory setup and runtime settings for Tuneshelf.
//!
//! ## Data Storage
//!
//! The SQLite library written by `tuneshelf import` lives in the
//! platform-standard data directory:
//! - Linux: `~/.local/share/tuneshelf/library.db`
//! - macOS: `~/Library/Application Support/tuneshelf/library.db`
//! - Windows: `%APPDATA%\tuneshelf\library.db`
//!
//! ## Config File
//!
//! Optional JSON at `<config dir>/tuneshelf/config.json`. Every key may be
//! left out:
//!
//! ```json
//! {
//!   "catalog_path": "/home/me/Music/songs.json",
//!   "top_n": 5,
//!   "player": { "program": "mpv", "args": ["--no-video", "--really-quiet"] }
//! }
//! ```
//!
//! Command-line flags and `TUNESHELF_*` environment variables override it.

use crate::error::CoreError;
use crate::recommend::DEFAULT_TOP_N;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Catalog read when nothing else is configured, relative to the working
/// directory.
pub const DEFAULT_CATALOG: &str = "songs.json";

const APP_DIR: &str = "tuneshelf";

/// Returns the platform-appropriate data directory for Tuneshelf,
/// creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The tuneshelf subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let app_dir = data_dir.join(APP_DIR);
    fs::create_dir_all(&app_dir).with_context(|| {
        format!(
            "Failed to create Tuneshelf data directory at {}. Please check file permissions.",
            app_dir.display()
        )
    })?;

    Ok(app_dir)
}

/// Path of the default SQLite library, `<data dir>/tuneshelf/library.db`.
///
/// # Errors
///
/// See [`get_data_dir`].
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("library.db"))
}

/// Path of the config file. The file and its directory may not exist.
///
/// # Errors
///
/// The system config directory cannot be determined.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!("Could not determine system config directory.")
    })?;
    Ok(config_dir.join(APP_DIR).join("config.json"))
}

/// External program used for playback. The track path is appended as the
/// last argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            program: "ffplay".to_string(),
            args: ["-nodisp", "-autoexit", "-loglevel", "quiet"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// JSON catalog or SQLite library to browse.
    pub catalog_path: PathBuf,
    /// Recommendations returned per request.
    pub top_n: usize,
    pub player: PlayerConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            top_n: DEFAULT_TOP_N,
            player: PlayerConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Read `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// The file exists but cannot be read or is not valid config JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file {}", path.display()))
            }
        };

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Config file {} is not valid JSON", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Read the config file at its platform location.
    ///
    /// # Errors
    ///
    /// See [`RuntimeConfig::load`].
    pub fn load_default() -> Result<Self> {
        Self::load(&get_config_path()?)
    }

    /// Create configuration with an explicit catalog path
    pub fn with_catalog_path(self, catalog_path: PathBuf) -> Self {
        Self {
            catalog_path,
            ..self
        }
    }

    /// `top_n`, rejected when zero.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidArgument`] for a zero `top_n`.
    pub fn checked_top_n(&self) -> Result<usize, CoreError> {
        if self.top_n == 0 {
            return Err(CoreError::InvalidArgument(
                "top_n in config must be a positive number".to_string(),
            ));
        }
        Ok(self.top_n)
    }
}
