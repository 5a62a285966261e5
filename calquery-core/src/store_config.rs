//! Location of the calendar store.
//!
//! calquery reads the same `~/.config/caldir/config.toml` that caldir writes,
//! so a store moved with `calendar_dir` is found without extra setup.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CalQueryError, CalQueryResult};

static DEFAULT_CALDIR_PATH: &str = "~/calendar";

/// Environment variables prefixed with this override file settings,
/// e.g. `CALQUERY_CALENDAR_DIR`.
static ENV_PREFIX: &str = "CALQUERY";

fn default_caldir_path() -> PathBuf {
    PathBuf::from(DEFAULT_CALDIR_PATH)
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_caldir_path")]
    pub calendar_dir: PathBuf,
}

impl StoreConfig {
    pub fn config_path() -> CalQueryResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalQueryError::Config("Could not determine config directory".into()))?
            .join("caldir");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config file and process environment.
    pub fn load() -> CalQueryResult<Self> {
        Self::load_from(&Self::config_path()?, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from `path` (optional on disk), then apply `env` on top.
    pub fn load_from(path: &Path, env: Environment) -> CalQueryResult<Self> {
        tracing::debug!(path = %path.display(), "loading store config");

        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalQueryError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalQueryError::Config(e.to_string()))
    }

    /// Store root with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }
}
