use std::env;
use std::path::PathBuf;

use crate::config::{expand_home, load_config_from, Config};
use crate::error::{Result, SketchError};

pub const SKETCHBOOK_DIR_ENV: &str = "SKETCHBOOK_DIR";
pub const CLOUD_DIR_ENV: &str = "SKETCHBOOK_CLOUD_DIR";
pub const TEMP_DIR_ENV: &str = "SKETCHBOOK_TEMP_DIR";
pub const CONFIG_DIR_ENV: &str = "SKETCHBOOK_CONFIG_DIR";

/// Where sketches live: the user's sketchbook, the temporary area for
/// unsaved sketches, and the local mirror of cloud sketches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub sketchbook: PathBuf,
    pub temp: PathBuf,
    pub cloud: PathBuf,
    pub config: PathBuf,
}

impl Locations {
    /// Resolves every root from the environment, then `config.toml`, then
    /// the built-in defaults.
    pub fn resolve() -> Result<Self> {
        let config_dir = config_root()?;
        let config = load_config_from(&config_dir.join("config.toml"))?;
        Self::from_config(config_dir, &config)
    }

    pub fn from_config(config_dir: PathBuf, config: &Config) -> Result<Self> {
        let sketchbook =
            match dir_override(SKETCHBOOK_DIR_ENV, config.sketchbook_dir.as_deref())? {
                Some(dir) => dir,
                None => home_dir()?.join("Sketchbook"),
            };
        let cloud = dir_override(CLOUD_DIR_ENV, config.cloud_dir.as_deref())?
            .unwrap_or_else(|| config_dir.join("cloud"));
        let temp = dir_override(TEMP_DIR_ENV, config.temp_dir.as_deref())?
            .unwrap_or_else(|| env::temp_dir().join("sketchbook-tmp"));

        Ok(Self {
            sketchbook,
            temp,
            cloud,
            config: config_dir,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.config.join("config.toml")
    }

    pub fn recent_sketches_path(&self) -> PathBuf {
        self.config.join("recent_sketches.json")
    }
}

pub fn config_root() -> Result<PathBuf> {
    if let Some(root) = env_dir(CONFIG_DIR_ENV) {
        return Ok(root);
    }
    Ok(home_dir()?.join(".sketchbook"))
}

fn dir_override(var: &str, configured: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(dir) = env_dir(var) {
        return Ok(Some(dir));
    }
    match configured {
        Some(value) => expand_home(value),
        None => Ok(None),
    }
}

fn env_dir(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(SketchError::HomeDirMissing)
}
