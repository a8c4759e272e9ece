use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SketchError};

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sketchbook_dir: Option<String>,
    pub cloud_dir: Option<String>,
    pub temp_dir: Option<String>,
    pub editor: Option<String>,
    pub mark_recent: Option<bool>,
}

impl Config {
    pub fn editor_command(&self) -> Option<&str> {
        self.editor
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn mark_recent_enabled(&self) -> bool {
        self.mark_recent.unwrap_or(false)
    }
}

/// Reads the config at `path`; a missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => return Err(err.into()),
    };
    parse_config(&contents).map_err(|message| SketchError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(contents: &str) -> std::result::Result<Config, String> {
    toml::from_str(contents).map_err(|err| err.to_string().trim().to_string())
}

/// Expands `~` and `~/...` against the home directory.
pub(crate) fn expand_home(value: &str) -> Result<Option<PathBuf>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if value == "~" || value.starts_with("~/") {
        let home = dirs::home_dir().ok_or(SketchError::HomeDirMissing)?;
        let suffix = value.strip_prefix("~/").unwrap_or("");
        return Ok(Some(home.join(suffix)));
    }

    Ok(Some(PathBuf::from(value)))
}
