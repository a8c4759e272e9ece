use std::path::PathBuf;

use thiserror::Error;

use crate::validate::InvalidName;

#[derive(Debug, Error)]
pub enum SketchError {
    #[error("home directory not found")]
    HomeDirMissing,
    #[error("sketch not found: {0}")]
    SketchNotFound(PathBuf),
    #[error("sketch main file missing: {0}")]
    MainFileMissing(PathBuf),
    #[error("invalid sketch folder name '{name}': {reason}")]
    InvalidFolderName { name: String, reason: InvalidName },
    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),
    #[error("destination is inside the sketch: {0}")]
    DestinationInsideSketch(PathBuf),
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("invalid recent sketches file {path}: {message}")]
    RecentSketches { path: PathBuf, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SketchError>;
