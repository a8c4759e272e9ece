use std::path::{Path, PathBuf};

use crate::error::{Result, SketchError};

pub const MAIN_FILE_EXTENSION: &str = "ino";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sketch {
    pub name: String,
    pub path: PathBuf,
}

impl Sketch {
    /// Loads the sketch rooted at `path`, which must hold `<name>.ino`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SketchError::SketchNotFound(path.to_path_buf()));
        }
        let sketch = Self::at(path);
        let main_file = sketch.main_file();
        if !main_file.is_file() {
            return Err(SketchError::MainFileMissing(main_file));
        }
        Ok(sketch)
    }

    pub(crate) fn at(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path: path.to_path_buf(),
        }
    }

    pub fn main_file(&self) -> PathBuf {
        self.path
            .join(format!("{}.{}", self.name, MAIN_FILE_EXTENSION))
    }
}
