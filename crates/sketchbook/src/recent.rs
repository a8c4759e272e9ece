use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SketchError};
use crate::paths::Locations;

pub const MAX_RECENT_SKETCHES: usize = 10;

/// Recently opened sketch paths, most recent first.
pub fn recent_sketches(locations: &Locations) -> Result<Vec<PathBuf>> {
    let path = locations.recent_sketches_path();
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&contents).map_err(|err| SketchError::RecentSketches {
        path,
        message: err.to_string(),
    })
}

pub fn mark_as_recently_opened(locations: &Locations, sketch_path: &Path) -> Result<()> {
    let mut recent = recent_sketches(locations)?;
    recent.retain(|existing| existing != sketch_path);
    recent.insert(0, sketch_path.to_path_buf());
    recent.truncate(MAX_RECENT_SKETCHES);

    let path = locations.recent_sketches_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(&recent).map_err(|err| {
        SketchError::RecentSketches {
            path: path.clone(),
            message: err.to_string(),
        }
    })?;
    fs::write(&path, contents)?;
    debug!(sketch = %sketch_path.display(), "marked as recently opened");
    Ok(())
}
