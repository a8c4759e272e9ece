use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SketchError};
use crate::model::Sketch;
use crate::paths::Locations;
use crate::validate::NamePolicy;

pub fn is_temp(sketch: &Sketch, locations: &Locations) -> bool {
    is_within(&sketch.path, &locations.temp)
}

pub fn is_cloud(sketch: &Sketch, locations: &Locations) -> bool {
    is_within(&sketch.path, &locations.cloud)
}

/// Copies `sketch` into the new folder `destination`, renaming the main file
/// after the new folder. The destination must not exist yet and its name
/// must satisfy `policy`.
pub fn copy_sketch(sketch: &Sketch, destination: &Path, policy: NamePolicy) -> Result<Sketch> {
    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    policy.validate(&name).map_err(|reason| SketchError::InvalidFolderName {
        name: name.clone(),
        reason,
    })?;
    if destination.exists() {
        return Err(SketchError::DestinationExists(destination.to_path_buf()));
    }
    if is_within(destination, &sketch.path) {
        return Err(SketchError::DestinationInsideSketch(
            destination.to_path_buf(),
        ));
    }

    let copied = Sketch {
        name,
        path: destination.to_path_buf(),
    };
    info!(from = %sketch.path.display(), to = %destination.display(), "copying sketch");
    if let Err(err) = copy_tree(sketch, &copied) {
        if destination.exists() {
            if let Err(cleanup) = fs::remove_dir_all(destination) {
                warn!(
                    path = %destination.display(),
                    error = %cleanup,
                    "failed to remove partial sketch copy"
                );
            }
        }
        return Err(err);
    }
    Ok(copied)
}

pub fn delete_sketch(sketch: &Sketch) -> Result<()> {
    info!(path = %sketch.path.display(), "deleting sketch");
    fs::remove_dir_all(&sketch.path)?;
    Ok(())
}

fn copy_tree(sketch: &Sketch, copied: &Sketch) -> Result<()> {
    let main_file = sketch.main_file();
    for entry in WalkDir::new(&sketch.path) {
        let entry = entry.map_err(io::Error::from)?;
        let source = entry.path();
        let target = if source == main_file {
            copied.main_file()
        } else {
            let relative = source
                .strip_prefix(&sketch.path)
                .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
            copied.path.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            debug!(file = %target.display(), "copying file");
            fs::copy(source, &target)?;
        }
    }
    Ok(())
}

/// True when `path` is strictly inside `root`.
pub(crate) fn is_within(path: &Path, root: &Path) -> bool {
    let path = normalize(path);
    let root = normalize(root);
    path != root && path.starts_with(&root)
}

fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            normalize(parent).join(name)
        }
        _ => path.to_path_buf(),
    }
}
