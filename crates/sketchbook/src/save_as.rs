use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::buffers::{save_onto_copied_sketch, UnsavedBuffer};
use crate::error::Result;
use crate::model::Sketch;
use crate::names::{
    now_suffix_time, to_valid_cloud_sketch_folder_name, to_valid_sketch_folder_name,
};
use crate::paths::Locations;
use crate::recent::mark_as_recently_opened;
use crate::sketches::{copy_sketch, delete_sketch, is_cloud, is_temp, is_within};
use crate::validate::{InvalidName, NamePolicy};

/// User interaction needed while saving a sketch under a new name.
pub trait Prompter {
    /// Asks where to save the sketch folder, proposing `default_path`.
    /// `None` cancels.
    fn save_destination(&mut self, default_path: &Path) -> Option<PathBuf>;

    /// Asks for the new name of a cloud sketch. `None` cancels.
    fn cloud_name(&mut self, default_name: &str) -> Option<String>;

    /// Reports a rejected folder name and asks whether to try another one.
    fn confirm_retry(&mut self, folder_name: &str, reason: InvalidName) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveAsOptions {
    /// Only act when the sketch is temporary.
    pub exec_only_if_temp: bool,
    pub open_after_move: bool,
    /// Ignored unless `open_after_move` is set.
    pub wipe_original: bool,
    pub mark_as_recently_opened: bool,
}

impl Default for SaveAsOptions {
    fn default() -> Self {
        Self {
            exec_only_if_temp: false,
            open_after_move: true,
            wipe_original: false,
            mark_as_recently_opened: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAsOutcome {
    /// The sketch is not temporary and `exec_only_if_temp` was set.
    Skipped,
    Cancelled,
    Saved {
        sketch: Sketch,
        reopen: bool,
        deleted_original: bool,
        restored: Vec<PathBuf>,
    },
}

enum Destination {
    Chosen(PathBuf, NamePolicy),
    Cancelled,
    Skipped,
}

/// Saves the sketch at `sketch_path` under a new name chosen through
/// `prompter`, carrying `buffers` onto the copy.
pub fn save_as(
    sketch_path: &Path,
    options: SaveAsOptions,
    buffers: &[UnsavedBuffer],
    locations: &Locations,
    prompter: &mut dyn Prompter,
) -> Result<SaveAsOutcome> {
    let sketch = Sketch::load(sketch_path)?;

    let destination = if is_cloud(&sketch, locations) {
        cloud_destination(&sketch, locations, prompter)
    } else {
        local_destination(&sketch, options, locations, prompter)
    };
    let (destination, policy) = match destination {
        Destination::Chosen(path, policy) => (path, policy),
        Destination::Cancelled => return Ok(SaveAsOutcome::Cancelled),
        Destination::Skipped => return Ok(SaveAsOutcome::Skipped),
    };

    let copied = copy_sketch(&sketch, &destination, policy)?;
    let restored = save_onto_copied_sketch(&sketch, &copied, buffers);

    if options.mark_as_recently_opened {
        if let Err(err) = mark_as_recently_opened(locations, &copied.path) {
            warn!(
                sketch = %copied.path.display(),
                error = %err,
                "failed to mark as recently opened"
            );
        }
    }

    let mut deleted_original = false;
    if options.open_after_move && (options.wipe_original || options.exec_only_if_temp) {
        delete_sketch(&sketch)?;
        deleted_original = true;
    }

    info!(sketch = %copied.path.display(), deleted_original, "saved sketch as");
    Ok(SaveAsOutcome::Saved {
        sketch: copied,
        reopen: options.open_after_move,
        deleted_original,
        restored,
    })
}

fn local_destination(
    sketch: &Sketch,
    options: SaveAsOptions,
    locations: &Locations,
    prompter: &mut dyn Prompter,
) -> Destination {
    let temp = is_temp(sketch, locations);
    if !temp && options.exec_only_if_temp {
        return Destination::Skipped;
    }

    // Temp sketches and sketches outside the sketchbook are proposed in the
    // sketchbook; the rest next to the original.
    let container = match sketch.path.parent() {
        Some(parent) if !temp && is_within(&sketch.path, &locations.sketchbook) => {
            parent.to_path_buf()
        }
        _ => locations.sketchbook.clone(),
    };
    let exists = container.join(&sketch.name).exists();
    let mut proposal = container.join(to_valid_sketch_folder_name(&sketch.name, exists, None));
    debug!(proposal = %proposal.display(), temp, exists, "proposing destination");

    loop {
        let Some(chosen) = prompter.save_destination(&proposal) else {
            return Destination::Cancelled;
        };
        let name = folder_name(&chosen);
        match NamePolicy::Local.validate(&name) {
            Ok(()) => return Destination::Chosen(chosen, NamePolicy::Local),
            Err(reason) => {
                debug!(name = %name, %reason, "rejected sketch folder name");
                if !prompter.confirm_retry(&name, reason) {
                    return Destination::Cancelled;
                }
                proposal = chosen;
            }
        }
    }
}

fn cloud_destination(
    sketch: &Sketch,
    locations: &Locations,
    prompter: &mut dyn Prompter,
) -> Destination {
    let exists = locations.cloud.join(&sketch.name).exists();
    let mut proposal =
        to_valid_cloud_sketch_folder_name(&sketch.name, exists.then(now_suffix_time));

    loop {
        let Some(name) = prompter.cloud_name(&proposal) else {
            return Destination::Cancelled;
        };
        let destination = locations.cloud.join(&name);
        let checked = NamePolicy::Cloud.validate(&name).and_then(|()| {
            if destination.exists() {
                Err(InvalidName::AlreadyExists)
            } else {
                Ok(())
            }
        });
        match checked {
            Ok(()) => return Destination::Chosen(destination, NamePolicy::Cloud),
            Err(reason) => {
                if !prompter.confirm_retry(&name, reason) {
                    return Destination::Cancelled;
                }
                proposal = name;
            }
        }
    }
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
