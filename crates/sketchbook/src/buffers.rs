use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::model::Sketch;

/// An editor buffer whose contents differ from the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsavedBuffer {
    pub path: PathBuf,
    pub contents: String,
}

impl UnsavedBuffer {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Writes the unsaved buffers of `original` onto the matching files of
/// `copied`. The original main file maps onto the renamed main file of the
/// copy. Buffers outside the original sketch are skipped, and a buffer that
/// fails to write does not stop the rest. Returns the written paths.
pub fn save_onto_copied_sketch(
    original: &Sketch,
    copied: &Sketch,
    buffers: &[UnsavedBuffer],
) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for buffer in buffers {
        let Some(target) = target_path(original, copied, &buffer.path) else {
            debug!(path = %buffer.path.display(), "buffer is outside the sketch");
            continue;
        };

        match write_buffer(&target, &buffer.contents) {
            Ok(()) => written.push(target),
            Err(err) => {
                warn!(path = %target.display(), error = %err, "failed to save buffer onto copy");
            }
        }
    }
    written
}

fn target_path(original: &Sketch, copied: &Sketch, path: &Path) -> Option<PathBuf> {
    if path == original.main_file() {
        return Some(copied.main_file());
    }

    let relative = path.strip_prefix(&original.path).ok()?;
    let escapes = relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if relative.as_os_str().is_empty() || escapes {
        return None;
    }
    Some(copied.path.join(relative))
}

fn write_buffer(target: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, contents)
}

#[cfg(test)]
mod tests {
    use super::{save_onto_copied_sketch, UnsavedBuffer};
    use crate::model::Sketch;
    use std::fs;

    fn sketch(root: &std::path::Path, name: &str) -> Sketch {
        let path = root.join(name);
        fs::create_dir_all(&path).expect("create sketch dir");
        fs::write(path.join(format!("{name}.ino")), "saved").expect("write main");
        Sketch::load(&path).expect("load sketch")
    }

    #[test]
    fn main_file_buffer_follows_rename() {
        let dir = tempfile::tempdir().expect("tempdir");
        let original = sketch(dir.path(), "blink");
        let copied = sketch(dir.path(), "blink_copy");

        let written = save_onto_copied_sketch(
            &original,
            &copied,
            &[UnsavedBuffer::new(original.main_file(), "edited")],
        );

        assert_eq!(written, vec![copied.main_file()]);
        assert_eq!(fs::read_to_string(copied.main_file()).expect("read"), "edited");
        assert_eq!(fs::read_to_string(original.main_file()).expect("read"), "saved");
    }

    #[test]
    fn nested_buffers_keep_relative_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let original = sketch(dir.path(), "blink");
        let copied = sketch(dir.path(), "other");

        let written = save_onto_copied_sketch(
            &original,
            &copied,
            &[UnsavedBuffer::new(
                original.path.join("src").join("util.h"),
                "#define X 1",
            )],
        );

        let expected = copied.path.join("src").join("util.h");
        assert_eq!(written, vec![expected.clone()]);
        assert_eq!(fs::read_to_string(expected).expect("read"), "#define X 1");
    }

    #[test]
    fn buffers_outside_sketch_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let original = sketch(dir.path(), "blink");
        let copied = sketch(dir.path(), "other");

        let written = save_onto_copied_sketch(
            &original,
            &copied,
            &[
                UnsavedBuffer::new(dir.path().join("notes.txt"), "x"),
                UnsavedBuffer::new(original.path.join("..").join("escape.txt"), "x"),
            ],
        );

        assert!(written.is_empty());
        assert!(!dir.path().join("escape.txt").exists());
    }
}
