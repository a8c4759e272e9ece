use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// Launches the configured editor on `path` without waiting for it.
///
/// A bare program name is spawned directly. A command line with arguments
/// is tried as a macOS application name first, then run through `sh`.
pub(crate) fn open_in_editor(command: &str, path: &Path) -> io::Result<()> {
    let command = command.trim();
    if command.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "editor command is empty",
        ));
    }
    debug!(command, path = %path.display(), "opening sketch in editor");

    if !command.chars().any(char::is_whitespace) {
        detached(Command::new(command).arg(path)).spawn()?;
        return Ok(());
    }

    if open_app_with_path(command, path)? {
        return Ok(());
    }

    let line = format!("{command} {}", shell_escape(&path.to_string_lossy()));
    detached(Command::new("sh").args(["-lc", &line])).spawn()?;
    Ok(())
}

fn detached(command: &mut Command) -> &mut Command {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
}

#[cfg(target_os = "macos")]
fn open_app_with_path(app: &str, path: &Path) -> io::Result<bool> {
    let status = detached(Command::new("open").arg("-a").arg(app).arg(path)).status()?;
    Ok(status.success())
}

#[cfg(not(target_os = "macos"))]
fn open_app_with_path(_app: &str, _path: &Path) -> io::Result<bool> {
    Ok(false)
}

fn shell_escape(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    let is_safe = value.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '@' | '=')
    });
    if is_safe {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}
