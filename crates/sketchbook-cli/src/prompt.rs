use std::io::{BufRead, Write};
use std::path::{Component, Path, PathBuf};

use sketchbook::{InvalidName, Prompter};

/// Answers every prompt with a destination given up front. A rejected
/// name is remembered instead of retried.
pub(crate) struct FixedPrompter {
    destination: Option<PathBuf>,
    rejected: Option<(String, InvalidName)>,
}

impl FixedPrompter {
    pub(crate) fn new(destination: PathBuf) -> Self {
        Self {
            destination: Some(destination),
            rejected: None,
        }
    }

    pub(crate) fn rejected(&self) -> Option<(&str, InvalidName)> {
        self.rejected
            .as_ref()
            .map(|(name, reason)| (name.as_str(), *reason))
    }
}

impl Prompter for FixedPrompter {
    fn save_destination(&mut self, _default_path: &Path) -> Option<PathBuf> {
        self.destination.take()
    }

    fn cloud_name(&mut self, _default_name: &str) -> Option<String> {
        self.destination
            .take()
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
    }

    fn confirm_retry(&mut self, folder_name: &str, reason: InvalidName) -> bool {
        self.rejected = Some((folder_name.to_string(), reason));
        false
    }
}

/// Line-based prompts. An empty answer accepts the proposal; end of input
/// cancels.
pub(crate) struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{question}").ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn save_destination(&mut self, default_path: &Path) -> Option<PathBuf> {
        let answer = self.ask(&format!(
            "Save sketch folder as [{}]: ",
            default_path.display()
        ))?;
        if answer.is_empty() {
            return Some(default_path.to_path_buf());
        }

        let answer = PathBuf::from(answer);
        let bare_name = matches!(
            answer.components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        );
        match default_path.parent() {
            Some(parent) if bare_name => Some(parent.join(answer)),
            _ => Some(answer),
        }
    }

    fn cloud_name(&mut self, default_name: &str) -> Option<String> {
        let answer = self.ask(&format!("Cloud sketch name [{default_name}]: "))?;
        if answer.is_empty() {
            Some(default_name.to_string())
        } else {
            Some(answer)
        }
    }

    fn confirm_retry(&mut self, folder_name: &str, reason: InvalidName) -> bool {
        let question = format!(
            "Invalid sketch folder name: '{folder_name}'\n\n{reason}\n\n\
             Do you want to try to save the sketch folder with a different name? [y/N]: "
        );
        self.ask(&question).is_some_and(|answer| {
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        })
    }
}
