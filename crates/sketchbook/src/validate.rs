use thiserror::Error;

pub const MAX_SKETCH_FOLDER_NAME_LEN: usize = 63;
pub const MAX_CLOUD_SKETCH_FOLDER_NAME_LEN: usize = 36;

/// Why a folder name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidName {
    #[error("Sketch folder name required")]
    Empty,
    #[error("Sketch folder name cannot contain spaces")]
    ContainsSpace,
    #[error("Sketch folder name cannot be longer than {max} characters")]
    TooLong { max: usize },
    #[error("Sketch folder name must start with a letter or number")]
    InvalidStart,
    #[error("Sketch folder name can only use letters, numbers, '-', '_', or '.'")]
    InvalidChar,
    #[error("Cloud sketch folder name can only use letters, numbers, or '_'")]
    InvalidCloudChar,
    #[error("A sketch folder with this name already exists")]
    AlreadyExists,
}

/// Which naming rules a sketch folder must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePolicy {
    Local,
    Cloud,
}

impl NamePolicy {
    pub fn validate(self, name: &str) -> Result<(), InvalidName> {
        match self {
            NamePolicy::Local => validate_sketch_folder_name(name),
            NamePolicy::Cloud => validate_cloud_sketch_folder_name(name),
        }
    }
}

pub fn validate_sketch_folder_name(name: &str) -> Result<(), InvalidName> {
    check_common(name, MAX_SKETCH_FOLDER_NAME_LEN)?;
    if !name.chars().next().is_some_and(is_first_char) {
        return Err(InvalidName::InvalidStart);
    }
    if name.chars().any(|ch| !is_sketch_char(ch)) {
        return Err(InvalidName::InvalidChar);
    }
    Ok(())
}

pub fn validate_cloud_sketch_folder_name(name: &str) -> Result<(), InvalidName> {
    check_common(name, MAX_CLOUD_SKETCH_FOLDER_NAME_LEN)?;
    if name.chars().any(|ch| !is_cloud_char(ch)) {
        return Err(InvalidName::InvalidCloudChar);
    }
    Ok(())
}

fn check_common(name: &str, max: usize) -> Result<(), InvalidName> {
    if name.is_empty() {
        return Err(InvalidName::Empty);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(InvalidName::ContainsSpace);
    }
    if name.chars().count() > max {
        return Err(InvalidName::TooLong { max });
    }
    Ok(())
}

pub(crate) fn is_first_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

pub(crate) fn is_sketch_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.'
}

pub(crate) fn is_cloud_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
