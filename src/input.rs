use std::{
    error::Error,
    fmt,
    path::{Path, PathBuf},
};

/// Why an input path was refused before any work was done.
#[derive(Debug, PartialEq)]
pub enum InputError {
    MissingPath,
    NotAFile(PathBuf),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::MissingPath => {
                write!(f, "Error: No path to sales data CSV file provided.")
            }
            InputError::NotAFile(_) => {
                write!(f, "Error: The provided path does not exist or is not a file.")
            }
        }
    }
}

impl Error for InputError {}

/// Checks that `path` was given, is non-empty, and names an existing
/// regular file (following symlinks).
///
/// # Errors
///
/// Returns [`InputError::MissingPath`] for an absent or empty path, and
/// [`InputError::NotAFile`] when nothing regular exists at `path`.
pub fn validate_input(path: Option<&Path>) -> Result<&Path, InputError> {
    let path = match path {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Err(InputError::MissingPath),
    };
    if !path.is_file() {
        return Err(InputError::NotAFile(path.to_path_buf()));
    }
    Ok(path)
}
