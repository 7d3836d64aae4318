use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    /// Settings file does not exist.
    NotFound(PathBuf),
    /// Any other IO failure while reading or writing a settings file.
    Io { path: PathBuf, message: String },
    /// No box with this name.
    UnknownBox(String),
    /// The box exists but has no pair with this name.
    UnknownPair { section: String, pair: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "settings file not found: {}", path.display()),
            Self::Io { path, message } => write!(f, "IO error on {}: {message}", path.display()),
            Self::UnknownBox(name) => write!(f, "unknown box: {name}"),
            Self::UnknownPair { section, pair } => {
                write!(f, "box '{section}' has no pair '{pair}'")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// Classify an IO failure on `path`; a missing file becomes [`StoreError::NotFound`].
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io { path: path.to_path_buf(), message: err.to_string() }
        }
    }
}
