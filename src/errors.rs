use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing package.json: {} does not exist", .0.display())]
    MissingManifest(PathBuf),

    #[error("Failed to parse {}: {name}: {message}", .path.display())]
    ManifestParseError {
        path: PathBuf,
        name: String,
        message: String,
    },

    #[error("IO Error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        PackError::IoError(err.to_string())
    }
}

/// Why a copy target was left out of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    NoBaseName,
    UnknownType,
    CopyFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Missing => write!(f, "does not exist"),
            SkipReason::NoBaseName => write!(f, "has no base name"),
            SkipReason::UnknownType => write!(f, "is neither a file nor a directory"),
            SkipReason::CopyFailed(message) => write!(f, "could not be copied: {}", message),
        }
    }
}
