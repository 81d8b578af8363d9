//! Error types for exif-from-filename

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for exif-from-filename operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for exif-from-filename
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a JPEG file: {path}")]
    NotJpeg { path: PathBuf },

    #[error("Failed to decode image {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Failed to write EXIF data for {path}: {message}")]
    ExifWrite { path: PathBuf, message: String },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid verbosity level: {0}")]
    InvalidVerbosity(String),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
