//! Error types for the batch converter.
//!
//! Provides a hierarchy of error types using `thiserror`. Setup errors
//! (`Validation`) abort a run; everything else is scoped to one file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for run configuration and directories.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Directory path errors.
#[derive(Error, Debug, Serialize)]
pub enum PathError {
    /// Source directory does not exist
    #[error("Source directory not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotDirectory(PathBuf),
    /// IO error accessing the path
    #[error("IO error on {path}: {message}")]
    IO { path: PathBuf, message: String },
}

/// Main error type for the converter.
#[derive(Error, Debug, Serialize)]
pub enum ConvertError {
    /// Directory or settings validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Source could not be decoded as an image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Cover-fit resize failed
    #[error("Resize error: {0}")]
    Resize(String),

    /// WebP encoding failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Another source already maps to the same destination file
    #[error("Destination {destination} is already claimed by {claimed_by}")]
    Collision { destination: String, claimed_by: String },

    /// The blocking worker panicked or was cancelled
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience result type for converter operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// Helper methods for error creation
impl ConvertError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn resize<T: Into<String>>(msg: T) -> Self {
        Self::Resize(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }

    /// Returns `true` for errors that abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotDirectory(path.into()))
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

impl PathError {
    pub fn io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::IO {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

// Convert std::io::Error to ConvertError
impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to ConvertError
impl From<PathError> for ConvertError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}
