/*!
 * Error types for the subtrans application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// File-level errors that abort a single file's translation run.
///
/// Per-batch translation failures are never represented here: they are
/// recovered internally by substituting the original text.
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The input file could not be opened or read
    #[error("unreachable subtitle file {path:?}: {reason}")]
    UnreadableFile {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying I/O failure
        reason: String,
    },

    /// The file carries the translated marker or a language-suffixed name
    #[error("file appears to be already translated: {0:?}")]
    AlreadyTranslated(PathBuf),

    /// The file contained zero lines
    #[error("empty subtitle file: {0:?}")]
    EmptyFile(PathBuf),

    /// The styled-dialogue column format could not be found or guessed
    #[error("could not find or guess the dialogue column format of {0:?}; this might not be a styled subtitle file")]
    UnrecognizedFormat(PathBuf),

    /// The detected source language equals the destination language
    #[error("file is already written in the destination language '{0}'")]
    SameLanguage(String),

    /// The derived output path already exists
    #[error("output file already exists: {0:?}")]
    OutputExists(PathBuf),

    /// The file extension maps to no supported subtitle format
    #[error("unsupported subtitle extension '{0}'")]
    UnsupportedExtension(String),

    /// A filesystem operation outside of reading the source failed
    #[error("file operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from a translation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
