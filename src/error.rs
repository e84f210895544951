//! Error types for rayconfig library.

use std::io;
use thiserror::Error;

/// Result type alias for rayconfig operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding configs and exporting notes.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The passphrase is wrong or the export is corrupted.
    ///
    /// Padding, block length and gzip validation all collapse into this
    /// variant so a bad password is never reported as garbage output.
    #[error("Invalid decryption password")]
    InvalidPassword,

    /// Encrypted input was given without a password.
    #[error("A password is required to decrypt this config")]
    PasswordRequired,

    /// The decrypted payload or an embedded document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An embedded note document is not valid base64.
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The configuration carries no notes collection.
    #[error("No notes found in the config")]
    NotesNotFound,

    /// A note record is missing a required field.
    #[error("Malformed note: {0}")]
    MalformedNote(String),

    /// A note timestamp could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Error during Markdown rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::InvalidTimestamp(err.to_string())
    }
}
