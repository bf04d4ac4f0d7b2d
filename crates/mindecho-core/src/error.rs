// ── MindEcho Core: Error Types ─────────────────────────────────────────────
// Single canonical error enum for the core, built with `thiserror`.
//
//   • Variants are coarse-grained by domain (I/O, DB, Media, Input…).
//   • `#[from]` wires std/external conversions so `?` works everywhere.
//   • Scoring functions never fail; only storage and decoding return errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Filesystem or OS-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLite / rusqlite database failure.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Payload could not be decoded into pixels or samples.
    #[error("Media error: {0}")]
    Media(#[from] crate::media::MediaError),

    /// Caller supplied a value outside the accepted domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for errors that do not yet have a dedicated variant.
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<String> for CoreError {
    fn from(s: String) -> Self {
        CoreError::Other(s)
    }
}

impl From<&str> for CoreError {
    fn from(s: &str) -> Self {
        CoreError::Other(s.to_string())
    }
}

/// All fallible core operations return this type.
pub type CoreResult<T> = Result<T, CoreError>;
