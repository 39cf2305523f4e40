/*!
 * Error types for the yifysub application.
 *
 * Typed errors cover the hard-fault paths only: archive handling and the
 * identifier lookup service. "Nothing found" conditions (no candidates on a
 * listing page, no download anchor on a subtitle page, no OMDb match) are
 * not errors and are modelled as empty results.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while reading or extracting a subtitle archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The named entry does not exist in the archive. This is a caller/data
    /// inconsistency (stale filename), not an expected absence.
    #[error("archive entry not found: {0}")]
    EntryNotFound(String),

    /// The downloaded bytes are not a readable ZIP archive
    #[error("malformed archive: {0}")]
    Malformed(#[from] zip::result::ZipError),

    /// Error writing the extracted file
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the identifier lookup service (OMDb)
#[derive(Error, Debug)]
pub enum LookupError {
    /// Error when making the lookup request fails
    #[error("lookup request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the lookup response fails
    #[error("failed to parse lookup response: {0}")]
    ParseError(String),

    /// Error returned by the lookup service itself
    #[error("lookup service error ({status_code}): {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from archive handling
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Error from the identifier lookup
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
