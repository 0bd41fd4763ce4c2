//! Error types for richdoc library.
//!
//! Rendering never fails; these errors only come from loading documents
//! and from writers that serialize output.

use std::io;
use thiserror::Error;

/// Result type alias for richdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No writer is registered for the requested format.
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// The input could not be interpreted as a document.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error while writing rendered output.
    #[error("Rendering error: {0}")]
    Render(String),
}
