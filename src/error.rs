//! Error types for the minard library.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the library. Every fatal condition is a local
//! precondition violation; nothing here is retried.

use thiserror::Error;

/// The main error type for minard operations.
#[derive(Error, Debug)]
pub enum MinardError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing errors from the entity table
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON errors from configuration overlays
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entity table errors (missing column, unparsable cell)
    #[error("Table error: {message}")]
    Table { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Malformed color strings
    #[error("Invalid color '{color}': {message}")]
    InvalidColor { color: String, message: String },

    /// Unrecognized contour direction letters
    #[error("Invalid contour: {message}")]
    InvalidContour { message: String },

    /// Legend configuration errors
    #[error("Legend error: {message}")]
    Legend { message: String },

    /// Document overlay compositing errors
    #[error("Overlay error: {message}")]
    Overlay { message: String },

    /// Display sink errors
    #[error("Display error: {message}")]
    Display { message: String },
}

/// Convenience type alias for Results with MinardError
pub type Result<T> = std::result::Result<T, MinardError>;
