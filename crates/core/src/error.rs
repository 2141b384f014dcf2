//! Error types for citeloc operations.
//!
//! The locating algorithms themselves never fail: a heading that is not there
//! is offset `0`, a field value that is not there is a `None` span. This module
//! covers the collaborators around them (fetching pages, reading files,
//! rendering Markdown, decoding citation records), which all report through
//! [`CitelocError`].
//!
//! # Example
//!
//! ```rust
//! use citeloc_core::{CitelocError, Result};
//!
//! fn require_source(html: &str) -> Result<&str> {
//!     if html.is_empty() {
//!         return Err(CitelocError::RenderError("empty document".to_string()));
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching, reading and decoding operations.
#[derive(Error, Debug)]
pub enum CitelocError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues and non-success
    /// responses.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// HTML could not be rendered as Markdown.
    #[error("Failed to render Markdown: {0}")]
    RenderError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A citation record is missing a required field or is malformed.
    #[error("Invalid citation record: {0}")]
    InvalidRecord(String),

    /// JSON encoding or decoding errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CitelocError.
pub type Result<T> = std::result::Result<T, CitelocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CitelocError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = CitelocError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_invalid_record_error() {
        let err = CitelocError::InvalidRecord("missing url".to_string());
        assert_eq!(err.to_string(), "Invalid citation record: missing url");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CitelocError = io.into();
        assert!(matches!(err, CitelocError::Io(_)));
    }
}
