//! Error types for Quarry operations.
//!
//! This module defines the main error type [`QuarryError`] which represents
//! every failure that can occur while validating a request, fetching a page,
//! reading a local document, or serializing an outcome.
//!
//! Note that [`Engine::run_extraction`](crate::Engine::run_extraction) never
//! returns these errors directly: they are folded into the error message of
//! the returned [`Outcome`](crate::Outcome) so the caller can record every
//! attempt.
//!
//! # Example
//!
//! ```rust
//! use quarry_core::{ExtractionMode, QuarryError};
//!
//! match "pdf".parse::<ExtractionMode>() {
//!     Ok(mode) => println!("mode: {mode}"),
//!     Err(QuarryError::InvalidMode(raw)) => println!("unknown mode {raw}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetch and extraction operations.
#[derive(Error, Debug)]
pub enum QuarryError {
    /// HTTP transport errors from reqwest.
    ///
    /// This variant wraps DNS failures, refused connections, TLS failures
    /// and other problems where no usable response was obtained.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when a request or a deadline-bounded invocation exceeds
    /// its time budget.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or its scheme is not http/https.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Extraction mode outside the supported vocabulary.
    #[error("Invalid extraction mode: {0}")]
    InvalidMode(String),

    /// The page answered with a status other than 200.
    #[error("HTTP {status}: Unable to fetch the webpage")]
    NonSuccessStatus { status: u16 },

    /// The preliminary HEAD request answered with a status other than 200.
    #[error("Website returned status code {status}")]
    PreflightRejected { status: u16 },

    /// HTML parsing errors.
    ///
    /// Returned for invalid CSS selectors. Malformed markup itself never
    /// produces this error.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading local input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Outcome serialization errors.
    #[error("Failed to serialize outcome: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for QuarryError.
///
/// This is a convenience alias for `std::result::Result<T, QuarryError>`.
pub type Result<T> = std::result::Result<T, QuarryError>;
