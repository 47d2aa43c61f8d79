//! Error types for seoscope operations.
//!
//! [`SeoscopeError`] covers everything that can go wrong while fetching,
//! extracting, scoring and rendering. The analysis pipeline never lets these
//! escape to callers of [`crate::Analyzer`]; they are folded into
//! [`AnalysisFailure`] and finally into a degraded [`crate::AnalysisResult`].
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::{SeoscopeError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(SeoscopeError::NoContent);
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::report::AnalysisResult;

/// Main error type for seoscope operations.
#[derive(Error, Debug)]
pub enum SeoscopeError {
    /// HTTP request errors from reqwest.
    ///
    /// Network errors, DNS failures and connection resets end up here.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Form or command-line input that cannot be analysed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No content candidate reached the minimum score.
    #[error("Content is not readable (score {score} below threshold {threshold})")]
    NotReadable { score: f64, threshold: f64 },

    /// No content could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// PDF generation failed.
    #[error("Failed to render report: {0}")]
    RenderError(String),

    /// JSON serialization failed.
    #[error("Failed to serialize result: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result type alias for SeoscopeError.
pub type Result<T> = std::result::Result<T, SeoscopeError>;

/// Why the analysis pipeline stopped early.
///
/// `Fetch` failures are surfaced to the user as a fixed message. `Parse`
/// failures carry whatever was extracted before the page turned out to have
/// no readable text; the boundary returns that partial result unchanged.
#[derive(Debug)]
pub enum AnalysisFailure {
    /// The page could not be retrieved.
    Fetch(SeoscopeError),
    /// The page was retrieved but yielded no text to score.
    Parse { partial: Box<AnalysisResult>, reason: SeoscopeError },
}

impl AnalysisFailure {
    /// Underlying error for logging.
    pub fn reason(&self) -> &SeoscopeError {
        match self {
            AnalysisFailure::Fetch(err) => err,
            AnalysisFailure::Parse { reason, .. } => reason,
        }
    }
}
