//! Error types for Hamus operations.
//!
//! This module defines the main error type [`HamusError`] which represents
//! all possible errors that can occur while fetching pages, parsing HTML,
//! and loading or evaluating classifier artifacts.
//!
//! Feature extraction itself never returns these errors: every external
//! lookup degrades to a documented sentinel value instead (see the
//! `features` module). The variants here cover the fallible edges around
//! extraction: fetching on behalf of a caller, model loading, and I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for URL scoring operations.
///
/// # Example
///
/// ```rust
/// use hamus_core::{HamusError, classifier::DenseModel};
///
/// match DenseModel::from_file("missing.json") {
///     Ok(model) => println!("loaded {} layers", model.layer_count()),
///     Err(HamusError::ModelLoad { .. }) => println!("artifact unreadable"),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum HamusError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Classifier artifact could not be read or deserialized.
    #[error("Failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// Classifier artifact is internally inconsistent or does not match
    /// the supplied feature vector.
    ///
    /// Returned when a layer's weight matrix disagrees with its bias
    /// length, or when the input width differs from the first layer.
    #[error("Model shape mismatch: expected {expected} inputs, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// File I/O errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for HamusError.
///
/// This is a convenience alias for `std::result::Result<T, HamusError>`.
pub type Result<T> = std::result::Result<T, HamusError>;
