//! Error normalization pipeline
//!
//! This module turns raw error text into a stable, comparable form:
//! - Line-oriented cleanup of tracebacks, paths, line numbers and timestamps
//! - Extraction of the dominant exception/error type (the signature)
//! - A heuristic guess at the source language
//!
//! Every function here is pure and total: any input, including the empty
//! string, yields a value.

mod language;
mod lines;
mod sanitizer;
mod signature;

pub use language::{detect_language, Language};
pub use lines::split_lines;
pub use sanitizer::sanitize;
pub use signature::{extract_signature, is_error_line};

use serde::Serialize;

/// Result of normalizing a raw error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedError {
    /// Cleaned error text
    pub text: String,

    /// Dominant exception/error type, as written in the text
    pub signature: Option<String>,

    /// Best-guess source language
    pub language: Option<Language>,
}

impl NormalizedError {
    /// Returns true if nothing survived sanitization
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Normalizes a raw error string
///
/// Sanitizes the text, then extracts the signature and detects the language
/// from the sanitized form.
///
/// # Examples
///
/// ```
/// use error_scout::normalize::{normalize, Language};
///
/// let raw = "Traceback (most recent call last):\n  File \"/app/main.py\", line 3, in <module>\nKeyError: 'user'";
/// let normalized = normalize(raw);
/// assert_eq!(normalized.text, "KeyError: 'user'");
/// assert_eq!(normalized.signature.as_deref(), Some("KeyError"));
/// assert_eq!(normalized.language, Some(Language::Python));
/// ```
pub fn normalize(raw: &str) -> NormalizedError {
    let text = sanitize(raw);
    let signature = extract_signature(&text);
    let language = detect_language(&text);

    tracing::info!(
        "Normalization complete - signature: {:?}, language: {:?}, length: {}",
        signature,
        language,
        text.len()
    );

    NormalizedError {
        text,
        signature,
        language,
    }
}
