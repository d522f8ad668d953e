//! Exception/error type extraction.

use super::lines::split_lines;
use regex::Regex;
use std::sync::LazyLock;

/// An identifier ending in Error, Exception or Warning, anywhere in a line
static ERROR_TYPE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Z][a-zA-Z]*(?:Error|Exception|Warning))").ok()
});

/// An error type followed by `:`, `(`, whitespace or the end of the line
static SIGNATURE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Z][a-zA-Z]*(?:Error|Exception|Warning))(?:\s*:|\(|$|\s)").ok()
});

/// Returns true if the line names an error type
pub fn is_error_line(line: &str) -> bool {
    ERROR_TYPE_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(line))
}

/// Extracts the dominant exception/error type from normalized text
///
/// The first line is checked first, then the remaining lines in order. The
/// matched token is returned exactly as written, so `userwarning` stays
/// lowercase.
///
/// # Examples
///
/// ```
/// use error_scout::normalize::extract_signature;
///
/// assert_eq!(
///     extract_signature("KeyError: 'missing'").as_deref(),
///     Some("KeyError")
/// );
/// assert_eq!(extract_signature("all good"), None);
/// ```
#[must_use]
pub fn extract_signature(normalized: &str) -> Option<String> {
    if normalized.is_empty() {
        return None;
    }

    let pattern = SIGNATURE_PATTERN.as_ref()?;

    for (idx, line) in split_lines(normalized).into_iter().enumerate() {
        if let Some(captures) = pattern.captures(line) {
            let signature = captures.get(1)?.as_str().to_owned();
            tracing::debug!("Extracted error signature from line {}: {}", idx + 1, signature);
            return Some(signature);
        }
    }

    tracing::debug!("No error signature found");
    None
}
