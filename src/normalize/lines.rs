//! Line splitting shared by the normalization steps.
//!
//! Terminal and progress output often separates lines with a bare carriage
//! return, and some tools emit vertical tabs, form feeds or Unicode line
//! separators. All of these count as line boundaries here; `\r\n` counts once.

use regex::Regex;
use std::sync::LazyLock;

/// Every line boundary recognized in error text
static LINE_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C\x1D\x1E\x{85}\x{2028}\x{2029}]").ok()
});

/// Splits text into lines on any recognized line boundary
///
/// A trailing boundary does not produce a final empty line, and empty input
/// yields no lines.
///
/// # Examples
///
/// ```
/// use error_scout::normalize::split_lines;
///
/// assert_eq!(split_lines("a\rb\r\nc\n"), vec!["a", "b", "c"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    let Some(pattern) = LINE_BREAK.as_ref() else {
        return text.lines().collect();
    };

    let mut lines: Vec<&str> = pattern.split(text).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}
