//! Line-oriented cleanup of raw error text.
//!
//! Each physical line is either dropped outright (traceback headers, source
//! file references, blank lines) or stripped of machine-specific fragments
//! such as absolute paths, line numbers and timestamps. Once every line has
//! been cleaned, the surviving lines are narrowed to error-typed lines if
//! any exist.

use super::lines::split_lines;
use super::signature::is_error_line;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex patterns for sanitization.
struct SanitizerPatterns {
    /// Matches `Traceback (most recent call last):` headers
    traceback_header: Regex,
    /// Matches source file reference lines: `  File "app.py", line 3` or `File <stdin>`
    file_reference: Regex,
    /// Matches lines made of whitespace only
    whitespace_only: Regex,
    /// In-line fragments removed from kept lines, applied in order
    strip: Vec<Regex>,
    /// Matches runs of whitespace
    whitespace_run: Regex,
    /// Matches three or more consecutive newlines
    blank_run: Regex,
}

fn build_patterns() -> Option<SanitizerPatterns> {
    let strip = vec![
        // Windows paths: C:\Users\dev\app.py
        Regex::new(r"[A-Za-z]:\\\S+").ok()?,
        // Unix paths: /usr/lib/x, ~/project/x, ./relative/x
        Regex::new(r"(?:^|\s)(?:~|\.)?/\S+").ok()?,
        // Line numbers: `line 42`, `Line: 42`
        Regex::new(r"(?i)\bline\s*:?\s*\d+\b").ok()?,
        // ISO 8601 style timestamps: `2024-01-15 10:30:00.123+02:00`
        Regex::new(r"\d{4}-\d{2}-\d{2}[\sT]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?")
            .ok()?,
        // Source file with line number: `app.js:42`
        Regex::new(r"\S+\.(?:py|js|ts|java|cpp|c|h|go|rs|rb|php|tsx|jsx):\d+").ok()?,
        // Local noise
        Regex::new(r#"(?i)File\s+"[^"]+""#).ok()?,
        Regex::new(r"(?i)File\s+<[^>]+>").ok()?,
        Regex::new(r"(?i)in\s+<module>").ok()?,
    ];

    Some(SanitizerPatterns {
        traceback_header: Regex::new(r"(?i)^Traceback\s*\(most recent call last\):").ok()?,
        file_reference: Regex::new(r#"(?i)^\s*File\s+["<]"#).ok()?,
        whitespace_only: Regex::new(r"^\s+$").ok()?,
        strip,
        whitespace_run: Regex::new(r"\s+").ok()?,
        blank_run: Regex::new(r"\n{3,}").ok()?,
    })
}

static PATTERNS: LazyLock<Option<SanitizerPatterns>> = LazyLock::new(build_patterns);

/// Lines this short or shorter after cleanup carry no information
const MIN_LINE_CHARS: usize = 2;

/// Sanitizes a raw error string.
///
/// # Steps
///
/// 1. Drop traceback headers, `File "..."` reference lines and whitespace-only lines
/// 2. Strip paths, `line N` references, timestamps, `file.ext:N` tokens and local noise
/// 3. Collapse whitespace, trim, and drop lines of two characters or fewer
/// 4. If any surviving line names an error type, keep only those lines
/// 5. Join with newlines and trim
///
/// Never fails; empty input yields an empty string.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        tracing::debug!("Empty raw error string provided");
        return String::new();
    }

    let Some(patterns) = PATTERNS.as_ref() else {
        return raw.trim().to_owned();
    };

    let lines = split_lines(raw);
    let total_lines = lines.len();
    let candidates: Vec<String> = lines
        .into_iter()
        .filter_map(|line| clean_line(patterns, line))
        .collect();
    let kept = retain_error_lines(candidates);

    let joined = kept.join("\n");
    let sanitized = patterns.blank_run.replace_all(&joined, "\n\n").trim().to_owned();

    tracing::debug!(
        "Sanitized {} lines down to {} ({} characters)",
        total_lines,
        kept.len(),
        sanitized.len()
    );

    sanitized
}

/// Cleans a single line, returning None if the line should be dropped
fn clean_line(patterns: &SanitizerPatterns, line: &str) -> Option<String> {
    if patterns.traceback_header.is_match(line) {
        tracing::trace!("Skipping traceback header line");
        return None;
    }
    if patterns.file_reference.is_match(line) {
        tracing::trace!("Skipping file reference line: {}", preview(line, 50));
        return None;
    }
    if patterns.whitespace_only.is_match(line) {
        return None;
    }

    // Removing one fragment can expose another, so strip until stable
    let mut collapsed = line.to_owned();
    loop {
        let stripped = patterns
            .strip
            .iter()
            .fold(collapsed.clone(), |acc, pattern| {
                pattern.replace_all(&acc, "").into_owned()
            });
        let next = patterns
            .whitespace_run
            .replace_all(&stripped, " ")
            .trim()
            .to_owned();
        if next == collapsed {
            break;
        }
        collapsed = next;
    }

    if collapsed.chars().count() <= MIN_LINE_CHARS {
        return None;
    }

    tracing::trace!("Keeping line: {}", preview(&collapsed, 100));
    Some(collapsed)
}

/// Keeps only error-typed lines when at least one exists
fn retain_error_lines(lines: Vec<String>) -> Vec<String> {
    if lines.iter().any(|line| is_error_line(line)) {
        lines.into_iter().filter(|line| is_error_line(line)).collect()
    } else {
        lines
    }
}

/// Truncates text for log output
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}
