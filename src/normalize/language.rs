//! Heuristic source-language detection
//!
//! Detection is a case-insensitive substring match against fixed keyword
//! buckets checked in a fixed order. The Python bucket is the broadest and is
//! checked first, so text mixing Python and other markers is reported as
//! Python. Generic tokens such as `"import "` make this biased towards Python
//! on non-Python text; the order is kept as-is so results stay reproducible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source language guessed from error text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Java,
    /// C and C++
    C,
}

/// Buckets are evaluated in this order; the first hit wins
const DETECTION_ORDER: [Language; 4] = [
    Language::Python,
    Language::JavaScript,
    Language::Java,
    Language::C,
];

const PYTHON_KEYWORDS: &[&str] = &[
    "traceback",
    "python",
    "nameerror",
    "attributeerror",
    "indentationerror",
    "importerror",
    "valueerror",
    "typeerror",
    "keyerror",
    "indexerror",
    "syntaxerror",
    "runtimeerror",
    "ioerror",
    "oserror",
    "filenotfounderror",
    "permissionerror",
    "zerodivisionerror",
    "assertionerror",
    "modulenotfounderror",
    "cannot import",
    "from . import",
    "import ",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "uncaught",
    "undefined is not a function",
    "cannot read property",
];

const JAVA_KEYWORDS: &[&str] = &["exception in thread", "java.lang", "at java."];

const C_KEYWORDS: &[&str] = &["segmentation fault", "core dumped", "undefined reference"];

impl Language {
    /// Returns the lowercase tag used in tool output and as a search tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Java => "java",
            Self::C => "c",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Python => PYTHON_KEYWORDS,
            Self::JavaScript => JAVASCRIPT_KEYWORDS,
            Self::Java => JAVA_KEYWORDS,
            Self::C => C_KEYWORDS,
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords().iter().any(|keyword| lowered.contains(keyword))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detects the source language of normalized error text
#[must_use]
pub fn detect_language(normalized: &str) -> Option<Language> {
    if normalized.is_empty() {
        return None;
    }

    let lowered = normalized.to_lowercase();
    let detected = DETECTION_ORDER
        .into_iter()
        .find(|language| language.matches(&lowered));

    match detected {
        Some(language) => tracing::debug!("Detected language: {}", language),
        None => tracing::debug!("No language detected"),
    }

    detected
}
