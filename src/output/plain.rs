//! Human-readable rendering

use crate::stackoverflow::AggregatedResult;
use crate::tools::NormalizeErrorOutput;
use scraper::Html;

/// Converts an HTML answer body into plain text
///
/// Text nodes are kept in document order; runs of blank lines collapse into a
/// single blank line.
///
/// # Example
///
/// ```
/// use error_scout::output::answer_plain_text;
///
/// let text = answer_plain_text("<p>Use <code>int()</code>.</p>\n\n\n<p>Done</p>");
/// assert_eq!(text, "Use int().\n\nDone");
/// ```
pub fn answer_plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();

    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        let blank = line.trim().is_empty();
        if blank && lines.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        lines.push(if blank { "" } else { line });
    }

    lines.join("\n").trim().to_string()
}

/// Renders a normalization result
pub fn render_normalized(output: &NormalizeErrorOutput) -> String {
    let mut rendered = String::new();
    rendered.push_str(&format!(
        "Signature: {}\n",
        output.error_signature.as_deref().unwrap_or("(none)")
    ));
    rendered.push_str(&format!(
        "Language:  {}\n\n",
        output.detected_language.as_deref().unwrap_or("(unknown)")
    ));
    rendered.push_str(&format!("{}\n", output.normalized_error));
    rendered
}

/// Renders an aggregated search result
pub fn render_aggregated(result: &AggregatedResult) -> String {
    let mut rendered = String::new();
    rendered.push_str(&format!("{}\n\n", result.short_explanation));

    if let Some(api_error) = &result.api_error {
        rendered.push_str(&format!("⚠ {}\n", api_error));
        return rendered;
    }

    if result.results.is_empty() {
        rendered.push_str("No matching questions found.\n");
        return rendered;
    }

    for (idx, hit) in result.results.iter().enumerate() {
        let marker = if hit.has_accepted_answer { "✓" } else { " " };
        rendered.push_str(&format!(
            "{}. [{}] {} (score {})\n",
            idx + 1,
            marker,
            hit.title,
            hit.score
        ));
        rendered.push_str(&format!("   {}\n", hit.link));
        if let Some(created) = &hit.creation_date {
            rendered.push_str(&format!("   asked {}\n", created));
        }

        match &hit.answer_text {
            Some(body) => {
                let label = if hit.answer_is_accepted {
                    "Accepted answer"
                } else {
                    "Top answer"
                };
                rendered.push_str(&format!("   {}:\n", label));
                for line in answer_plain_text(body).lines() {
                    rendered.push_str(&format!("   | {}\n", line));
                }
            }
            None => rendered.push_str("   (no answer text available)\n"),
        }
        rendered.push('\n');
    }

    rendered
}
