//! YAML extraction from raw LLM output
//!
//! The task prompt forbids code blocks, but smaller models wrap their
//! answer in markdown fences anyway. Strip one fenced block if present;
//! everything else is left to the document validator to classify.

/// Return the YAML payload of the response, unwrapping a markdown fence
pub fn extract_yaml(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after
            .strip_prefix("yaml")
            .or_else(|| after.strip_prefix("yml"))
            .unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }

    trimmed
}
