//! Wikilink label extraction: `[[Note]]`, `[[folder/Note]]`, `[[Note|Alias]]`

use regex::Regex;
use std::sync::LazyLock;

/// Matches [[...]] pattern
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Extract the raw label of every wikilink in `content`.
///
/// Labels are returned in document order with duplicates preserved; aliases
/// (`|Display`) and subpaths (`#Heading`) are left in place for the resolver.
/// Embeds (`![[image.png]]`) are links too.
pub fn extract_labels(content: &str) -> Vec<String> {
    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
