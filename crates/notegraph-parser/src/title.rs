//! Title derivation: front-matter `title`, first H1, then file name.

use notegraph_core::Frontmatter;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Matches an HTML <h1> element inside a raw HTML block
static HTML_H1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1(?:\s[^>]*)?>(.*?)</h1\s*>").unwrap());

static HTML_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Derive the display title of a note.
///
/// Precedence: `title` metadata field, first level-1 heading of the body,
/// file name of `source_file`.
pub fn derive_title(metadata: &Frontmatter, body: &str, source_file: &Path) -> String {
    if let Some(title) = metadata.get_text("title") {
        return title;
    }

    if let Some(heading) = first_h1(body) {
        return heading;
    }

    source_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Text of the first level-1 heading in rendered Markdown.
///
/// Both CommonMark headings (`# Title`, setext `Title\n===`) and raw HTML
/// `<h1>` blocks count. Headings with no text are skipped.
pub fn first_h1(body: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut heading = String::new();
    let mut in_html = false;
    let mut html = String::new();

    for event in Parser::new_ext(body, Options::empty()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                in_h1 = true;
                heading.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                in_h1 = false;
                let text = heading.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
            Event::Text(text) | Event::Code(text) if in_h1 => heading.push_str(&text),
            Event::SoftBreak | Event::HardBreak if in_h1 => heading.push(' '),

            Event::Start(Tag::HtmlBlock) => {
                in_html = true;
                html.clear();
            }
            Event::Html(chunk) if in_html => html.push_str(&chunk),
            Event::End(TagEnd::HtmlBlock) => {
                in_html = false;
                if let Some(text) = html_h1(&html) {
                    return Some(text);
                }
            }
            _ => {}
        }
    }

    None
}

fn html_h1(html: &str) -> Option<String> {
    let inner = HTML_H1_PATTERN.captures(html)?.get(1)?.as_str();
    let text = HTML_TAG_PATTERN.replace_all(inner, "");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: serde_json::Value) -> Frontmatter {
        match value {
            serde_json::Value::Object(map) => Frontmatter::new(map),
            _ => Frontmatter::default(),
        }
    }

    #[test]
    fn test_title_from_metadata_wins() {
        let title = derive_title(
            &meta(json!({"title": "From Metadata"})),
            "# From Heading",
            Path::new("/vault/note.md"),
        );
        assert_eq!(title, "From Metadata");
    }

    #[test]
    fn test_title_from_first_h1() {
        let body = "Intro\n\n## Section\n\n# Main Title\n\n# Second";
        let title = derive_title(&Frontmatter::default(), body, Path::new("/vault/note.md"));
        assert_eq!(title, "Main Title");
    }

    #[test]
    fn test_title_from_setext_heading() {
        assert_eq!(first_h1("Setext Title\n===\n"), Some("Setext Title".to_string()));
    }

    #[test]
    fn test_title_with_inline_markup() {
        assert_eq!(
            first_h1("# The `graph` *engine*"),
            Some("The graph engine".to_string())
        );
    }

    #[test]
    fn test_title_from_html_h1() {
        let body = "<h1 class=\"big\">Html <b>Title</b></h1>\n\nText";
        assert_eq!(first_h1(body), Some("Html Title".to_string()));
    }

    #[test]
    fn test_heading_in_code_block_ignored() {
        let body = "```\n# not a heading\n```\n";
        assert_eq!(first_h1(body), None);
    }

    #[test]
    fn test_title_falls_back_to_file_name() {
        let title = derive_title(
            &Frontmatter::default(),
            "no headings here",
            Path::new("/vault/folder/My Note.md"),
        );
        assert_eq!(title, "My Note.md");
    }

    #[test]
    fn test_numeric_title_metadata() {
        let title = derive_title(&meta(json!({"title": 1984})), "", Path::new("x.md"));
        assert_eq!(title, "1984");
    }
}
