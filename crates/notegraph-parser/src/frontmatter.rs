//! Frontmatter extraction: ---\nYAML\n---

use notegraph_core::{Error, Frontmatter, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Matches a leading YAML block: --- ... --- (the block itself may be empty)
static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\x{FEFF}?---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)?---[ \t]*(?:\r?\n|$)").unwrap()
});

/// Matches the opening line of a front-matter block
static OPENING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\x{FEFF}?---[ \t]*\r?\n").unwrap());

/// Split content into the raw front-matter block and the body.
///
/// Returns `(None, content)` when the note has no front-matter.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    match FRONTMATTER_PATTERN.captures(content) {
        Some(caps) => {
            let fm = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(fm), &content[end..])
        }
        None => (None, content),
    }
}

/// Parse the front-matter of `content`, returning metadata and body.
///
/// YAML merge keys (`<<`) are expanded. A block that is never closed, is not
/// valid YAML, or whose top level is not a mapping is an error. An empty block
/// yields empty metadata.
pub fn parse_frontmatter<'a>(path: &Path, content: &'a str) -> Result<(Frontmatter, &'a str)> {
    let (raw, body) = split_frontmatter(content);
    let Some(raw) = raw else {
        if OPENING_PATTERN.is_match(content) {
            return Err(Error::frontmatter_error(
                path,
                "front-matter block is never closed",
            ));
        }
        return Ok((Frontmatter::default(), body));
    };
    if raw.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }

    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(raw).map_err(|e| Error::frontmatter_error(path, e.to_string()))?;
    yaml.apply_merge()
        .map_err(|e| Error::frontmatter_error(path, e.to_string()))?;
    let value = serde_json::to_value(yaml)
        .map_err(|e| Error::frontmatter_error(path, e.to_string()))?;

    match value {
        serde_json::Value::Object(map) => Ok((Frontmatter::new(map), body)),
        serde_json::Value::Null => Ok((Frontmatter::default(), body)),
        other => Err(Error::frontmatter_error(
            path,
            format!("expected a mapping, found {}", value_kind(&other)),
        )),
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}
