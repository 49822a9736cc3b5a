//! Flattening of nested locale JSON into dot-separated keys.

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::KeyInDocument;

/// Flatten a locale file's JSON content into `(keypath, value)` pairs in
/// file order. Non-string leaves are rendered with their JSON form.
pub fn flatten_content(content: &str) -> Result<Vec<(String, String)>> {
    let json: Value = serde_json::from_str(content).context("Failed to parse locale JSON")?;
    if !json.is_object() {
        bail!("Root of a locale file must be an object");
    }

    let mut entries = Vec::new();
    flatten_value(&json, String::new(), &mut entries);
    Ok(entries)
}

fn flatten_value(value: &Value, prefix: String, entries: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(child, path, entries);
            }
        }
        Value::String(s) => entries.push((prefix, s.clone())),
        other => entries.push((prefix, other.to_string())),
    }
}

/// Annotate the leaf keys of a locale file with their byte spans.
///
/// Each returned entry spans exactly the leaf key name inside its quotes,
/// with `key` fully qualified by `namespace` when given. Positions are
/// found by searching each path segment in sequence and validating that
/// the hit is a JSON key (followed by a colon), so duplicate leaf names
/// across namespaces resolve to the right occurrence.
pub fn annotation_keys(content: &str, namespace: Option<&str>) -> Vec<KeyInDocument> {
    let Ok(entries) = flatten_content(content) else {
        return Vec::new();
    };

    let mut keys = Vec::new();

    for (keypath, _) in entries {
        if let Some((start, end)) = find_key_span(content, &keypath) {
            let key = match namespace {
                Some(ns) => format!("{}.{}", ns, keypath),
                None => keypath,
            };
            keys.push(KeyInDocument {
                key,
                start,
                end,
                quoted: true,
            });
        }
    }

    keys
}

/// Byte span of the leaf key name of `keypath` within `content`.
///
/// Walks the path segments in order, each time searching forward from the
/// previous hit, and accepts a hit only when the quoted text is followed
/// by optional whitespace and a colon.
fn find_key_span(content: &str, keypath: &str) -> Option<(usize, usize)> {
    let mut search_start = 0;
    let mut span = None;

    for part in keypath.split('.') {
        let pattern = format!("\"{}\"", part);
        let mut pos = search_start;
        let mut found = false;

        while let Some(rel) = content[pos..].find(&pattern) {
            let abs = pos + rel;
            let after = abs + pattern.len();

            if content[after..].trim_start().starts_with(':') {
                span = Some((abs + 1, abs + 1 + part.len()));
                search_start = after;
                found = true;
                break;
            }
            pos = after;
        }

        if !found {
            return None;
        }
    }

    span
}
