//! Result aggregation: the `find_keys` entry point and its helpers.
//!
//! One detection pass runs the usage patterns over the document, resolves
//! each raw match against the scope list, applies the rewrite policy, and
//! collects deduplicated, position-sorted `KeyInDocument` results.

use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::core::cache::DocumentCache;
use crate::core::dictionary::Dictionary;
use crate::core::pattern::{RawMatch, find_usages};
use crate::core::resolve::resolve_namespace;
use crate::core::rewrite::{RewriteKeyContext, RewriteKeySource, rewrite_key};
use crate::core::scope::{ScopeExtractor, ScopeRange};
use crate::core::EngineOptions;

/// Quote characters recognized when deciding whether a key literal was
/// wrapped in quotes.
pub const QUOTE_SYMBOLS: &[u8] = b"'\"`";

/// A detected key usage, the durable output of one detection pass.
///
/// `start`/`end` delimit exactly the key-literal substring (excluding the
/// quote characters) as byte offsets into the document. No two entries in
/// one result set share the same `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInDocument {
    /// Final key, fully qualified where resolution applies.
    pub key: String,
    pub start: usize,
    pub end: usize,
    /// Whether the literal was found wrapped in a quote character.
    pub quoted: bool,
}

/// What kind of file a usage report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    Code,
    Locale,
}

/// Key usages of a single file, for the editor/UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct KeyUsages {
    #[serde(rename = "type")]
    pub kind: UsageKind,
    pub keys: Vec<KeyInDocument>,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Find all key usages in `text`, resolved and sorted by position.
///
/// Patterns are evaluated in order; when two patterns match at the same
/// start offset the first one wins. `dot_ending` is forced on when path
/// parsing is disabled (completion-assist mode): then only keys ending in
/// a separator are accepted, while in normal mode only keys *not* ending
/// in a separator are.
pub fn find_keys(
    text: &str,
    patterns: &[Regex],
    dot_ending: bool,
    rewrite_context: Option<&RewriteKeyContext>,
    scopes: &[ScopeRange],
    dictionary: &dyn Dictionary,
    options: &EngineOptions,
) -> Vec<KeyInDocument> {
    let dot_ending = dot_ending || options.disable_path_parsing;

    let mut keys: Vec<KeyInDocument> = Vec::new();
    let mut starts: Vec<usize> = Vec::new();

    for raw in find_usages(text, patterns) {
        if let Some(key) = handle_match(
            text,
            &raw,
            dot_ending,
            rewrite_context,
            scopes,
            dictionary,
            options,
            &mut starts,
        ) {
            keys.push(key);
        }
    }

    keys.sort_by_key(|k| k.start);
    keys
}

#[allow(clippy::too_many_arguments)]
fn handle_match(
    text: &str,
    raw: &RawMatch<'_>,
    dot_ending: bool,
    rewrite_context: Option<&RewriteKeyContext>,
    scopes: &[ScopeRange],
    dictionary: &dyn Dictionary,
    options: &EngineOptions,
    starts: &mut Vec<usize>,
) -> Option<KeyInDocument> {
    // Last occurrence of the key text within the match, to avoid landing
    // on quote or prefix text.
    let rel = raw.text.rfind(raw.key)?;
    let start = raw.match_start + rel;
    let end = start + raw.key.len();
    let quoted = start > 0 && QUOTE_SYMBOLS.contains(&text.as_bytes()[start - 1]);

    // First match at an offset wins, even if it is later filtered out.
    if starts.contains(&start) {
        return None;
    }
    starts.push(start);

    let resolved = resolve_namespace(text, raw, scopes, dictionary, options);

    let accepted = if dot_ending {
        raw.key.is_empty() || raw.key.ends_with('.')
    } else {
        !raw.key.ends_with('.')
    };
    if !accepted {
        return None;
    }

    let context = RewriteKeyContext {
        namespace: Some(resolved.namespace),
        ..rewrite_context.cloned().unwrap_or_default()
    };
    let key = rewrite_key(&resolved.key, RewriteKeySource::Reference, &context, options);

    Some(KeyInDocument {
        key,
        start,
        end,
        quoted,
    })
}

/// Cached variant of the full per-document pass: scope extraction, key
/// detection, and rewrite-context plumbing in one call.
///
/// The cache entry for `path` is returned as-is when present; callers are
/// responsible for invalidating it on document mutation.
#[allow(clippy::too_many_arguments)]
pub fn find_keys_cached(
    cache: &mut DocumentCache,
    path: &Path,
    text: &str,
    patterns: &[Regex],
    extractor: &ScopeExtractor,
    dictionary: &dyn Dictionary,
    options: &EngineOptions,
) -> Vec<KeyInDocument> {
    if let Some(cached) = cache.get(path) {
        return cached.to_vec();
    }

    let scopes = extractor.extract_scopes(text, options);
    let rewrite_context = RewriteKeyContext {
        target_file: Some(path.to_string_lossy().into_owned()),
        namespaces: scopes.iter().map(|s| s.namespace.clone()).collect(),
        // The resolver decides the namespace per match from the ns index.
        namespace: None,
    };

    let keys = find_keys(
        text,
        patterns,
        false,
        Some(&rewrite_context),
        &scopes,
        dictionary,
        options,
    );
    cache.insert(path, keys.clone());
    keys
}

/// Find the key literal whose match covers a byte offset.
///
/// Returns the raw captured literal (not namespaced); used by editor
/// integrations for hover and completion. In dot-ending mode only empty
/// or separator-terminated literals are returned.
pub fn get_key_at_position(
    text: &str,
    offset: usize,
    patterns: &[Regex],
    dot_ending: bool,
    options: &EngineOptions,
) -> Option<KeyInDocument> {
    let dot_ending = dot_ending || options.disable_path_parsing;

    for regex in patterns {
        for caps in regex.captures_iter(text) {
            let Some(full) = caps.get(0) else { continue };
            if offset < full.start() || offset >= full.end() {
                continue;
            }

            let key = caps.get(1).map(|g| g.as_str()).unwrap_or("");
            let accepted = if dot_ending {
                key.is_empty() || key.ends_with('.')
            } else {
                !key.ends_with('.')
            };
            if !accepted {
                continue;
            }

            let start = match full.as_str().rfind(key) {
                Some(rel) if !key.is_empty() => full.start() + rel,
                // Empty literal: position just before the closing character.
                _ => full.end().saturating_sub(1),
            };
            let end = start + key.len();
            let quoted = start > 0 && QUOTE_SYMBOLS.contains(&text.as_bytes()[start - 1]);

            return Some(KeyInDocument {
                key: key.to_string(),
                start,
                end,
                quoted,
            });
        }
    }

    None
}

/// Namespace of the nearest enclosing scope at a byte offset, or the
/// default namespace when no scope covers it.
pub fn get_scoped_key(scopes: &[ScopeRange], offset: usize, options: &EngineOptions) -> String {
    scopes
        .iter()
        .filter(|s| s.start < offset && offset < s.end)
        .next_back()
        .map(|s| s.namespace.clone())
        .unwrap_or_else(|| options.default_namespace.clone())
}

/// Build the usage report for one file, dispatching between code files
/// (detection pass) and locale files (annotation of the file's own keys).
#[allow(clippy::too_many_arguments)]
pub fn get_usages(
    path: &Path,
    text: &str,
    patterns: &[Regex],
    extractor: &ScopeExtractor,
    dictionary: &dyn Dictionary,
    options: &EngineOptions,
    display_locale: &str,
) -> KeyUsages {
    if let Some(locale) = dictionary.locale_of_filepath(path) {
        let namespace = dictionary.namespace_from_filepath(path);
        return KeyUsages {
            kind: UsageKind::Locale,
            keys: dictionary.annotation_keys(path, text),
            locale,
            namespace,
        };
    }

    let scopes = extractor.extract_scopes(text, options);
    let rewrite_context = RewriteKeyContext {
        target_file: Some(path.to_string_lossy().into_owned()),
        namespaces: scopes.iter().map(|s| s.namespace.clone()).collect(),
        namespace: None,
    };
    let keys = find_keys(
        text,
        patterns,
        false,
        Some(&rewrite_context),
        &scopes,
        dictionary,
        options,
    );

    KeyUsages {
        kind: UsageKind::Code,
        keys,
        locale: display_locale.to_string(),
        namespace: None,
    }
}
