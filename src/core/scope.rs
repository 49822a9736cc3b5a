//! Scope extraction: which namespaces are active at which offsets.
//!
//! A scope is opened by a hook call that declares its namespaces, e.g.
//! `useTranslation(['settings', 'common'])`. There is no closing marker;
//! once opened, a scope runs to the end of the document. The nearest
//! preceding marker is therefore the scope with the largest `start` below
//! a given offset.

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::EngineOptions;

/// Span of text over which an ordered set of namespaces is active.
///
/// Offsets are byte offsets into the document; `start` inclusive, `end`
/// exclusive. Scopes from one document may overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRange {
    pub start: usize,
    pub end: usize,
    /// First surviving namespace candidate (or the default).
    pub namespace: String,
    /// All surviving candidates, in declaration order.
    pub namespaces: Vec<String>,
}

/// Finds scope-declaring markers in document text.
pub struct ScopeExtractor {
    marker: Regex,
}

impl ScopeExtractor {
    pub fn new(options: &EngineOptions) -> Result<Self> {
        let hook = regex::escape(&options.translation_hook);
        let pattern = format!(
            r#"{hook}\(\s*\[\s*(['"`](?:\w+(?:\.\w+)*)['"`](?:\s*,\s*['"`](?:\w+(?:\.\w+)*)['"`])*)\s*\]"#
        );
        let marker = Regex::new(&pattern)
            .with_context(|| format!("Failed to build scope marker pattern for '{}'", hook))?;
        Ok(Self { marker })
    }

    /// Extract all scope ranges from `text`.
    ///
    /// Returns an empty list when key prefixing is disabled or no marker
    /// occurs. Namespaces equal to the configured common sentinel are
    /// filtered out; if the filter removes every candidate, the default
    /// namespace is used instead.
    pub fn extract_scopes(&self, text: &str, options: &EngineOptions) -> Vec<ScopeRange> {
        if !options.enable_key_prefix {
            return Vec::new();
        }

        let mut ranges = Vec::new();

        for caps in self.marker.captures_iter(text) {
            let Some(full) = caps.get(0) else { continue };
            let Some(list) = caps.get(1) else { continue };

            let mut namespaces: Vec<String> = list
                .as_str()
                .split(',')
                .map(|ns| ns.trim().trim_matches(['\'', '"', '`']).to_string())
                .filter(|ns| !ns.is_empty() && *ns != options.common_namespace)
                .collect();

            if namespaces.is_empty() {
                namespaces.push(options.default_namespace.clone());
            }

            let namespace = namespaces[0].clone();

            ranges.push(ScopeRange {
                start: full.start(),
                end: text.len(),
                namespace,
                namespaces,
            });
        }

        ranges
    }
}
