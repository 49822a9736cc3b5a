//! Usage pattern compilation and raw match scanning.
//!
//! Patterns match call-like syntax such as `tr('home.title')` or
//! `trSettings('label', { nsIndex: 1 })`. Capture group 1 holds the key
//! literal; optional capture group 2 holds a numeric namespace-index hint.

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::EngineOptions;

/// Placeholder substituted with the configured key character class in
/// user-supplied pattern templates.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// A usage-matching pattern, either precompiled or a template with a
/// `{key}` placeholder to be substituted before compilation.
#[derive(Debug, Clone)]
pub enum UsagePattern {
    Template(String),
    Compiled(Regex),
}

/// Outcome of compiling a pattern set.
///
/// Malformed templates are skipped, not fatal: their error messages are
/// collected into `warnings` and scanning continues with the valid subset.
#[derive(Debug, Default)]
pub struct CompileResult {
    pub patterns: Vec<Regex>,
    pub warnings: Vec<String>,
}

/// One raw occurrence of a key usage, before namespace resolution.
///
/// Transient: lives only within a single matching pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'t> {
    /// The full matched substring.
    pub text: &'t str,
    /// Capture group 1: the key literal.
    pub key: &'t str,
    /// Capture group 2 parsed as a namespace index, 0 when absent.
    pub ns_index: usize,
    /// Byte offset of the full match within the document.
    pub match_start: usize,
}

/// The built-in usage pattern, matching the bare translation function and
/// its aliases: `tr('key')`, `trFoo('key', [..])`, `tr('key', { nsIndex: 1 })`.
pub fn default_usage_pattern(options: &EngineOptions) -> Result<Regex> {
    let func = regex::escape(&options.translation_fn);
    let pattern = format!(
        r"[^\w]{func}\w*\('([\w.-]+)'(?:\s*,\s*(?:\[[^\]]*\]|\{{[^}}]*\}}))??(?:\s*,\s*\{{\s*nsIndex:\s*(\d+)\s*\}})?\)"
    );
    Regex::new(&pattern)
        .with_context(|| format!("Failed to build usage pattern for '{}'", options.translation_fn))
}

/// Compile a pattern set, substituting `{key}` in templates.
///
/// Compilation failures are collected as warnings rather than errors so a
/// single bad user template never disables the whole scan.
pub fn compile_patterns(patterns: &[UsagePattern], regex_key: &str) -> CompileResult {
    let mut result = CompileResult::default();

    for pattern in patterns {
        match pattern {
            UsagePattern::Compiled(regex) => result.patterns.push(regex.clone()),
            UsagePattern::Template(template) => {
                let interpolated = template.replace(KEY_PLACEHOLDER, regex_key);
                match Regex::new(&interpolated) {
                    Ok(regex) => result.patterns.push(regex),
                    Err(err) => result.warnings.push(format!(
                        "Failed to compile usage regex \"{}\": {}",
                        template, err
                    )),
                }
            }
        }
    }

    result
}

/// Resolve the effective pattern set: user templates when configured,
/// otherwise the built-in pattern.
pub fn usage_patterns(
    templates: &[String],
    regex_key: &str,
    options: &EngineOptions,
) -> Result<CompileResult> {
    if templates.is_empty() {
        return Ok(CompileResult {
            patterns: vec![default_usage_pattern(options)?],
            warnings: Vec::new(),
        });
    }

    let patterns: Vec<UsagePattern> = templates
        .iter()
        .map(|t| UsagePattern::Template(t.clone()))
        .collect();
    Ok(compile_patterns(&patterns, regex_key))
}

/// Scan `text` with each pattern in order, emitting one raw match per hit.
///
/// Matches with an empty key capture are discarded as malformed calls.
pub fn find_usages<'t>(text: &'t str, patterns: &[Regex]) -> Vec<RawMatch<'t>> {
    let mut matches = Vec::new();

    for regex in patterns {
        for caps in regex.captures_iter(text) {
            let Some(full) = caps.get(0) else { continue };
            let key = caps.get(1).map(|g| g.as_str()).unwrap_or("");
            if key.is_empty() {
                continue;
            }
            let ns_index = caps
                .get(2)
                .and_then(|g| g.as_str().parse::<usize>().ok())
                .unwrap_or(0);

            matches.push(RawMatch {
                text: full.as_str(),
                key,
                ns_index,
                match_start: full.start(),
            });
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use crate::core::EngineOptions;
    use crate::core::pattern::*;
    use pretty_assertions::assert_eq;

    fn default_patterns() -> Vec<Regex> {
        vec![default_usage_pattern(&EngineOptions::default()).unwrap()]
    }

    #[test]
    fn test_simple_call() {
        let text = "a(); tr('home.title'); b();";
        let matches = find_usages(text, &default_patterns());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "home.title");
        assert_eq!(matches[0].ns_index, 0);
        assert_eq!(matches[0].match_start, text.find(" tr(").unwrap());
    }

    #[test]
    fn test_alias_call() {
        let matches = find_usages(" trSettings('label')", &default_patterns());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "label");
        assert!(matches[0].text.contains("trSettings"));
    }

    #[test]
    fn test_ns_index_hint() {
        let matches = find_usages(" tr('label', { nsIndex: 2 })", &default_patterns());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "label");
        assert_eq!(matches[0].ns_index, 2);
    }

    #[test]
    fn test_interpolation_args_then_ns_index() {
        let matches = find_usages(
            " tr('greeting', { name: user }, { nsIndex: 1 })",
            &default_patterns(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "greeting");
        assert_eq!(matches[0].ns_index, 1);
    }

    #[test]
    fn test_call_at_document_start_requires_preceding_char() {
        // The pattern consumes one non-word char before the identifier, so
        // a call at offset 0 cannot match.
        let matches = find_usages("tr('a')", &default_patterns());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_multiple_calls() {
        let text = " tr('a'); tr('b.c'); other();";
        let matches = find_usages(text, &default_patterns());
        let keys: Vec<&str> = matches.iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["a", "b.c"]);
    }

    #[test]
    fn test_empty_capture_is_discarded() {
        let pattern = Regex::new(r"t\('(\w*)'\)").unwrap();
        let matches = find_usages("t('')", &[pattern]);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_template_compilation() {
        let result = compile_patterns(
            &[UsagePattern::Template(r"\Wt\('({key})'\)".to_string())],
            r"[\w.-]+",
        );
        assert_eq!(result.patterns.len(), 1);
        assert!(result.warnings.is_empty());

        let matches = find_usages(" t('nav.home')", &result.patterns);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "nav.home");
    }

    #[test]
    fn test_malformed_template_is_skipped_not_fatal() {
        let result = compile_patterns(
            &[
                UsagePattern::Template(r"\Wt\('({key})'\)".to_string()),
                UsagePattern::Template(r"(unclosed".to_string()),
            ],
            r"[\w.-]+",
        );
        assert_eq!(result.patterns.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("unclosed"));
    }

    #[test]
    fn test_usage_patterns_falls_back_to_builtin() {
        let options = EngineOptions::default();
        let result = usage_patterns(&[], r"[\w.-]+", &options).unwrap();
        assert_eq!(result.patterns.len(), 1);

        let matches = find_usages(" tr('x')", &result.patterns);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_custom_translation_fn() {
        let options = EngineOptions {
            translation_fn: "i18n".to_string(),
            ..EngineOptions::default()
        };
        let pattern = default_usage_pattern(&options).unwrap();
        let matches = find_usages(" i18n('deep.key')", &[pattern]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "deep.key");
    }
}
