//! Key rewrite policy: namespace prefixing for bare keys.

use crate::core::EngineOptions;

/// Where a rewrite request originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKeySource {
    /// A detected usage in source code.
    Reference,
    /// A key being constructed for a new entry.
    Source,
}

/// Context threaded from scope extraction through resolution into the
/// rewrite policy, so prefixing never has to re-derive the scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteKeyContext {
    pub target_file: Option<String>,
    /// Namespace chosen by the resolver for this particular match.
    pub namespace: Option<String>,
    /// Primary namespaces of all scopes in the document, in order.
    pub namespaces: Vec<String>,
}

/// Apply the prefix policy to a key.
///
/// Idempotent: a key that already carries a namespace separator is
/// returned unchanged, as is any key when prefixing is disabled.
pub fn rewrite_key(
    key: &str,
    _source: RewriteKeySource,
    context: &RewriteKeyContext,
    options: &EngineOptions,
) -> String {
    if !options.enable_key_prefix {
        return key.to_string();
    }

    if key.contains('.') {
        return key.to_string();
    }

    let namespace = context
        .namespace
        .as_deref()
        .unwrap_or(&options.default_namespace);

    format!("{}.{}", namespace, key)
}

#[cfg(test)]
mod tests {
    use crate::core::EngineOptions;
    use crate::core::rewrite::*;
    use pretty_assertions::assert_eq;

    fn ctx(namespace: Option<&str>) -> RewriteKeyContext {
        RewriteKeyContext {
            target_file: None,
            namespace: namespace.map(String::from),
            namespaces: Vec::new(),
        }
    }

    #[test]
    fn test_bare_key_gets_prefixed() {
        let options = EngineOptions::default();
        let key = rewrite_key("title", RewriteKeySource::Reference, &ctx(Some("home")), &options);
        assert_eq!(key, "home.title");
    }

    #[test]
    fn test_qualified_key_is_unchanged() {
        let options = EngineOptions::default();
        let key = rewrite_key(
            "home.title",
            RewriteKeySource::Reference,
            &ctx(Some("settings")),
            &options,
        );
        assert_eq!(key, "home.title");
    }

    #[test]
    fn test_missing_namespace_uses_default() {
        let options = EngineOptions::default();
        let key = rewrite_key("title", RewriteKeySource::Reference, &ctx(None), &options);
        assert_eq!(key, "common.title");
    }

    #[test]
    fn test_disabled_prefix_is_passthrough() {
        let options = EngineOptions {
            enable_key_prefix: false,
            ..EngineOptions::default()
        };
        let key = rewrite_key("title", RewriteKeySource::Reference, &ctx(Some("home")), &options);
        assert_eq!(key, "title");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let options = EngineOptions::default();
        let context = ctx(Some("home"));
        for key in ["title", "home.title", "a.b.c", ""] {
            let once = rewrite_key(key, RewriteKeySource::Reference, &context, &options);
            let twice = rewrite_key(&once, RewriteKeySource::Reference, &context, &options);
            assert_eq!(once, twice);
        }
    }
}
