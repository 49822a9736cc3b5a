//! Core detection engine.
//!
//! The engine runs as a pipeline of pure passes over an immutable text
//! snapshot:
//!
//! 1. `scope`: find namespace-declaring markers and build scope ranges
//! 2. `pattern`: compile usage regexes and scan for raw key matches
//! 3. `resolve`: pick a namespace for each raw match and disambiguate
//!    against the dictionary
//! 4. `rewrite`: apply the key-prefix rewrite policy
//! 5. `detect`: deduplicate, filter and sort into `KeyInDocument` results
//!
//! Nothing in here touches the filesystem; the dictionary is consumed
//! through the `Dictionary` trait and results may be cached per document
//! via `DocumentCache`.

pub mod cache;
pub mod detect;
pub mod dictionary;
pub mod pattern;
pub mod resolve;
pub mod rewrite;
pub mod scope;

pub use cache::DocumentCache;
pub use detect::{KeyInDocument, KeyUsages, UsageKind, find_keys, find_keys_cached, get_usages};
pub use dictionary::{Dictionary, NullDictionary};
pub use pattern::{CompileResult, RawMatch, UsagePattern, find_usages};
pub use resolve::{ResolvedKey, resolve_namespace};
pub use rewrite::{RewriteKeyContext, RewriteKeySource, rewrite_key};
pub use scope::{ScopeExtractor, ScopeRange};

use crate::config::Config;

/// The subset of configuration the engine needs.
///
/// Kept separate from [`Config`] so the engine stays testable without a
/// config file and so callers embedding the library can build one directly.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub default_namespace: String,
    pub common_namespace: String,
    pub translation_fn: String,
    pub translation_hook: String,
    pub enable_key_prefix: bool,
    pub disable_path_parsing: bool,
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            default_namespace: config.default_namespace.clone(),
            common_namespace: config.common_namespace.clone(),
            translation_fn: config.translation_fn.clone(),
            translation_hook: config.translation_hook.clone(),
            enable_key_prefix: config.enable_key_prefix,
            disable_path_parsing: config.disable_path_parsing,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions::from(&Config::default())
    }
}
