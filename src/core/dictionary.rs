//! Dictionary seam between the engine and the locale store.
//!
//! The engine never owns dictionary contents; it only asks whether a
//! fully-qualified key exists (the disambiguation oracle) and how file
//! paths map onto locales and namespaces. The store behind the trait is
//! assumed to be an in-memory, already-loaded snapshot; a stale snapshot
//! during an external reload is tolerated and corrected on the next scan.

use std::path::Path;

use crate::core::detect::KeyInDocument;

pub trait Dictionary {
    /// Whether a fully-qualified key exists in the loaded dictionary.
    fn exists(&self, full_key: &str) -> bool;

    /// Namespace a locale file path belongs to, if the path is a known
    /// locale file.
    fn namespace_from_filepath(&self, path: &Path) -> Option<String>;

    /// Locale of a known locale file path.
    fn locale_of_filepath(&self, _path: &Path) -> Option<String> {
        None
    }

    /// Key annotations for a locale file's own content: the span of every
    /// leaf key literal inside the file, as fully-qualified keys.
    fn annotation_keys(&self, _path: &Path, _content: &str) -> Vec<KeyInDocument> {
        Vec::new()
    }
}

/// A dictionary with no contents; every existence check fails.
///
/// Useful when scanning without locale files, where disambiguation always
/// falls back to the default namespace.
#[derive(Debug, Default)]
pub struct NullDictionary;

impl Dictionary for NullDictionary {
    fn exists(&self, _full_key: &str) -> bool {
        false
    }

    fn namespace_from_filepath(&self, _path: &Path) -> Option<String> {
        None
    }
}
