//! Locale dictionary: loading, lookup, and write-back.
//!
//! Layout on disk is `<localesRoot>/<locale>/<namespace>.json`, one file
//! per namespace, nested JSON flattened to dot-separated keys. The loaded
//! snapshot backs the engine's existence oracle through the [`Dictionary`]
//! trait; reloading is the caller's concern (results computed against a
//! stale snapshot are corrected on the next scan).

pub mod json;
pub mod writer;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::{Dictionary, KeyInDocument};
use writer::{KeyAction, NamespaceFile};

/// One namespace file of the loaded locale.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub path: PathBuf,
    pub namespace: String,
    pub locale: String,
}

/// In-memory snapshot of a single locale's translations.
#[derive(Debug, Default)]
pub struct LocaleDictionary {
    locale: String,
    files: Vec<LocaleFile>,
    /// Fully-qualified key -> message value.
    keys: HashMap<String, String>,
}

/// An editor-triggered write-back request.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub value: String,
    /// Fully-qualified keypath, first segment selects the namespace file.
    pub keypath: String,
    /// Explicit target file; when absent the namespace file is derived
    /// from the keypath.
    pub filepath: Option<PathBuf>,
    pub locale: String,
}

impl LocaleDictionary {
    /// Load all namespace files of one locale under `locales_root`.
    ///
    /// A missing locale directory yields an empty dictionary rather than
    /// an error, so scanning still works in projects without locale files.
    pub fn load(locales_root: &Path, locale: &str) -> Result<Self> {
        let dir = locales_root.join(locale);
        let mut dictionary = Self {
            locale: locale.to_string(),
            files: Vec::new(),
            keys: HashMap::new(),
        };

        if !dir.is_dir() {
            return Ok(dictionary);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read locale directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let namespace = namespace.to_string();

            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read locale file: {}", path.display()))?;
            let entries = json::flatten_content(&content)
                .with_context(|| format!("Failed to parse locale file: {}", path.display()))?;

            for (keypath, value) in entries {
                dictionary
                    .keys
                    .insert(format!("{}.{}", namespace, keypath), value);
            }

            dictionary.files.push(LocaleFile {
                path,
                namespace,
                locale: locale.to_string(),
            });
        }

        Ok(dictionary)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn files(&self) -> &[LocaleFile] {
        &self.files
    }

    pub fn get(&self, full_key: &str) -> Option<&str> {
        self.keys.get(full_key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.keys.keys()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn file_for_path(&self, path: &Path) -> Option<&LocaleFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Write a value back to disk.
    ///
    /// The target file is the explicit `filepath`, or the loaded namespace
    /// file matching the keypath's first segment, or a fresh
    /// `<locale>/<namespace>.json` next to the loaded files. The namespace
    /// segment is stripped from the keypath before insertion.
    ///
    /// The in-memory snapshot is not refreshed; reload after writing.
    pub fn write(&self, locales_root: &Path, request: &WriteRequest) -> Result<KeyAction> {
        let Some((namespace, rest)) = request.keypath.split_once('.') else {
            anyhow::bail!(
                "Keypath must contain a namespace segment: \"{}\"",
                request.keypath
            );
        };

        let path = match &request.filepath {
            Some(path) => path.clone(),
            None => self
                .files
                .iter()
                .find(|f| f.namespace == namespace)
                .map(|f| f.path.clone())
                .unwrap_or_else(|| {
                    locales_root
                        .join(&request.locale)
                        .join(format!("{}.json", namespace))
                }),
        };

        let mut file = NamespaceFile::open_or_create(&path)?;
        let action = file.set_value(rest, Value::String(request.value.clone()));
        file.save()?;
        Ok(action)
    }
}

impl Dictionary for LocaleDictionary {
    fn exists(&self, full_key: &str) -> bool {
        self.keys.contains_key(full_key)
    }

    fn namespace_from_filepath(&self, path: &Path) -> Option<String> {
        self.file_for_path(path).map(|f| f.namespace.clone())
    }

    fn locale_of_filepath(&self, path: &Path) -> Option<String> {
        self.file_for_path(path).map(|f| f.locale.clone())
    }

    fn annotation_keys(&self, path: &Path, content: &str) -> Vec<KeyInDocument> {
        let namespace = self.namespace_from_filepath(path);
        json::annotation_keys(content, namespace.as_deref())
    }
}
