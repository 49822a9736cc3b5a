//! Write-back of values into namespace JSON files.
//!
//! Key order in the target file is preserved; intermediate objects are
//! created as needed. Output is pretty-printed with a trailing newline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Whether a write created a new key or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
        }
    }
}

/// Editable handle on one namespace file.
pub struct NamespaceFile {
    path: PathBuf,
    data: Map<String, Value>,
}

impl NamespaceFile {
    /// Open an existing namespace file or start an empty one.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
            match value {
                Value::Object(map) => map,
                _ => bail!("Root of JSON file must be an object: {}", path.display()),
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Set the value at a dot-separated keypath, e.g. `home.cta.start`.
    pub fn set_value(&mut self, keypath: &str, value: Value) -> KeyAction {
        let parts: Vec<&str> = keypath.split('.').collect();
        insert_nested(&mut self.data, &parts, value)
    }

    /// Save with 2-space indentation and a trailing newline, creating
    /// parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(self.data.clone()))
            .context("Failed to serialize JSON")?;

        fs::write(&self.path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;

        Ok(())
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) -> KeyAction {
    let [head, rest @ ..] = path else {
        return KeyAction::Added;
    };

    if rest.is_empty() {
        let action = if root.contains_key(*head) {
            KeyAction::Updated
        } else {
            KeyAction::Added
        };
        root.insert(head.to_string(), value);
        return action;
    }

    let next = root
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A scalar in the way of a deeper path is replaced by an object.
    if !next.is_object() {
        *next = Value::Object(Map::new());
    }

    match next.as_object_mut() {
        Some(inner) => insert_nested(inner, rest, value),
        None => KeyAction::Added,
    }
}
