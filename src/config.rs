use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".keylensrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace used when no scope or explicit prefix applies.
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    /// Sentinel namespace filtered out of scope declarations.
    #[serde(default = "default_namespace")]
    pub common_namespace: String,
    /// Bare translation function name; longer identifiers sharing this
    /// prefix are treated as scope aliases.
    #[serde(default = "default_translation_fn")]
    pub translation_fn: String,
    /// Hook call that declares the active namespaces for a span of code.
    #[serde(default = "default_translation_hook")]
    pub translation_hook: String,
    #[serde(default = "default_enable_key_prefix")]
    pub enable_key_prefix: bool,
    #[serde(default)]
    pub disable_path_parsing: bool,
    /// Substituted for the `{key}` placeholder in usage regex templates.
    #[serde(default = "default_regex_key")]
    pub regex_key: String,
    /// Usage regex templates; empty means the built-in pattern.
    #[serde(default)]
    pub usage_match_regex: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_locales_root", alias = "localesDir")]
    pub locales_root: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_namespace() -> String {
    "common".to_string()
}

fn default_translation_fn() -> String {
    "tr".to_string()
}

fn default_translation_hook() -> String {
    "useTranslation".to_string()
}

fn default_enable_key_prefix() -> bool {
    true
}

fn default_regex_key() -> String {
    r"[\w\d\. \-\[\]]*?".to_string()
}

fn default_includes() -> Vec<String> {
    ["src", "app", "components", "pages"]
        .map(String::from)
        .to_vec()
}

fn default_locales_root() -> String {
    "./locales".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            common_namespace: default_namespace(),
            translation_fn: default_translation_fn(),
            translation_hook: default_translation_hook(),
            enable_key_prefix: default_enable_key_prefix(),
            disable_path_parsing: false,
            regex_key: default_regex_key(),
            usage_match_regex: Vec::new(),
            ignores: Vec::new(),
            includes: default_includes(),
            locales_root: default_locales_root(),
            primary_locale: default_primary_locale(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid, or if identifier-like options are empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include patterns without wildcards are treated as literal
        // directory paths, so bracketed route segments are valid unescaped.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.default_namespace.is_empty() {
            anyhow::bail!("'defaultNamespace' must not be empty");
        }
        if self.translation_fn.is_empty() {
            anyhow::bail!("'translationFn' must not be empty");
        }
        if self.translation_hook.is_empty() {
            anyhow::bail!("'translationHook' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_namespace, "common");
        assert_eq!(config.translation_fn, "tr");
        assert_eq!(config.translation_hook, "useTranslation");
        assert!(config.enable_key_prefix);
        assert!(!config.disable_path_parsing);
        assert!(config.usage_match_regex.is_empty());
        assert!(!config.includes.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "defaultNamespace": "shared",
              "enableKeyPrefix": false,
              "usageMatchRegex": ["\\Wt\\('({key})'\\)"],
              "ignores": ["**/dist/**"]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_namespace, "shared");
        assert!(!config.enable_key_prefix);
        assert_eq!(config.usage_match_regex, vec![r"\Wt\('({key})'\)"]);
        assert_eq!(config.ignores, vec!["**/dist/**"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "disablePathParsing": true }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert!(config.disable_path_parsing);
        assert_eq!(config.default_namespace, "common");
        assert_eq!(config.includes, default_includes());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "primaryLocale": "zh" }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.primary_locale, "zh");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.default_namespace, "common");
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()], // unclosed bracket
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_empty_default_namespace() {
        let config = Config {
            default_namespace: String::new(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("defaultNamespace"));
    }

    #[test]
    fn test_validate_bracketed_route_include_is_valid() {
        // [locale] without wildcards is a literal path, not a glob
        let config = Config {
            includes: vec!["app/[locale]".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backward_compatibility_locales_dir() {
        let json = r#"{ "localesDir": "./messages" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.locales_root, "./messages");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("defaultNamespace"));
        assert!(json.contains("localesRoot"));
        assert!(!json.contains("default_namespace"));
    }
}
