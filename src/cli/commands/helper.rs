//! Shared helpers for command implementations.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::args::CommonArgs;
use crate::config::Config;

/// Resolve the project root: the explicit `--root` or the current directory.
pub fn resolve_root(root: &Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path.clone()),
        None => env::current_dir().context("Failed to determine current directory"),
    }
}

/// Apply CLI flag overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, common: &CommonArgs) {
    if let Some(locale) = &common.primary_locale {
        config.primary_locale = locale.clone();
    }
    if let Some(locales_root) = &common.locales_root {
        config.locales_root = locales_root.clone();
    }
}

/// Path rendered relative to the project root when possible, for stable
/// report output.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::CommonArgs;

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let common = CommonArgs {
            root: None,
            primary_locale: Some("fr".to_string()),
            locales_root: Some("./messages".to_string()),
        };
        apply_overrides(&mut config, &common);
        assert_eq!(config.primary_locale, "fr");
        assert_eq!(config.locales_root, "./messages");
    }

    #[test]
    fn test_display_path_strips_root() {
        let root = Path::new("/project");
        assert_eq!(
            display_path(Path::new("/project/src/app.tsx"), root),
            "src/app.tsx"
        );
        assert_eq!(
            display_path(Path::new("/elsewhere/app.tsx"), root),
            "/elsewhere/app.tsx"
        );
    }
}
