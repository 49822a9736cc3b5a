//! The `scan` command: project-wide key detection plus missing-key checks
//! against the primary locale.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;
use glob::{Pattern, glob};
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use super::helper::{apply_overrides, display_path, resolve_root};
use crate::cli::args::ScanCommand;
use crate::cli::exit_status::ExitStatus;
use crate::config::{Config, TEST_FILE_PATTERNS, load_config};
use crate::core::pattern::usage_patterns;
use crate::core::{Dictionary, EngineOptions, RewriteKeyContext, ScopeExtractor, find_keys};
use crate::issue::Issue;
use crate::locales::LocaleDictionary;
use crate::report::{print_success, report};
use crate::utils::{build_line_index, line_text, offset_to_position};

struct FileOutcome {
    issues: Vec<Issue>,
    key_count: usize,
}

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let root = resolve_root(&cmd.common.root)?;
    let mut config = load_config(&root)?.config;
    apply_overrides(&mut config, &cmd.common);

    let options = EngineOptions::from(&config);
    let compiled = usage_patterns(&config.usage_match_regex, &config.regex_key, &options)?;

    let mut issues: Vec<Issue> = compiled
        .warnings
        .iter()
        .map(|w| Issue::malformed_pattern(w.clone()))
        .collect();

    let dictionary =
        LocaleDictionary::load(&root.join(&config.locales_root), &config.primary_locale)?;
    let extractor = ScopeExtractor::new(&options)?;

    let files = collect_source_files(&root, &config);

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| scan_file(path, &root, &compiled.patterns, &extractor, &dictionary, &options))
        .collect();

    let mut key_count = 0;
    for outcome in outcomes {
        issues.extend(outcome.issues);
        key_count += outcome.key_count;
    }

    if issues.is_empty() {
        print_success(files.len(), key_count);
        return Ok(ExitStatus::Success);
    }

    report(&issues);
    if issues.iter().any(Issue::is_error) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn scan_file(
    path: &Path,
    root: &Path,
    patterns: &[Regex],
    extractor: &ScopeExtractor,
    dictionary: &LocaleDictionary,
    options: &EngineOptions,
) -> FileOutcome {
    let display = display_path(path, root);

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            return FileOutcome {
                issues: vec![Issue::parse_error(&display, err.to_string())],
                key_count: 0,
            };
        }
    };

    let scopes = extractor.extract_scopes(&text, options);
    let rewrite_context = RewriteKeyContext {
        target_file: Some(display.clone()),
        namespaces: scopes.iter().map(|s| s.namespace.clone()).collect(),
        namespace: None,
    };
    let keys = find_keys(
        &text,
        patterns,
        false,
        Some(&rewrite_context),
        &scopes,
        dictionary,
        options,
    );

    let mut issues = Vec::new();

    // Without locale files every key would be "missing"; only check
    // existence when a dictionary was actually loaded.
    if !dictionary.is_empty() {
        let line_index = build_line_index(&text);
        for key in &keys {
            if !dictionary.exists(&key.key) {
                let (line, col) = offset_to_position(&text, &line_index, key.start);
                let source_line = line_text(&text, &line_index, line).map(str::to_string);
                issues.push(Issue::missing_key(&display, line, col, &key.key, source_line));
            }
        }
    }

    FileOutcome {
        issues,
        key_count: keys.len(),
    }
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

/// Collect the source files to scan, honoring includes, ignore patterns
/// and the test-file ignore list. Returns a sorted list for deterministic
/// output.
pub fn collect_source_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    let base = root.join(&config.source_root);

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in &config.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(err) => {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        err
                    );
                }
            }
        } else {
            literal_ignore_paths.push(base.join(p));
        }
    }

    if config.ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let mut dirs_to_scan: Vec<PathBuf> = Vec::new();
    if config.includes.is_empty() {
        dirs_to_scan.push(base.clone());
    } else {
        for inc in &config.includes {
            if is_glob_pattern(inc) {
                let full_pattern = base.join(inc);
                if let Ok(entries) = glob(&full_pattern.to_string_lossy()) {
                    dirs_to_scan.extend(entries.flatten().filter(|p| p.is_dir()));
                }
            } else {
                let path = base.join(inc);
                if path.exists() {
                    dirs_to_scan.push(path);
                }
            }
        }
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir).into_iter().flatten() {
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths.iter().any(|ip| path.starts_with(ip)) {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }
            if path.is_file() && is_scannable_file(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}
