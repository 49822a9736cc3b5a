//! The `keys` command: list the resolved key usages of a single file.

use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::helper::{apply_overrides, resolve_root};
use crate::cli::args::KeysCommand;
use crate::cli::exit_status::ExitStatus;
use crate::config::load_config;
use crate::core::pattern::usage_patterns;
use crate::core::{EngineOptions, ScopeExtractor, get_usages};
use crate::locales::LocaleDictionary;
use crate::utils::{build_line_index, offset_to_position};

pub fn keys(cmd: KeysCommand) -> Result<ExitStatus> {
    let root = resolve_root(&cmd.common.root)?;
    let mut config = load_config(&root)?.config;
    apply_overrides(&mut config, &cmd.common);

    let options = EngineOptions::from(&config);
    let compiled = usage_patterns(&config.usage_match_regex, &config.regex_key, &options)?;
    for warning in &compiled.warnings {
        eprintln!("{} {}", "warning:".bold().yellow(), warning);
    }

    let dictionary =
        LocaleDictionary::load(&root.join(&config.locales_root), &config.primary_locale)?;
    let extractor = ScopeExtractor::new(&options)?;

    let text = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read file: {}", cmd.file.display()))?;

    let usages = get_usages(
        &cmd.file,
        &text,
        &compiled.patterns,
        &extractor,
        &dictionary,
        &options,
        &config.primary_locale,
    );

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&usages)?);
        return Ok(ExitStatus::Success);
    }

    let line_index = build_line_index(&text);
    for key in &usages.keys {
        let (line, col) = offset_to_position(&text, &line_index, key.start);
        println!(
            "{}:{}:{} {}",
            cmd.file.display(),
            line,
            col,
            key.key.bold()
        );
    }
    println!(
        "{} key usage{} in {}",
        usages.keys.len(),
        if usages.keys.len() == 1 { "" } else { "s" },
        cmd.file.display()
    );

    Ok(ExitStatus::Success)
}
