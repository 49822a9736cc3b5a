//! Report formatting and printing utilities.
//!
//! Separate from the detection engine so the library can be used without
//! printing side effects. Issues come out in a cargo-style layout with a
//! clickable location, the offending source line and a caret.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::issue::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer. Useful for testing or redirection.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = sorted
        .iter()
        .filter_map(|i| i.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message,
        issue.rule.to_string().dimmed().cyan()
    );

    if let Some(path) = &issue.file_path {
        let line = issue.line.unwrap_or(0);
        let col = issue.col.unwrap_or(0);
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), path, line, col);
    }

    if let (Some(line), Some(source_line)) = (issue.line, issue.source_line.as_deref()) {
        let caret = match issue.severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };
        let col = issue.col.unwrap_or(1);

        let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );
        // Caret position uses display width so CJK text lines up.
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret,
            width = max_line_width,
            padding = padding
        );
    }

    if let Some(hint) = &issue.hint {
        let _ = writeln!(writer, "  {} {}", "hint:".bold(), hint);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;

    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{} {}", errors, if errors == 1 { "error" } else { "errors" }));
    }
    if warnings > 0 {
        parts.push(format!(
            "{} {}",
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        ));
    }

    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("Found {}", parts.join(", ")).bold()
    );
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, keys: usize) {
    print_success_to(source_files, keys, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, keys: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source file{}, {} key usage{} resolved",
            source_files,
            if source_files == 1 { "" } else { "s" },
            keys,
            if keys == 1 { "" } else { "s" },
        )
        .bold()
    );
}
