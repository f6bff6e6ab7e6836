//! Report formatting and printing utilities.
//!
//! Displays issues and call sites in cargo-style format. Kept out of `core`
//! so paraglot can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::SourcePosition;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, locale_files: usize) {
    print_success_to(source_files, locale_files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} source {}, {} locale {} - no issues found",
        source_files,
        if source_files == 1 { "file" } else { "files" },
        locale_files,
        if locale_files == 1 { "file" } else { "files" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a call site with its source line and a caret under the call.
pub fn print_position_to<W: Write>(position: &SourcePosition, note: Option<&str>, writer: &mut W) {
    let width = position.line.to_string().len();
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        position.file_path,
        position.line,
        position.col
    );
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        position.line.to_string().blue(),
        "|".blue(),
        position.source_line,
        width = width
    );

    let prefix: String = position
        .source_line
        .chars()
        .take(position.col.saturating_sub(1))
        .collect();
    let padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".cyan(),
        width = width,
        padding = padding
    );

    if let Some(note) = note {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            note,
            width = width
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Catalog(loc) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:1",
                "-->".blue(),
                loc.file_path.display(),
                loc.line
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Catalog(loc) => Some(loc.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
