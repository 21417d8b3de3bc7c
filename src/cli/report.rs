//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow locsheet to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, ExportSummary, ImportSummary, InitSummary, ScanSummary,
    helper::display_path,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::RecordLoadWarning;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    print_to(result, verbose, &mut out, &mut err);
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Export(summary) => print_export(summary, verbose, out, err),
        CommandSummary::Import(summary) => print_import(summary, verbose, out, err),
        CommandSummary::Scan(summary) => print_scan(summary, verbose, out, err),
        CommandSummary::Init(summary) => print_init(summary, out),
    }
}

fn print_export<O: Write, E: Write>(
    summary: &ExportSummary,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    print_skipped_files(&summary.skipped_files, verbose, err);

    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Exported localizations to '{}'.",
            summary.workbook_path.display()
        )
        .green()
    );
    if verbose {
        let _ = writeln!(
            out,
            "  {} key(s), {} culture(s)",
            summary.key_count, summary.culture_count
        );
    }
}

fn print_import<O: Write, E: Write>(
    summary: &ImportSummary,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    let warnings = &summary.row_warnings;
    if verbose {
        for warning in warnings {
            let _ = writeln!(err, "{} {}", "warning:".bold().yellow(), warning);
        }
    } else if !warnings.is_empty() {
        let _ = writeln!(
            err,
            "{} {} cell(s) could not be imported (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
    }

    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Imported localizations from '{}' to {} localization file(s).",
            summary.workbook_path.display(),
            summary.written_files.len()
        )
        .green()
    );
    if verbose {
        for path in &summary.written_files {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
}

fn print_scan<O: Write, E: Write>(summary: &ScanSummary, verbose: bool, out: &mut O, err: &mut E) {
    let result = &summary.result;
    print_skipped_files(&summary.skipped_files, verbose, err);

    if verbose {
        for file in &result.files {
            let _ = writeln!(
                out,
                "{} {}",
                "Scanning:".dimmed(),
                display_path(file, &summary.source_root)
            );
        }
    }

    let unreadable = result.unreadable.len() + result.inaccessible.len();
    if verbose {
        for file in &result.unreadable {
            let _ = writeln!(
                err,
                "{} {}: {}",
                "warning:".bold().yellow(),
                display_path(&file.path, &summary.source_root),
                file.error
            );
        }
        for entry in &result.inaccessible {
            let _ = writeln!(err, "{} {}", "warning:".bold().yellow(), entry);
        }
    } else if unreadable > 0 {
        let _ = writeln!(
            err,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            unreadable,
            "-v".cyan()
        );
    }

    let missing = result.missing_keys();
    if missing.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Searched {} file(s) - all {} localization key(s) are used",
                result.files_scanned,
                result.all_keys.len()
            )
            .green()
        );
        return;
    }

    let _ = writeln!(
        out,
        "{} {} localization key(s) were not found in {} file(s) searched:",
        FAILURE_MARK.red(),
        missing.len().to_string().bold(),
        result.files_scanned
    );
    for key in missing {
        let _ = writeln!(out, "  {}", key);
    }
}

fn print_init<O: Write>(summary: &InitSummary, out: &mut O) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn print_skipped_files<E: Write>(warnings: &[RecordLoadWarning], verbose: bool, err: &mut E) {
    if warnings.is_empty() {
        return;
    }
    if verbose {
        for warning in warnings {
            let _ = writeln!(
                err,
                "{} '{}': {}",
                "warning:".bold().yellow(),
                warning.file_path,
                warning.error
            );
        }
    } else {
        let _ = writeln!(
            err,
            "{} {} localization file(s) were skipped or partly loaded (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
    }
}
