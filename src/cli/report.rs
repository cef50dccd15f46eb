//! Console output: the CLI's [`Logger`] and end-of-run summaries.
//!
//! Separate from core logic so tclean can be used as a library without
//! printing side effects.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{CheckSummary, RunSummary, WriteMode};
use crate::events::{Event, Level, Logger, Report};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Logger printing cargo-style lines: info to stdout, problems to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    verbose: bool,
}

impl ConsoleLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: Event) {
        match event.level() {
            Level::Debug | Level::Info => {
                log_to(&event, self.verbose, &mut io::stdout().lock());
            }
            Level::Warning | Level::Error => {
                log_to(&event, self.verbose, &mut io::stderr().lock());
            }
        }
    }
}

/// Print one event to a custom writer.
///
/// Debug events are only printed in verbose mode.
pub fn log_to<W: Write>(event: &Event, verbose: bool, writer: &mut W) {
    let message = event.message();
    let _ = match event.level() {
        Level::Debug if !verbose => return,
        Level::Debug => writeln!(writer, "{}", message.dimmed()),
        Level::Info => writeln!(writer, "{}", message),
        Level::Warning => writeln!(writer, "{}: {}", "warning".bold().yellow(), message),
        Level::Error => writeln!(writer, "{}: {}", "error".bold().red(), message),
    };
}

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

/// Print the command summary to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Clean { summary, mode } => print_clean(summary, *mode, writer),
        CommandSummary::Check(summary) => print_check(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

fn print_clean<W: Write>(summary: &RunSummary, mode: WriteMode, writer: &mut W) {
    let files = summary.files_processed;
    let files_word = plural(files, "translation file", "translation files");

    match mode {
        WriteMode::DryRun => {
            if summary.files_would_update > 0 {
                let _ = writeln!(
                    writer,
                    "{} {} of {} {} ({} unused {}).",
                    "Would update".yellow().bold(),
                    summary.files_would_update,
                    files,
                    files_word,
                    summary.unused_keys,
                    plural(summary.unused_keys, "key", "keys"),
                );
                let _ = writeln!(writer, "Run without {} to write these changes.", "--dry-run".cyan());
            } else {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Checked {} {} - nothing to update", files, files_word).green()
                );
            }
        }
        WriteMode::Apply => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Processed {} {}: {} updated, {} unchanged",
                    files, files_word, summary.files_updated, summary.files_unchanged
                )
                .green()
            );
        }
    }

    if summary.files_failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} could not be processed",
            FAILURE_MARK.red(),
            summary.files_failed,
            plural(summary.files_failed, "file", "files"),
        );
    }

    if summary.missing_keys > 0 {
        let _ = writeln!(
            writer,
            "{} {} missing {} across translation files",
            FAILURE_MARK.yellow(),
            summary.missing_keys,
            plural(summary.missing_keys, "key", "keys"),
        );
    }
}

fn print_check<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let files_word = plural(summary.files_checked, "translation file", "translation files");

    if summary.issue_count() == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} against {} used {} - no issues found",
                summary.files_checked,
                files_word,
                summary.used_keys,
                plural(summary.used_keys, "key", "keys"),
            )
            .green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "\n{} {} problems ({} unused, {} missing) in {} {}",
        FAILURE_MARK.red(),
        summary.issue_count(),
        summary.unused_keys.to_string().yellow(),
        summary.missing_keys.to_string().yellow(),
        summary.files_checked,
        files_word,
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
