//! # Output Module
//!
//! This module centralizes all user-facing output for the licensify tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! - Lists of changed files are shortened unless `-v` is given
//! - Nothing is printed with `-q`
//! - Everything goes to stdout; diagnostics go to stderr elsewhere

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::Mode;
use crate::report::{FileAction, FileReport, LicenseFileOutcome, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Header added or license file written
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header or license file removed
  pub const REMOVED: &str = "\u{2717}"; // ✗
  /// Left alone
  pub const UNCHANGED: &str = "-";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Adding headers: scanning N files..." message.
pub fn print_start_message(file_count: usize, mode: Mode, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = match mode {
    Mode::Add => "Adding headers",
    Mode::Remove => "Removing headers",
  };
  let files_word = if file_count == 1 { "file" } else { "files" };
  let suffix = if dry_run { " (dry run)" } else { "" };

  println!("{}{}: scanning {} {}...", verb, suffix, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the list of files whose content was (or would be) rewritten.
pub fn print_changed_files(files: &[&FileReport], mode: Mode, dry_run: bool, root: Option<&Path>) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let count = files.len();
  let (symbol, action) = match (mode, dry_run) {
    (Mode::Add, false) => (
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
      "Added header to",
    ),
    (Mode::Add, true) => (
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
      "Would add header to",
    ),
    (Mode::Remove, false) => (
      symbols::REMOVED.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
      "Removed header from",
    ),
    (Mode::Remove, true) => (
      symbols::REMOVED.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
      "Would remove header from",
    ),
  };
  println!(
    "{} {} {} {}:",
    symbol,
    action,
    count,
    if count == 1 { "file" } else { "files" }
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if !show_all && count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print the message shown when no file needed changing.
pub fn print_nothing_to_do(mode: Mode) {
  if is_quiet() {
    return;
  }

  let message = match mode {
    Mode::Add => "All candidate files already have a header.",
    Mode::Remove => "No managed headers found.",
  };
  println!(
    "{} {}",
    symbols::UNCHANGED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    message
  );
}

/// Print what happened to the license file at the tree root.
pub fn print_license_file_outcome(outcome: &LicenseFileOutcome, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let would = if dry_run { "would be " } else { "" };
  match outcome {
    LicenseFileOutcome::Created { path } => println!(
      "{} License text {}written to {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      would,
      path.display()
    ),
    LicenseFileOutcome::AlreadyPresent { path } => println!(
      "{} License file already detected: {}",
      symbols::UNCHANGED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      path.display()
    ),
    LicenseFileOutcome::Removed { path } => println!(
      "{} License file {}removed: {}",
      symbols::REMOVED.if_supports_color(Stream::Stdout, |s| s.red()),
      would,
      path.display()
    ),
    LicenseFileOutcome::NotFound => println!(
      "{} License file not found",
      symbols::UNCHANGED.if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
  }
}

/// Print the processing summary.
///
/// Format: "Summary: X changed, Y unchanged, Z skipped"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let changed = summary.files_changed();
  let unchanged = summary.already_licensed + summary.without_header;

  let changed_str = changed.if_supports_color(Stream::Stdout, |s| s.green());
  let unchanged_str = unchanged.if_supports_color(Stream::Stdout, |s| s.cyan());
  let skipped_str = summary.files_skipped.if_supports_color(Stream::Stdout, |s| s.dimmed());

  let mut summary_line = format!(
    "Summary: {} changed, {} unchanged, {} skipped",
    changed_str, unchanged_str, skipped_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// File reports grouped by outcome.
pub struct CategorizedReports<'a> {
  /// Files whose content was (or would be) rewritten
  pub changed: Vec<&'a FileReport>,
  /// Candidate files left alone
  pub unchanged: Vec<&'a FileReport>,
  /// Files that were not candidates or could not be decoded
  pub skipped: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut changed = Vec::new();
    let mut unchanged = Vec::new();
    let mut skipped = Vec::new();

    for report in reports {
      match report.action {
        FileAction::Added | FileAction::Removed => changed.push(report),
        FileAction::AlreadyLicensed | FileAction::NoHeader => unchanged.push(report),
        FileAction::Skipped => skipped.push(report),
      }
    }

    Self {
      changed,
      unchanged,
      skipped,
    }
  }
}

/// Make a path relative to the source root for display.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
