//! # Report Module
//!
//! This module records what happened to every visited file and writes the
//! JSON report requested with `--report-json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Information about a visited file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Why the file was skipped, if it was
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

impl FileReport {
  /// Creates a report for a file that was not skipped.
  pub const fn new(path: PathBuf, action: FileAction) -> Self {
    Self {
      path,
      action,
      reason: None,
    }
  }

  /// Creates a report for a skipped file.
  pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
    Self {
      path,
      action: FileAction::Skipped,
      reason: Some(reason.into()),
    }
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// A header was added to the file (or would be, in dry-run mode)
  Added,
  /// A header was removed from the file (or would be, in dry-run mode)
  Removed,
  /// The file already mentions a copyright; nothing was added
  AlreadyLicensed,
  /// No managed header was found to remove
  NoHeader,
  /// The file is not a candidate or could not be decoded
  Skipped,
}

/// Outcome of the license file step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LicenseFileOutcome {
  /// The license file was written
  Created {
    #[serde(with = "path_serialization")]
    path: PathBuf,
  },
  /// A license file was already present and was kept
  AlreadyPresent {
    #[serde(with = "path_serialization")]
    path: PathBuf,
  },
  /// The license file was deleted
  Removed {
    #[serde(with = "path_serialization")]
    path: PathBuf,
  },
  /// No license file was found to delete
  NotFound,
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary statistics for a run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files visited
  pub total_files: usize,
  /// Number of headers added
  pub headers_added: usize,
  /// Number of headers removed
  pub headers_removed: usize,
  /// Number of files left alone because they already mention a copyright
  pub already_licensed: usize,
  /// Number of files without a managed header to remove
  pub without_header: usize,
  /// Number of files skipped
  pub files_skipped: usize,
  /// Whether nothing was written
  pub dry_run: bool,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: std::time::Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the report was generated
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<i64>,
}

impl ProcessingSummary {
  /// Create a new ProcessingSummary initialized to zero
  pub fn new(processing_time: std::time::Duration, dry_run: bool) -> Self {
    Self {
      total_files: 0,
      headers_added: 0,
      headers_removed: 0,
      already_licensed: 0,
      without_header: 0,
      files_skipped: 0,
      dry_run,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Some(Local::now().timestamp()),
    }
  }

  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: std::time::Duration, dry_run: bool) -> Self {
    let mut summary = Self::new(processing_time, dry_run);

    summary.total_files = files.len();

    for file in files {
      match file.action {
        FileAction::Added => summary.headers_added += 1,
        FileAction::Removed => summary.headers_removed += 1,
        FileAction::AlreadyLicensed => summary.already_licensed += 1,
        FileAction::NoHeader => summary.without_header += 1,
        FileAction::Skipped => summary.files_skipped += 1,
      }
    }

    summary
  }

  /// Number of files whose content was (or would be) rewritten.
  pub const fn files_changed(&self) -> usize {
    self.headers_added + self.headers_removed
  }
}

/// Report Generator for writing JSON reports
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  /// Create a new report generator
  ///
  /// # Parameters
  ///
  /// * `output_path` - The path where the report will be saved
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Generate a report from a collection of file reports
  ///
  /// # Parameters
  ///
  /// * `files` - List of file reports to include
  /// * `summary` - Processing summary information
  /// * `license_file` - Outcome of the license file step
  ///
  /// # Returns
  ///
  /// `Ok(())` if the report was generated successfully, or an error if the
  /// report couldn't be written to disk.
  pub fn generate(
    &self,
    files: &[FileReport],
    summary: &ProcessingSummary,
    license_file: &LicenseFileOutcome,
  ) -> Result<()> {
    let content = render_json(files, summary, license_file)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}

/// Renders the JSON report document.
pub fn render_json(
  files: &[FileReport],
  summary: &ProcessingSummary,
  license_file: &LicenseFileOutcome,
) -> Result<String> {
  let report = serde_json::json!({
    "summary": summary,
    "license_file": license_file,
    "files": files,
  });

  Ok(serde_json::to_string_pretty(&report)?)
}
