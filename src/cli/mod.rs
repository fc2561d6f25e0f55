//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with one subcommand per direction:
//! `add` stamps a license onto a tree, `rm` strips it again.

mod add;
mod rm;

use std::path::PathBuf;
use std::time::Instant;

pub use add::{AddArgs, run_add};
use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use rm::{RmArgs, run_rm};
use tracing::debug;

use crate::comment_style::{CommentFormatter, create_resolver};
use crate::config::load_config;
use crate::diff::DiffManager;
use crate::info_log;
use crate::license::TemplateStore;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_blank_line, print_changed_files, print_license_file_outcome, print_nothing_to_do,
  print_start_message, print_summary,
};
use crate::processor::{Operation, Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, ReportGenerator};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add MIT headers to every source file and write COPYING
  licensify add src/ MyProg \"Alice Smith\" mit

  # BSD licenses name an organization
  licensify add . MyProg Alice bsdnew -o \"Acme Corp\" -y 2020

  # Only Python files, skipping generated code and the vendor directory
  licensify add . MyProg Alice apachev2 -f \"*.py\" -x \"*_pb2.py\" -X vendor

  # Preview the changes without writing anything
  licensify add . MyProg Alice gplv3 --dry-run --show-diff

  # Strip the headers and COPYING again
  licensify rm .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Prepend a license header to every source file and write the license text
  Add(AddArgs),
  /// Remove license headers added by `add` and delete the license file
  Rm(RmArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Arguments shared by `add` and `rm`
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
  /// Directory containing source files
  #[arg(value_name = "SRC_DIR")]
  pub src_dir: PathBuf,

  /// File name globs to skip (e.g. "*_gen.go")
  #[arg(short = 'x', long, value_name = "GLOB", num_args = 1..)]
  pub exclude_files: Vec<String>,

  /// Directories to skip, with everything below them
  #[arg(short = 'X', long, value_name = "DIR", num_args = 1..)]
  pub exclude_dirs: Vec<PathBuf>,

  /// Also walk files and directories whose name starts with "."
  #[arg(short = 'i', long)]
  pub include_hidden: bool,

  /// Decide and report every change without writing anything
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of every changed file to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save a diff of every changed file to FILE
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of every visited file to FILE
  #[arg(long, value_name = "FILE")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .licensify.toml in SRC_DIR)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v per-file trail and debug logs, -vv trace logs)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Don't print what it's doing
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl CommonArgs {
  /// Sets up diagnostics and user-facing output for the run.
  fn init_output(&self) {
    init_tracing(self.quiet, self.verbose, self.colors.ansi_on_stderr());

    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();
  }
}

/// Runs an operation over the source tree and prints the outcome.
///
/// Everything that can be rejected up front (config file, template
/// overrides, organization, glob patterns, source directory) is checked
/// before the first file is touched.
fn run_operation(common: CommonArgs, operation: Operation, include_files: Vec<String>) -> Result<()> {
  let config = load_config(common.config.as_deref(), &common.src_dir, common.no_config)?;

  let templates = match config.as_ref().and_then(|c| c.templates_dir.as_deref()) {
    Some(dir) => {
      debug!("Loading template overrides from {}", dir.display());
      TemplateStore::from_dir(dir).with_context(|| format!("Failed to load templates from {}", dir.display()))?
    }
    None => TemplateStore::builtin(),
  };

  if config.as_ref().is_some_and(|c| c.has_overrides()) {
    debug!("Using configuration file for comment style overrides");
  }
  let formatter = CommentFormatter::with_resolver(create_resolver(config.as_ref()));

  let diff_manager = DiffManager::new(common.show_diff, common.save_diff);
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    templates,
    formatter,
    include_files,
    exclude_files: common.exclude_files,
    exclude_dirs: common.exclude_dirs,
    include_hidden: common.include_hidden,
    dry_run: common.dry_run,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(operation, common.src_dir)
  })?;

  let mode = processor.mode();
  let dry_run = processor.is_dry_run();

  let files = processor.collect_files()?;
  print_start_message(files.len(), mode, dry_run);

  let start_time = Instant::now();
  let result = processor.process_collected(&files)?;
  let elapsed = start_time.elapsed();

  let summary = ProcessingSummary::from_reports(&result.files, elapsed, dry_run);
  let categorized = CategorizedReports::from_reports(&result.files);
  let root = processor.src_dir();

  print_blank_line();
  if categorized.changed.is_empty() {
    print_nothing_to_do(mode);
  } else {
    print_changed_files(&categorized.changed, mode, dry_run, Some(root));
  }
  print_license_file_outcome(&result.license_file, dry_run);

  print_blank_line();
  print_summary(&summary);

  if let Some(ref output_path) = common.report_json {
    ReportGenerator::new(output_path).generate(&result.files, &summary, &result.license_file)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  Ok(())
}
