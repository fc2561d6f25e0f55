//! # Processor Module
//!
//! This module contains the core functionality for walking a source tree,
//! adding or removing license headers, and writing or deleting the license
//! file at the root of the tree.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Header insertion (shebang aware) and removal
//! - [`file_collector`] - Directory traversal with hidden and excluded
//!   directory pruning
//!
//! The [`Processor`] struct is the main entry point for all file operations,
//! orchestrating the submodules to provide a cohesive API. Files are handled
//! one at a time: each is read, decided and conditionally written before the
//! next one is opened. The first I/O error aborts the run; files written
//! before it stay written.

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
pub use content_transformer::{ContentTransformer, split_shebang};
pub use file_collector::{FileCollector, absolutize_path, normalize_path};
pub use file_io::{FileContent, FileIO};
use tracing::{debug, trace};

use crate::comment_style::{CommentFormatter, extension_of};
use crate::diff::DiffManager;
use crate::file_filter::{CompositeFilter, FileFilter, create_default_filter};
use crate::license::{License, TemplateStore, validate_vars};
use crate::license_detection::{LicenseDetector, SimpleLicenseDetector};
use crate::report::{FileAction, FileReport, LicenseFileOutcome};
use crate::templates::{HeaderVars, RenderMode, render};
use crate::verbose_log;

/// Name of the license file written at the root of the tree.
pub const LICENSE_FILE_NAME: &str = "COPYING";

/// Root entries (compared upper-cased) that count as an existing license file.
pub const LICENSE_FILE_NAMES: [&str; 2] = ["COPYING", "LICENSE"];

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Insert headers and write the license file
  Add,
  /// Strip headers and delete the license file
  Remove,
}

/// What a run does, with the data it needs.
#[derive(Debug, Clone)]
pub enum Operation {
  /// Insert the header of `license`, rendered with `vars`.
  Add { license: License, vars: HeaderVars },
  /// Strip any managed header, whatever license and values it was written
  /// with.
  Remove,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub operation: Operation,
  pub src_dir: PathBuf,
  pub templates: TemplateStore,
  pub formatter: CommentFormatter,

  // Candidate selection
  /// Globs on file names to consider; empty means `*.<ext>` for every known
  /// extension
  pub include_files: Vec<String>,
  pub exclude_files: Vec<String>,
  pub exclude_dirs: Vec<PathBuf>,
  pub include_hidden: bool,

  // Behavior flags
  pub dry_run: bool,

  // Optional components
  pub diff_manager: Option<DiffManager>,
  pub license_detector: Option<Box<dyn LicenseDetector>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(Operation::Remove, src_dir)
  /// }
  /// ```
  pub fn new(operation: Operation, src_dir: PathBuf) -> Self {
    Self {
      operation,
      src_dir,
      templates: TemplateStore::builtin(),
      formatter: CommentFormatter::new(),
      include_files: Vec::new(),
      exclude_files: Vec::new(),
      exclude_dirs: Vec::new(),
      include_hidden: false,
      dry_run: false,
      diff_manager: None,
      license_detector: None,
    }
  }
}

/// Decision taken for the content of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
  /// The presence check found a copyright mention; nothing is inserted.
  AlreadyLicensed,
  /// New content with the header inserted.
  Insert(String),
  /// New content with the header stripped, and the license whose header
  /// template matched.
  Remove { content: String, license: License },
  /// No managed header was found; the file must not be written back.
  NoHeader,
}

impl FileOutcome {
  /// The report action for this outcome.
  pub const fn action(&self) -> FileAction {
    match self {
      FileOutcome::AlreadyLicensed => FileAction::AlreadyLicensed,
      FileOutcome::Insert(_) => FileAction::Added,
      FileOutcome::Remove { .. } => FileAction::Removed,
      FileOutcome::NoHeader => FileAction::NoHeader,
    }
  }

  /// The content to write back, if the file changes.
  pub fn new_content(&self) -> Option<&str> {
    match self {
      FileOutcome::Insert(content) | FileOutcome::Remove { content, .. } => Some(content),
      FileOutcome::AlreadyLicensed | FileOutcome::NoHeader => None,
    }
  }
}

/// Run-scoped rendering of the selected license.
enum Plan {
  Add { header: String, body: String },
  Remove,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
  /// One report per visited file, in traversal order
  pub files: Vec<FileReport>,
  /// What happened to the license file at the root
  pub license_file: LicenseFileOutcome,
}

/// Processor for adding and removing license headers in a tree.
///
/// The `Processor` is responsible for:
/// - Walking the source directory and selecting candidate files
/// - Deciding per file whether to insert, strip or leave the header
/// - Writing the new content (unless in dry-run mode) and showing diffs
/// - Creating or deleting the license file at the root
/// - Collecting report data about visited files
pub struct Processor {
  /// Absolute source directory
  src_dir: PathBuf,

  plan: Plan,

  /// Header templates, tried in order during removal
  templates: TemplateStore,

  transformer: ContentTransformer,
  collector: FileCollector,
  file_filter: CompositeFilter,
  license_detector: Box<dyn LicenseDetector>,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,

  /// Whether to decide and report without writing anything
  dry_run: bool,
}

impl Processor {
  /// Creates a new Processor instance from a ProcessorConfig.
  ///
  /// The header and license text are rendered here, once per run.
  ///
  /// # Errors
  ///
  /// Fails before touching any file if the source directory does not exist,
  /// the variables do not fit the license (e.g. no organization for `bsdnew`)
  /// or a glob pattern is invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let src_dir = absolutize_path(&config.src_dir)?;
    if !src_dir.is_dir() {
      bail!("Source directory does not exist: {}", config.src_dir.display());
    }

    let plan = match &config.operation {
      Operation::Add { license, vars } => {
        validate_vars(*license, vars)?;
        let pair = config.templates.get(*license);
        debug!("Rendering {} templates", license);
        Plan::Add {
          header: render(&pair.header, vars, RenderMode::Literal),
          body: render(&pair.body, vars, RenderMode::Literal),
        }
      }
      Operation::Remove => Plan::Remove,
    };

    let known_extensions = config.formatter.known_extensions();
    let include_files = if config.include_files.is_empty() {
      known_extensions.iter().map(|ext| format!("*.{ext}")).collect()
    } else {
      config.include_files
    };
    let file_filter = create_default_filter(&config.exclude_files, &include_files, known_extensions)?;

    Ok(Self {
      src_dir,
      plan,
      templates: config.templates,
      transformer: ContentTransformer::new(config.formatter),
      collector: FileCollector::new(&config.exclude_dirs, config.include_hidden)?,
      file_filter,
      license_detector: config
        .license_detector
        .unwrap_or_else(|| Box::new(SimpleLicenseDetector::new())),
      diff_manager: config.diff_manager.unwrap_or_default(),
      dry_run: config.dry_run,
    })
  }

  /// The absolute source directory.
  pub fn src_dir(&self) -> &Path {
    &self.src_dir
  }

  /// The direction of this run.
  pub const fn mode(&self) -> Mode {
    match self.plan {
      Plan::Add { .. } => Mode::Add,
      Plan::Remove => Mode::Remove,
    }
  }

  /// Whether this run writes nothing.
  pub const fn is_dry_run(&self) -> bool {
    self.dry_run
  }

  /// Collects every file under the source directory, excluded and hidden
  /// directories pruned.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    self.collector.collect(&self.src_dir)
  }

  /// Runs the whole operation: every file, then the license file.
  pub fn process(&self) -> Result<ProcessingResult> {
    let files = self.collect_files()?;
    self.process_collected(&files)
  }

  /// Runs the operation on already collected files, then the license file.
  pub fn process_collected(&self, files: &[PathBuf]) -> Result<ProcessingResult> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
      reports.push(self.process_file(path)?);
    }

    let license_file = self.apply_license_file()?;

    Ok(ProcessingResult {
      files: reports,
      license_file,
    })
  }

  /// Handles one file: filter, read, decide, and write if the content changes.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read or written.
  pub fn process_file(&self, path: &Path) -> Result<FileReport> {
    let filter_result = self.file_filter.should_process(path);
    if !filter_result.should_process {
      let reason = filter_result.reason.unwrap_or_default();
      trace!("Not a candidate: {} ({})", path.display(), reason);
      return Ok(FileReport::skipped(path.to_path_buf(), reason));
    }

    let Some(extension) = extension_of(path) else {
      return Ok(FileReport::skipped(path.to_path_buf(), "No file extension"));
    };

    let content = match FileIO::read_text(path)? {
      FileContent::Text(content) => content,
      FileContent::Binary => {
        verbose_log!("skipped {} (not valid UTF-8)", path.display());
        return Ok(FileReport::skipped(path.to_path_buf(), "Not valid UTF-8"));
      }
    };

    let outcome = self
      .decide(extension, &content)
      .with_context(|| format!("Failed to process {}", path.display()))?;

    match &outcome {
      FileOutcome::AlreadyLicensed => verbose_log!("header already found in {}", path.display()),
      FileOutcome::NoHeader => verbose_log!("no managed header found in {}", path.display()),
      FileOutcome::Insert(_) => verbose_log!("added header to {}", path.display()),
      FileOutcome::Remove { license, .. } => verbose_log!("removed {} header from {}", license, path.display()),
    }

    if let Some(new_content) = outcome.new_content() {
      self.diff_manager.display_diff(path, &content, new_content)?;
      if !self.dry_run {
        FileIO::write_file(path, new_content)?;
      }
    }

    Ok(FileReport::new(path.to_path_buf(), outcome.action()))
  }

  /// Decides what happens to the content of a file with the given extension.
  ///
  /// - Add: if the presence check fires, the file is left alone; otherwise
  ///   the wrapped header is inserted (after a shebang line, if any).
  /// - Remove: the header template of every license is tried in turn; the
  ///   first one found is stripped.
  ///
  /// # Errors
  ///
  /// Returns an error if the extension has no comment style.
  pub fn decide(&self, extension: &str, content: &str) -> Result<FileOutcome> {
    match &self.plan {
      Plan::Add { header, .. } => {
        if self.license_detector.has_license(content) {
          return Ok(FileOutcome::AlreadyLicensed);
        }
        let new_content = self.transformer.insert_header(content, extension, header)?;
        Ok(FileOutcome::Insert(new_content))
      }
      Plan::Remove => {
        for (license, template) in self.templates.headers() {
          if let Some(new_content) = self.transformer.remove_header(content, extension, template)? {
            return Ok(FileOutcome::Remove {
              content: new_content,
              license,
            });
          }
        }
        Ok(FileOutcome::NoHeader)
      }
    }
  }

  /// Creates (add) or deletes (remove) the license file at the root.
  ///
  /// Adding keeps any existing root file named `COPYING` or `LICENSE` (any
  /// case) and otherwise writes the rendered license text to `COPYING`.
  /// Removing deletes such a file if there is one.
  pub fn apply_license_file(&self) -> Result<LicenseFileOutcome> {
    let existing = find_license_file(&self.src_dir)?;

    match (&self.plan, existing) {
      (Plan::Add { .. }, Some(path)) => {
        verbose_log!("license file already detected: {}", path.display());
        Ok(LicenseFileOutcome::AlreadyPresent { path })
      }
      (Plan::Add { body, .. }, None) => {
        let path = self.src_dir.join(LICENSE_FILE_NAME);
        if !self.dry_run {
          FileIO::write_file(&path, body)?;
        }
        verbose_log!("added license text to {}", path.display());
        Ok(LicenseFileOutcome::Created { path })
      }
      (Plan::Remove, Some(path)) => {
        if !self.dry_run {
          FileIO::remove_file(&path)?;
        }
        verbose_log!("removed license file {}", path.display());
        Ok(LicenseFileOutcome::Removed { path })
      }
      (Plan::Remove, None) => {
        verbose_log!("license file not found in {}", self.src_dir.display());
        Ok(LicenseFileOutcome::NotFound)
      }
    }
  }
}

/// Finds the license file at the root of a tree.
///
/// Only regular files count. `COPYING` is preferred over `LICENSE`; names are
/// compared upper-cased, so `License` or `copying` are found too.
pub fn find_license_file(root: &Path) -> Result<Option<PathBuf>> {
  let mut candidates = Vec::new();
  for entry in std::fs::read_dir(root).with_context(|| format!("Failed to read directory {}", root.display()))? {
    let entry = entry.with_context(|| format!("Failed to read directory {}", root.display()))?;
    let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
    let name = entry.file_name().to_string_lossy().to_uppercase();
    if is_file && LICENSE_FILE_NAMES.contains(&name.as_str()) {
      candidates.push((name, entry.path()));
    }
  }

  candidates.sort();
  Ok(
    LICENSE_FILE_NAMES
      .iter()
      .find_map(|wanted| candidates.iter().find(|(name, _)| name.as_str() == *wanted))
      .map(|(_, path)| path.clone()),
  )
}
