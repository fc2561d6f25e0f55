//! # File Filter Module
//!
//! This module contains components for deciding which of the collected files
//! are candidates for header insertion or removal: exclude globs, include
//! globs and the comment style table.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::comment_style::extension_of;
use crate::verbose_log;

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path to the file to check
  ///
  /// # Returns
  ///
  /// A `FilterResult` indicating whether the file should be processed and why
  /// not if applicable.
  fn should_process(&self, path: &Path) -> FilterResult;
}

fn compile_globs(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
  patterns
    .iter()
    .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid glob pattern: {p}")))
    .collect()
}

fn file_name(path: &Path) -> &str {
  path.file_name().and_then(|name| name.to_str()).unwrap_or_default()
}

/// Filter that skips files whose name matches any exclude glob.
pub struct ExcludeGlobFilter {
  patterns: Vec<glob::Pattern>,
}

impl ExcludeGlobFilter {
  /// Creates a new ExcludeGlobFilter from glob patterns.
  pub fn from_patterns(patterns: &[String]) -> Result<Self> {
    Ok(Self {
      patterns: compile_globs(patterns)?,
    })
  }
}

impl FileFilter for ExcludeGlobFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let name = file_name(path);
    match self.patterns.iter().find(|p| p.matches(name)) {
      Some(pattern) => {
        verbose_log!("Skipping: {} (matches exclude pattern {})", path.display(), pattern);
        FilterResult::skip(format!("Matches exclude pattern {pattern}"))
      }
      None => FilterResult::process(),
    }
  }
}

/// Filter that only lets through files whose name matches an include glob.
pub struct IncludeGlobFilter {
  patterns: Vec<glob::Pattern>,
}

impl IncludeGlobFilter {
  /// Creates a new IncludeGlobFilter from glob patterns.
  pub fn from_patterns(patterns: &[String]) -> Result<Self> {
    Ok(Self {
      patterns: compile_globs(patterns)?,
    })
  }
}

impl FileFilter for IncludeGlobFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let name = file_name(path);
    if self.patterns.iter().any(|p| p.matches(name)) {
      FilterResult::process()
    } else {
      FilterResult::skip("Does not match include patterns")
    }
  }
}

/// Filter that skips files whose extension has no comment style.
///
/// This applies even when an include glob names the file explicitly.
pub struct ExtensionFilter {
  known: BTreeSet<String>,
}

impl ExtensionFilter {
  /// Creates a new ExtensionFilter accepting the given extensions.
  pub fn new(known_extensions: impl IntoIterator<Item = String>) -> Self {
    Self {
      known: known_extensions.into_iter().collect(),
    }
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    match extension_of(path) {
      Some(ext) if self.known.contains(ext) => FilterResult::process(),
      Some(ext) => {
        verbose_log!("Skipping: {} (no comment style for .{})", path.display(), ext);
        FilterResult::skip(format!("No comment style for extension .{ext}"))
      }
      None => FilterResult::skip("No file extension"),
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        return result;
      }
    }
    FilterResult::process()
  }
}

/// Constructs the candidate filter used by the processor.
///
/// # Parameters
///
/// * `exclude_files` - Globs on file names to skip
/// * `include_files` - Globs on file names to consider
/// * `known_extensions` - Extensions that have a comment style
///
/// # Errors
///
/// Fails if any glob pattern is invalid.
pub fn create_default_filter(
  exclude_files: &[String],
  include_files: &[String],
  known_extensions: Vec<String>,
) -> Result<CompositeFilter> {
  let filters: Vec<Box<dyn FileFilter>> = vec![
    Box::new(ExcludeGlobFilter::from_patterns(exclude_files)?),
    Box::new(IncludeGlobFilter::from_patterns(include_files)?),
    Box::new(ExtensionFilter::new(known_extensions)),
  ];
  Ok(CompositeFilter::new(filters))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_exclude_filter_matches_file_name() {
    let filter = ExcludeGlobFilter::from_patterns(&strings(&["*_gen.go", "setup.py"])).expect("valid globs");

    assert!(filter.should_process(Path::new("src/main.go")).should_process);
    let result = filter.should_process(Path::new("src/api_gen.go"));
    assert!(!result.should_process);
    assert!(result.reason.is_some());
    assert!(!filter.should_process(Path::new("deep/dir/setup.py")).should_process);
  }

  #[test]
  fn test_include_filter() {
    let filter = IncludeGlobFilter::from_patterns(&strings(&["*.py"])).expect("valid globs");
    assert!(filter.should_process(Path::new("a/b.py")).should_process);
    assert!(!filter.should_process(Path::new("a/b.rs")).should_process);
  }

  #[test]
  fn test_extension_filter_is_case_sensitive() {
    let filter = ExtensionFilter::new(strings(&["py", "c"]));
    assert!(filter.should_process(Path::new("x.py")).should_process);
    assert!(!filter.should_process(Path::new("x.PY")).should_process);
    assert!(!filter.should_process(Path::new("Makefile")).should_process);
  }

  #[test]
  fn test_unknown_extension_excluded_even_when_included() {
    let filter = create_default_filter(&[], &strings(&["*.txt", "*.py"]), strings(&["py"])).expect("valid globs");

    let result = filter.should_process(Path::new("notes.txt"));
    assert!(!result.should_process);
    assert_eq!(result.reason.as_deref(), Some("No comment style for extension .txt"));
    assert!(filter.should_process(Path::new("main.py")).should_process);
  }

  #[test]
  fn test_invalid_glob() {
    assert!(ExcludeGlobFilter::from_patterns(&strings(&["[abc"])).is_err());
  }

  #[test]
  fn test_composite_filter() {
    let mut composite = CompositeFilter::new(Vec::new());

    struct MockFilter;
    impl FileFilter for MockFilter {
      fn should_process(&self, path: &Path) -> FilterResult {
        if path.to_string_lossy().contains("pass") {
          FilterResult::process()
        } else {
          FilterResult::skip("Not a pass file")
        }
      }
    }

    composite.add_filter(Box::new(MockFilter));

    assert!(composite.should_process(Path::new("src/pass_test.rs")).should_process);
    assert!(!composite.should_process(Path::new("src/fail_test.rs")).should_process);
  }
}
