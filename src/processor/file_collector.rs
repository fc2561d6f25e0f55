//! # File Collector Module
//!
//! This module walks the source tree and collects the files to consider,
//! pruning excluded and hidden directories.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::verbose_log;

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Recursive traversal in a stable (file name) order
/// - Pruning directories listed by exact path
/// - Skipping hidden files and directories unless asked not to
///
/// Symlinks are not followed.
pub struct FileCollector {
  /// Absolute, normalized directories whose subtrees are skipped
  exclude_dirs: Vec<PathBuf>,
  /// Whether entries whose name starts with `.` are walked
  include_hidden: bool,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `exclude_dirs` - Directories to prune; relative paths are resolved
  ///   against the current directory
  /// * `include_hidden` - Whether to walk hidden entries
  pub fn new(exclude_dirs: &[PathBuf], include_hidden: bool) -> Result<Self> {
    let exclude_dirs = exclude_dirs
      .iter()
      .map(|dir| absolutize_path(dir))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      exclude_dirs,
      include_hidden,
    })
  }

  /// Traverses a directory recursively and collects all regular files.
  ///
  /// # Parameters
  ///
  /// * `root` - The directory to traverse
  ///
  /// # Returns
  ///
  /// The absolute paths of the files found, in traversal order.
  ///
  /// # Errors
  ///
  /// Fails on the first directory that cannot be read.
  pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
    let root = absolutize_path(root)?;
    debug!("Scanning directory: {}", root.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    let walker = WalkDir::new(&root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| self.should_descend(entry));

    for entry in walker {
      let entry = entry.with_context(|| format!("Failed to walk directory {}", root.display()))?;
      if entry.file_type().is_dir() {
        verbose_log!("searching {}", entry.path().display());
      } else if entry.file_type().is_file() {
        files.push(entry.into_path());
      }
    }

    debug!("Found {} files in {}ms", files.len(), start_time.elapsed().as_millis());

    Ok(files)
  }

  fn should_descend(&self, entry: &DirEntry) -> bool {
    if entry.depth() > 0 && !self.include_hidden && is_hidden(entry) {
      verbose_log!("skipped hidden {}", entry.path().display());
      return false;
    }

    if entry.file_type().is_dir() && self.exclude_dirs.iter().any(|dir| dir == entry.path()) {
      verbose_log!("skipped excluded directory {}", entry.path().display());
      return false;
    }

    true
  }
}

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// Converts a potentially relative path to an absolute, lexically normalized
/// path.
///
/// # Parameters
///
/// * `path` - The path to absolutize
///
/// # Returns
///
/// The absolute path, with `.` and `..` components resolved.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    current_dir.join(path)
  };
  Ok(normalize_path(&absolute))
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root is dropped; leading `..` of a
/// relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match normalized.components().next_back() {
        Some(Component::Normal(_)) => {
          normalized.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        _ => normalized.push(component.as_os_str()),
      },
      other => normalized.push(other.as_os_str()),
    }
  }

  normalized
}
