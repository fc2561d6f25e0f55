//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations.

use std::path::Path;

use anyhow::{Context, Result};

/// Content of a file as read by [`FileIO::read_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
  /// The file is valid UTF-8 text.
  Text(String),
  /// The file is not valid UTF-8 and must be left alone.
  Binary,
}

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// Files that are not valid UTF-8 are reported as [`FileContent::Binary`]
  /// instead of failing, so the caller can skip them.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read.
  pub fn read_text(path: &Path) -> Result<FileContent> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(match String::from_utf8(bytes) {
      Ok(text) => FileContent::Text(text),
      Err(_) => FileContent::Binary,
    })
  }

  /// Write file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }

  /// Delete a file.
  pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).with_context(|| format!("Failed to remove file: {}", path.display()))
  }
}
