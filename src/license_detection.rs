//! # License Detection Module
//!
//! This module contains the two header checks used by the processor:
//!
//! - A presence heuristic ([`LicenseDetector`]) that guards against inserting a
//!   second header into a file that already has one.
//! - A structural matcher ([`HeaderPattern`]) that recognizes a previously
//!   inserted header of a given template, whatever values its variables were
//!   rendered with. Removal is driven by this matcher.

use regex::Regex;
use tracing::trace;

use crate::comment_style::{CommentFormatter, HeaderError};
use crate::templates::{HeaderVars, RenderMode, render};

/// Number of leading lines inspected by [`SimpleLicenseDetector`].
pub const HEADER_SCAN_LINES: usize = 40;

/// Trait for license detectors.
///
/// Implementations of this trait are responsible for determining whether a file
/// already contains a license header based on its content.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  ///
  /// # Parameters
  ///
  /// * `content` - The file content to check
  ///
  /// # Returns
  ///
  /// `true` if the content appears to have a license header, `false` otherwise.
  fn has_license(&self, content: &str) -> bool;
}

/// Default implementation of license detection.
///
/// This detector reports a header when any of the first
/// [`HEADER_SCAN_LINES`] lines contains the word "copyright",
/// case-insensitively. It may report a header for a file that only mentions
/// copyright in a comment, which makes the tool skip that file.
pub struct SimpleLicenseDetector;

impl SimpleLicenseDetector {
  /// Creates a new SimpleLicenseDetector.
  pub const fn new() -> Self {
    SimpleLicenseDetector
  }
}

impl Default for SimpleLicenseDetector {
  fn default() -> Self {
    Self::new()
  }
}

impl LicenseDetector for SimpleLicenseDetector {
  fn has_license(&self, content: &str) -> bool {
    content
      .lines()
      .take(HEADER_SCAN_LINES)
      .any(|line| line.to_lowercase().contains("copyright"))
  }
}

/// Compiled pattern matching one wrapped header template for one file type.
///
/// The pattern is built by rendering the template in [`RenderMode::Regex`] and
/// wrapping the result with the same routine that wraps headers on insertion,
/// so it matches exactly the blocks this tool writes for that template.
#[derive(Debug, Clone)]
pub struct HeaderPattern {
  regex: Regex,
}

impl HeaderPattern {
  /// Builds the structural pattern for a header template and extension.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::UnknownExtension`] if the extension has no comment
  /// style, or [`HeaderError::InvalidPattern`] if the pattern does not compile.
  pub fn new(formatter: &CommentFormatter, extension: &str, template: &str) -> Result<Self, HeaderError> {
    let header_pattern = render(template, &HeaderVars::default(), RenderMode::Regex);
    let wrapped = formatter.wrap_pattern(extension, &header_pattern)?;
    trace!("Header pattern for .{}: {}", extension, wrapped);

    let regex = Regex::new(&wrapped)?;
    Ok(Self { regex })
  }

  /// Whether the content contains a wrapped instance of the header.
  pub fn is_match(&self, content: &str) -> bool {
    self.regex.is_match(content)
  }

  /// Byte range of the first wrapped instance of the header, if any.
  pub fn find(&self, content: &str) -> Option<std::ops::Range<usize>> {
    self.regex.find(content).map(|m| m.range())
  }
}
