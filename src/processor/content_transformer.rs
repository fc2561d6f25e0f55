//! # Content Transformer Module
//!
//! This module rewrites file content: it prepends a wrapped header (after a
//! leading shebang line, if any) and strips a previously inserted header.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use crate::comment_style::{CommentFormatter, HeaderError};
use crate::license_detection::HeaderPattern;

/// Content transformation utilities for header processing.
///
/// The `ContentTransformer` handles:
/// - Keeping a shebang (`#!`) line above the inserted header
/// - Inserting the wrapped header block
/// - Removing the first wrapped instance of a header template
///
/// Removal patterns are compiled once per (extension, template) pair and
/// reused for every later file.
pub struct ContentTransformer {
  formatter: CommentFormatter,
  patterns: RefCell<HashMap<(String, String), HeaderPattern>>,
}

impl Default for ContentTransformer {
  fn default() -> Self {
    Self::new(CommentFormatter::new())
  }
}

impl ContentTransformer {
  /// Creates a new ContentTransformer wrapping headers with `formatter`.
  pub fn new(formatter: CommentFormatter) -> Self {
    Self {
      formatter,
      patterns: RefCell::new(HashMap::new()),
    }
  }

  /// Prepends a rendered header to file content.
  ///
  /// The header is wrapped in the comment syntax of `extension`. If the
  /// content starts with a `#!` line, the block goes right after that line;
  /// a shebang without a trailing newline gets one.
  ///
  /// # Parameters
  ///
  /// * `content` - The original file content
  /// * `extension` - The file extension, used to pick the comment style
  /// * `rendered_header` - The header template rendered in literal mode
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::UnknownExtension`] if the extension has no comment
  /// style.
  pub fn insert_header(&self, content: &str, extension: &str, rendered_header: &str) -> Result<String, HeaderError> {
    let block = self.formatter.wrap(extension, rendered_header)?;
    let (shebang, rest) = split_shebang(content);

    let mut result = String::with_capacity(content.len() + block.len() + 1);
    result.push_str(shebang);
    if !shebang.is_empty() && !shebang.ends_with('\n') {
      result.push('\n');
    }
    result.push_str(&block);
    result.push_str(rest);

    Ok(result)
  }

  /// Removes the first wrapped instance of a header template.
  ///
  /// The template is matched structurally, so a header rendered with any
  /// variable values is found. Everything before and after the matched block
  /// is kept byte-for-byte.
  ///
  /// # Returns
  ///
  /// The content without the header, or `None` if no instance was found (the
  /// caller must not write the file back in that case).
  ///
  /// # Errors
  ///
  /// Returns a [`HeaderError`] if the pattern cannot be built for the
  /// extension.
  pub fn remove_header(&self, content: &str, extension: &str, template: &str) -> Result<Option<String>, HeaderError> {
    let pattern = self.header_pattern(extension, template)?;

    Ok(pattern.find(content).map(|range| {
      trace!("Removing header at bytes {}..{}", range.start, range.end);
      let mut result = String::with_capacity(content.len() - range.len());
      result.push_str(&content[..range.start]);
      result.push_str(&content[range.end..]);
      result
    }))
  }

  fn header_pattern(&self, extension: &str, template: &str) -> Result<HeaderPattern, HeaderError> {
    let mut patterns = self.patterns.borrow_mut();
    let key = (extension.to_string(), template.to_string());
    if let Some(pattern) = patterns.get(&key) {
      return Ok(pattern.clone());
    }

    let pattern = HeaderPattern::new(&self.formatter, extension, template)?;
    patterns.insert(key, pattern.clone());
    Ok(pattern)
  }

  #[cfg(test)]
  fn cached_patterns(&self) -> usize {
    self.patterns.borrow().len()
  }
}

/// Splits content into its leading `#!` line (newline included, if present)
/// and the remainder. Content without a shebang yields an empty first part.
pub fn split_shebang(content: &str) -> (&str, &str) {
  if !content.starts_with("#!") {
    return ("", content);
  }

  match content.find('\n') {
    Some(pos) => content.split_at(pos + 1),
    None => (content, ""),
  }
}
