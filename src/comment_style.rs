//! # Comment Style Module
//!
//! This module maps file extensions to comment syntax and wraps rendered header
//! text in that syntax.
//!
//! The module includes:
//! - [`CommentStyle`], either a single-line marker or an open/close pair
//! - [`CommentStyleResolver`] implementations backed by the builtin table and,
//!   optionally, user configuration
//! - [`CommentFormatter`], which produces the exact block that is prepended to
//!   a file, and the regex pattern that matches such a block
//!
//! ## Example
//!
//! ```rust
//! use licensify::comment_style::CommentFormatter;
//!
//! let formatter = CommentFormatter::new();
//!
//! let block = formatter.wrap("sh", "Copyright 2025 Alice\n").unwrap();
//! assert_eq!(block, "# Copyright 2025 Alice\n\n");
//!
//! let block = formatter.wrap("c", "Copyright 2025 Alice\n").unwrap();
//! assert_eq!(block, "/*\nCopyright 2025 Alice\n*/\n\n");
//!
//! assert!(formatter.wrap("xyz", "Copyright").is_err());
//! ```

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use tracing::trace;

use crate::config::{CommentStyleConfig, Config};
use crate::templates::WILDCARD;
use crate::verbose_log;

/// Errors raised while wrapping or matching a header.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// No comment style is known for the extension.
  #[error("No comment style defined for extension '{extension}'")]
  UnknownExtension { extension: String },

  /// A header template produced a pattern the regex engine rejected.
  #[error("Failed to build header pattern: {0}")]
  InvalidPattern(#[from] regex::Error),
}

/// Comment syntax used to wrap a header for one file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
  /// Every line is prefixed with the marker, e.g. `#` or `--`.
  Line { marker: String },
  /// The block is enclosed between an opening and a closing marker, e.g.
  /// `/*` and `*/`.
  Block { open: String, close: String },
}

impl CommentStyle {
  /// Create a line-comment style.
  pub fn line(marker: &str) -> Self {
    Self::Line {
      marker: marker.to_string(),
    }
  }

  /// Create a block-comment style.
  pub fn block(open: &str, close: &str) -> Self {
    Self::Block {
      open: open.to_string(),
      close: close.to_string(),
    }
  }
}

impl From<&CommentStyleConfig> for CommentStyle {
  fn from(config: &CommentStyleConfig) -> Self {
    match (&config.line, &config.open, &config.close) {
      (Some(marker), _, _) => Self::line(marker),
      (None, Some(open), Some(close)) => Self::block(open, close),
      // Config::validate rejects every other shape before we get here.
      _ => Self::line(""),
    }
  }
}

/// Builtin extension table.
///
/// Extensions are matched case-sensitively, exactly as they appear after the
/// last `.` of a file name.
static BUILTIN_STYLES: LazyLock<HashMap<&'static str, CommentStyle>> = LazyLock::new(|| {
  let mut styles = HashMap::new();

  styles.insert("py", CommentStyle::block("\"\"\"", "\"\"\""));
  styles.insert("jsp", CommentStyle::block("<%--", "--%>"));
  styles.insert("rb", CommentStyle::block("=begin", "=end"));
  styles.insert("vb", CommentStyle::line("'"));
  styles.insert("hs", CommentStyle::block("{-", "-}"));
  styles.insert("ada", CommentStyle::line("--"));
  styles.insert("lua", CommentStyle::block("--[[", "--]]"));
  styles.insert("erl", CommentStyle::line("%"));
  styles.insert("ml", CommentStyle::block("(*", "*)"));

  for ext in [
    "c", "h", "cpp", "hpp", "cc", "cxx", "hxx", "js", "ts", "java", "kt", "php", "cs", "sql", "hla", "as", "m",
    "d", "scala", "go", "rs", "swift", "css",
  ] {
    styles.insert(ext, CommentStyle::block("/*", "*/"));
  }
  for ext in ["asm", "lisp", "scm", "lsp", "cloj", "el"] {
    styles.insert(ext, CommentStyle::line(";"));
  }
  for ext in ["pas", "pp", "lpr", "dpr", "p"] {
    styles.insert(ext, CommentStyle::block("{", "}"));
  }
  for ext in ["pl", "sh", "tcl", "bash", "zsh", "r", "yaml", "yml", "toml"] {
    styles.insert(ext, CommentStyle::line("#"));
  }
  for ext in ["f", "for", "f90", "f95"] {
    styles.insert(ext, CommentStyle::line("!"));
  }
  for ext in ["forth", "4th"] {
    styles.insert(ext, CommentStyle::line("\\"));
  }

  styles
});

/// Trait for resolving the comment style of a file extension.
///
/// A `None` result means the extension is not a candidate for header insertion
/// or removal.
pub trait CommentStyleResolver: Send + Sync {
  /// Resolve the comment style for an extension (without the leading dot).
  fn resolve(&self, extension: &str) -> Option<CommentStyle>;

  /// Every extension this resolver knows, sorted.
  fn known_extensions(&self) -> Vec<String>;
}

/// Resolver backed by the builtin extension table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl CommentStyleResolver for BuiltinResolver {
  fn resolve(&self, extension: &str) -> Option<CommentStyle> {
    BUILTIN_STYLES.get(extension).cloned()
  }

  fn known_extensions(&self) -> Vec<String> {
    let sorted: BTreeSet<&str> = BUILTIN_STYLES.keys().copied().collect();
    sorted.into_iter().map(str::to_string).collect()
  }
}

/// Resolver that checks user configuration first, then falls back to the
/// builtin table.
pub struct ConfigurableResolver {
  config: Arc<Config>,
}

impl std::fmt::Debug for ConfigurableResolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConfigurableResolver")
      .field("comment_styles", &self.config.comment_styles.len())
      .finish()
  }
}

impl ConfigurableResolver {
  /// Create a new configurable resolver with the given config.
  pub fn new(config: Config) -> Self {
    let overridden: BTreeSet<&str> = config.comment_styles.keys().map(String::as_str).collect();
    verbose_log!(
      "Using config comment style overrides for: {}",
      overridden.iter().map(|ext| format!(".{ext}")).collect::<Vec<_>>().join(", ")
    );
    Self {
      config: Arc::new(config),
    }
  }
}

impl CommentStyleResolver for ConfigurableResolver {
  fn resolve(&self, extension: &str) -> Option<CommentStyle> {
    if let Some(style) = self.config.comment_styles.get(extension) {
      trace!("Config comment style override for: .{}", extension);
      return Some(CommentStyle::from(style));
    }

    BuiltinResolver.resolve(extension)
  }

  fn known_extensions(&self) -> Vec<String> {
    let mut extensions: BTreeSet<String> = BuiltinResolver.known_extensions().into_iter().collect();
    extensions.extend(self.config.comment_styles.keys().cloned());
    extensions.into_iter().collect()
  }
}

/// Create a comment style resolver based on the provided configuration.
pub fn create_resolver(config: Option<&Config>) -> Box<dyn CommentStyleResolver> {
  match config {
    Some(cfg) if !cfg.comment_styles.is_empty() => Box::new(ConfigurableResolver::new(cfg.clone())),
    _ => Box::new(BuiltinResolver),
  }
}

/// Returns the extension used for comment style lookup, if the file has one.
pub fn extension_of(path: &Path) -> Option<&str> {
  path.extension().and_then(|ext| ext.to_str())
}

/// Wraps header text in the comment syntax of a file type.
///
/// The same wrapping routine builds both the block written to disk
/// ([`wrap`](Self::wrap)) and the pattern that finds that block again
/// ([`wrap_pattern`](Self::wrap_pattern)).
pub struct CommentFormatter {
  resolver: Box<dyn CommentStyleResolver>,
}

impl Default for CommentFormatter {
  fn default() -> Self {
    Self::new()
  }
}

impl CommentFormatter {
  /// Creates a formatter using the builtin extension table.
  pub fn new() -> Self {
    Self {
      resolver: Box::new(BuiltinResolver),
    }
  }

  /// Creates a formatter using a custom resolver.
  pub fn with_resolver(resolver: Box<dyn CommentStyleResolver>) -> Self {
    Self { resolver }
  }

  /// Whether the extension has a comment style.
  pub fn can_handle(&self, extension: &str) -> bool {
    self.resolver.resolve(extension).is_some()
  }

  /// Every extension with a comment style.
  pub fn known_extensions(&self) -> Vec<String> {
    self.resolver.known_extensions()
  }

  /// Wraps rendered header text for a file with the given extension.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::UnknownExtension`] if the extension has no comment
  /// style.
  pub fn wrap(&self, extension: &str, header_text: &str) -> Result<String, HeaderError> {
    let style = self.style_for(extension)?;
    Ok(format_with_comment_style(header_text, &style))
  }

  /// Wraps a header pattern (a template rendered in regex mode) for a file
  /// with the given extension. The comment markers are regex-escaped, the
  /// pattern text is used as is.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::UnknownExtension`] if the extension has no comment
  /// style.
  pub fn wrap_pattern(&self, extension: &str, header_pattern: &str) -> Result<String, HeaderError> {
    let style = self.style_for(extension)?;
    Ok(pattern_with_comment_style(header_pattern, &style))
  }

  fn style_for(&self, extension: &str) -> Result<CommentStyle, HeaderError> {
    self
      .resolver
      .resolve(extension)
      .ok_or_else(|| HeaderError::UnknownExtension {
        extension: extension.to_string(),
      })
  }
}

/// Formats header text with the given comment style.
///
/// - Line style: the text is trimmed, every line gets `<marker> ` in front,
///   and the block is followed by one blank line.
/// - Block style: `<open>\n<text><close>\n\n`, with the text kept untrimmed.
pub fn format_with_comment_style(header_text: &str, style: &CommentStyle) -> String {
  wrap_with(header_text, style, Emit::Verbatim)
}

/// Same as [`format_with_comment_style`], with the comment markers
/// regex-escaped so the result can be compiled as a pattern.
///
/// In line style, leading and trailing lines made of nothing but wildcards
/// are optional: with blank values they are trimmed away before wrapping.
pub fn pattern_with_comment_style(header_pattern: &str, style: &CommentStyle) -> String {
  wrap_with(header_pattern, style, Emit::Pattern)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
  Verbatim,
  Pattern,
}

impl Emit {
  fn marker(self, marker: &str) -> Cow<'_, str> {
    match self {
      Emit::Verbatim => Cow::Borrowed(marker),
      Emit::Pattern => Cow::Owned(regex::escape(marker)),
    }
  }
}

fn wrap_with(text: &str, style: &CommentStyle, emit: Emit) -> String {
  match style {
    CommentStyle::Line { marker } => {
      let prefix = format!("{} ", emit.marker(marker));
      let lines: Vec<&str> = text.trim().split('\n').collect();
      let (lead, tail) = match emit {
        Emit::Verbatim => (0, 0),
        Emit::Pattern => vanishing_edges(&lines),
      };
      let body_end = lines.len() - tail;

      let mut result: String = lines[..lead]
        .iter()
        .map(|line| format!("(?:{prefix}{line}\n)?"))
        .collect();
      let body = lines[lead..body_end]
        .iter()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n");
      result.push_str(&body);
      for line in &lines[body_end..] {
        result.push_str(&format!("(?:\n{prefix}{line})?"));
      }
      result.push_str("\n\n");
      result
    }
    CommentStyle::Block { open, close } => {
      format!("{}\n{}{}\n\n", emit.marker(open), text, emit.marker(close))
    }
  }
}

/// Counts the pattern lines at each end that render to whitespace when every
/// variable is blank. Returns `(0, 0)` if no line would survive.
fn vanishing_edges(lines: &[&str]) -> (usize, usize) {
  fn vanishes(line: &str) -> bool {
    line.replace(WILDCARD, "").trim().is_empty()
  }

  let lead = lines.iter().take_while(|line| vanishes(line)).count();
  if lead == lines.len() {
    return (0, 0);
  }
  let tail = lines.iter().rev().take_while(|line| vanishes(line)).count();
  (lead, tail)
}
