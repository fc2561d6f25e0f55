//! # Configuration Module
//!
//! This module provides configuration support for licensify, allowing users to
//! add or override comment styles for file extensions and to point the tool at
//! a directory of replacement templates.
//!
//! Configuration can be specified in a `.licensify.toml` file in the source
//! directory or via the `LICENSIFY_CONFIG` environment variable.
//!
//! ```toml
//! templates-dir = "license-templates"
//!
//! [comment-styles]
//! nix = { line = "#" }
//! xyz = { open = "/*", close = "*/" }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".licensify.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSIFY_CONFIG";

/// User-defined comment style configuration.
///
/// Either `line` is set (every header line gets that marker), or both `open`
/// and `close` are set (the header is enclosed between them).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CommentStyleConfig {
  /// Line comment marker (e.g., "#" or "--").
  #[serde(default)]
  pub line: Option<String>,

  /// Opening marker of a block comment (e.g., "/*").
  #[serde(default)]
  pub open: Option<String>,

  /// Closing marker of a block comment (e.g., "*/").
  #[serde(default)]
  pub close: Option<String>,
}

impl CommentStyleConfig {
  /// Create a new line-comment style.
  pub fn line(marker: &str) -> Self {
    Self {
      line: Some(marker.to_string()),
      open: None,
      close: None,
    }
  }

  /// Create a new block-comment style.
  pub fn block(open: &str, close: &str) -> Self {
    Self {
      line: None,
      open: Some(open.to_string()),
      close: Some(close.to_string()),
    }
  }
}

/// Main configuration struct for licensify.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
  /// Custom comment styles for file extensions.
  /// Keys are file extensions without the leading dot (e.g., "nix", "xyz").
  #[serde(default, rename = "comment-styles")]
  pub comment_styles: HashMap<String, CommentStyleConfig>,

  /// Directory with `headers/<license>.txt` and `licenses/<license>.txt`
  /// files replacing the builtin templates. Relative paths are resolved
  /// against the directory containing the config file.
  #[serde(default, rename = "templates-dir")]
  pub templates_dir: Option<PathBuf>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A comment style configuration is invalid.
  #[error("Invalid comment style for '{extension}': {message}")]
  InvalidCommentStyle { extension: String, message: String },
}

impl Config {
  /// Reads, parses and validates a configuration file. A relative
  /// `templates-dir` is resolved against the directory of the file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    if let Some(dir) = config.templates_dir.take() {
      let base = path.parent().unwrap_or_else(|| Path::new("."));
      config.templates_dir = Some(if dir.is_absolute() { dir } else { base.join(dir) });
    }

    debug!(
      "Loaded {} comment style overrides from {}",
      config.comment_styles.len(),
      path.display()
    );

    Ok(config)
  }

  /// Every style sets either a non-empty `line`, or non-empty `open` and
  /// `close`; extension keys carry no leading dot.
  fn validate(&self) -> Result<(), ConfigError> {
    for (ext, style) in &self.comment_styles {
      let invalid = |message: &str| ConfigError::InvalidCommentStyle {
        extension: ext.clone(),
        message: message.to_string(),
      };

      if ext.starts_with('.') {
        return Err(invalid("extension should not include leading dot"));
      }

      match (&style.line, &style.open, &style.close) {
        (Some(marker), None, None) if !marker.is_empty() => {}
        (Some(_), None, None) => return Err(invalid("line marker cannot be empty")),
        (None, Some(open), Some(close)) if !open.is_empty() && !close.is_empty() => {}
        (None, Some(_), Some(_)) => return Err(invalid("open and close markers cannot be empty")),
        (Some(_), _, _) => return Err(invalid("line cannot be combined with open/close")),
        (None, _, _) => return Err(invalid("expected either line, or both open and close")),
      }
    }

    Ok(())
  }

  /// Check if the configuration has any comment style overrides.
  pub fn has_overrides(&self) -> bool {
    !self.comment_styles.is_empty()
  }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
  /// Named with `--config`; must exist.
  Flag(PathBuf),
  /// Named by the `LICENSIFY_CONFIG` environment variable.
  Env(PathBuf),
  /// `.licensify.toml` at the root of the source tree.
  SrcDir(PathBuf),
}

impl ConfigSource {
  /// Path of the configuration file.
  pub fn path(&self) -> &Path {
    match self {
      Self::Flag(path) | Self::Env(path) | Self::SrcDir(path) => path,
    }
  }
}

/// Finds the configuration file for a run.
///
/// `--config` wins and is returned even if the file is missing, so that
/// loading reports it. Then `LICENSIFY_CONFIG` (ignored with a warning if it
/// points nowhere), then `.licensify.toml` in `src_dir`.
pub fn discover_config_path(explicit_path: Option<&Path>, src_dir: &Path) -> Option<ConfigSource> {
  if let Some(path) = explicit_path {
    return Some(ConfigSource::Flag(path.to_path_buf()));
  }

  if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
    let path = PathBuf::from(env_path);
    if path.is_file() {
      return Some(ConfigSource::Env(path));
    }
    warn!("{} points to a missing file: {}", CONFIG_ENV_VAR, path.display());
  }

  let local_config = src_dir.join(DEFAULT_CONFIG_FILENAME);
  local_config.is_file().then_some(ConfigSource::SrcDir(local_config))
}

/// Loads the configuration for a run, or `None` if there is no config file or
/// `no_config` is set.
pub fn load_config(explicit_path: Option<&Path>, src_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    debug!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  let Some(source) = discover_config_path(explicit_path, src_dir) else {
    debug!("No config file found");
    return Ok(None);
  };

  verbose_log!("Using config file {}", source.path().display());
  let config = Config::load(source.path())
    .with_context(|| format!("Failed to load config from {}", source.path().display()))?;
  Ok(Some(config))
}
