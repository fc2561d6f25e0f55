use std::io::IsTerminal;
use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode shared by [`verbose_log!`](crate::verbose_log) and
/// [`info_log!`](crate::info_log).
///
/// This is initialized to `Normal`.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies this mode to every `if_supports_color` call in the process.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }

  /// Whether diagnostics written to stderr should carry ANSI escapes.
  pub fn ansi_on_stderr(self) -> bool {
    match self {
      ColorMode::Auto => std::io::stderr().is_terminal(),
      ColorMode::Never => false,
      ColorMode::Always => true,
    }
  }
}

/// Initializes the `tracing` subscriber that writes diagnostics to stderr.
///
/// `RUST_LOG` takes precedence. Otherwise the level follows the flags:
/// `-q` gives `error`, no flag gives `warn`, `-v` gives `debug` and `-vv` or
/// more gives `trace`. Calling this more than once is harmless.
pub fn init_tracing(quiet: bool, verbose: u8, ansi: bool) {
  let default_level = if quiet {
    "error"
  } else {
    match verbose {
      0 => "warn",
      1 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .with_ansi(ansi)
    .try_init();
}

/// Sets the global output mode to verbose.
///
/// When verbose logging is enabled, the [`verbose_log!`](crate::verbose_log)
/// macro will output messages to stderr.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Sets the global output mode to quiet, suppressing
/// [`info_log!`](crate::info_log) and the end-of-run summary.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
///
/// # Returns
///
/// `true` if verbose logging is enabled, `false` otherwise.
pub fn is_verbose() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
pub fn is_quiet() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Quiet)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_explicit_color_modes_decide_stderr_ansi() {
    assert!(ColorMode::Always.ansi_on_stderr());
    assert!(!ColorMode::Never.ansi_on_stderr());
  }

  #[test]
  fn test_output_mode_from_unknown_value_is_normal() {
    assert_eq!(OutputMode::from_u8(7), OutputMode::Normal);
    assert_eq!(OutputMode::from_u8(2), OutputMode::Verbose);
  }
}
