//! # Logging Module
//!
//! Two channels, kept apart:
//! - `tracing` events (`debug!`, `trace!`) for internal diagnostics, printed
//!   on stderr by the subscriber from [`init_tracing`] and filtered by
//!   `RUST_LOG` or the `-q`/`-v` flags
//! - the user-facing [`verbose_log!`](crate::verbose_log) trail (stderr, `-v`
//!   only) and [`info_log!`](crate::info_log) notices (stdout, silenced by
//!   `-q`)
//!
//! ```rust
//! use licensify::logging::{ColorMode, set_verbose};
//! use licensify::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("added header to {}", "example.py");
//! info_log!("Generated JSON report at {}", "report.json");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Prints a per-file trail line to stderr when `-v` is given.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints a notice to stdout unless `-q` is given.
///
/// Takes the same arguments as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an [`info_log!`](crate::info_log) message, yellow where colors are
/// supported.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
