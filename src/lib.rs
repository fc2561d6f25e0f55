//! # licensify
//!
//! A tool that stamps a software license onto a source tree.
//!
//! `licensify add` prepends a license header, wrapped in the comment syntax of
//! each file's language, to every recognized source file and writes the full
//! license text to `COPYING` at the root of the tree. `licensify rm` strips
//! those headers again and deletes the license file.
//!
//! ## Features
//!
//! * Seven licenses: `freebsd`, `bsdnew`, `bsdold`, `mit`, `apachev2`,
//!   `gplv3` and `wtfpl`
//! * Comment styles for dozens of languages, overridable per extension in
//!   `.licensify.toml`
//! * Files that already mention a copyright near the top are left alone
//! * Headers are removed whatever values they were rendered with
//! * Dry runs, unified diffs and JSON reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use licensify::license::License;
//! use licensify::processor::{Operation, Processor, ProcessorConfig};
//! use licensify::templates::HeaderVars;
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let vars = HeaderVars {
//!         prog_name: "MyProg".to_string(),
//!         year: "2025".to_string(),
//!         owner: "Alice Smith".to_string(),
//!         organization: String::new(),
//!     };
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         dry_run: true,
//!         ..ProcessorConfig::new(Operation::Add { license: License::Mit, vars }, PathBuf::from("src"))
//!     })?;
//!
//!     let result = processor.process()?;
//!     for report in &result.files {
//!         println!("{}: {:?}", report.path.display(), report.action);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Walking a tree and adding or removing headers
//! * [`templates`] - Variable substitution in header and license templates
//! * [`comment_style`] - Wrapping a header in a language's comment syntax
//! * [`license`] - The supported licenses and their templates
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod license;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
