//! # licensify
//!
//! Stamp a software license onto a source tree, or strip it again.

use anyhow::Result;
use licensify::cli::{Cli, Command, run_add, run_rm};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  match cli.command {
    Command::Add(args) => run_add(args),
    Command::Rm(args) => run_rm(args),
  }
}
