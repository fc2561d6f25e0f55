//! # Rm Command
//!
//! This module implements the `rm` subcommand: strip every header written by
//! `add`, whatever license and values it was rendered with, and delete the
//! license file.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::{CommonArgs, run_operation};
use crate::license::License;
use crate::processor::Operation;

/// Arguments for the rm command
#[derive(Args, Debug, Clone)]
pub struct RmArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Program name (accepted for symmetry with `add`; not used for matching)
  #[arg(value_name = "PROG_NAME")]
  pub prog_name: Option<String>,

  /// Copyright owner (accepted for symmetry with `add`; not used for matching)
  #[arg(value_name = "OWNER")]
  pub owner: Option<String>,

  /// License (accepted for symmetry with `add`; every license is matched)
  #[arg(value_name = "LICENSE", value_enum)]
  pub license: Option<License>,
}

/// Run the rm command with the given arguments
pub fn run_rm(args: RmArgs) -> Result<()> {
  args.common.init_output();

  if args.prog_name.is_some() || args.owner.is_some() || args.license.is_some() {
    debug!("Ignoring prog_name/owner/license for removal; every header template is matched");
  }

  run_operation(args.common, Operation::Remove, Vec::new())
}
