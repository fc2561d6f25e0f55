//! # Add Command
//!
//! This module implements the `add` subcommand: prepend a license header to
//! every candidate source file and write the license text to `COPYING`.

use anyhow::Result;
use chrono::Datelike;
use clap::Args;

use super::{CommonArgs, run_operation};
use crate::license::{License, validate_vars};
use crate::processor::Operation;
use crate::templates::HeaderVars;

/// Arguments for the add command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Program name
  #[arg(value_name = "PROG_NAME")]
  pub prog_name: String,

  /// Copyright owner
  #[arg(value_name = "OWNER")]
  pub owner: String,

  /// License to apply
  #[arg(value_name = "LICENSE", value_enum)]
  pub license: License,

  /// Organization of the owner, required for bsdnew and bsdold
  #[arg(short, long)]
  pub organization: Option<String>,

  /// Copyright year [default: current year]
  #[arg(short, long)]
  pub year: Option<String>,

  /// File name globs to consider [default: "*.<ext>" for every known
  /// extension]
  #[arg(short = 'f', long, value_name = "GLOB", num_args = 1..)]
  pub files: Vec<String>,
}

impl AddArgs {
  /// The substitution variables for the header and license templates.
  fn header_vars(&self) -> HeaderVars {
    HeaderVars {
      prog_name: self.prog_name.clone(),
      year: self
        .year
        .clone()
        .unwrap_or_else(|| chrono::Local::now().year().to_string()),
      owner: self.owner.clone(),
      organization: self.organization.clone().unwrap_or_default(),
    }
  }
}

/// Run the add command with the given arguments
pub fn run_add(args: AddArgs) -> Result<()> {
  args.common.init_output();

  let vars = args.header_vars();
  validate_vars(args.license, &vars)?;

  let operation = Operation::Add {
    license: args.license,
    vars,
  };
  run_operation(args.common, operation, args.files)
}
