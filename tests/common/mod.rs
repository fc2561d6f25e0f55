#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use licensify::templates::HeaderVars;

/// Builds a `licensify` command isolated from any config in the environment.
pub fn licensify() -> Command {
  let mut cmd = Command::cargo_bin("licensify").expect("binary should be built");
  cmd.env_remove("LICENSIFY_CONFIG").env_remove("RUST_LOG");
  cmd
}

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads `relative` under `root` as text.
pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Variables used across the tests.
pub fn sample_vars() -> HeaderVars {
  HeaderVars {
    prog_name: "MyProg".to_string(),
    year: "2025".to_string(),
    owner: "Alice".to_string(),
    organization: "Acme".to_string(),
  }
}
