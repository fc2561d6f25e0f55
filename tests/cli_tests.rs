mod common;

use std::fs;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{licensify, read_file, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_add_then_rm_restores_tree() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.py", "print(1)\n")?;

  licensify()
    .args(["add"])
    .arg(root)
    .args(["MyProg", "Alice", "mit"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Added header to 1 file"));

  let content = read_file(root, "a.py")?;
  assert!(content.starts_with("\"\"\"\nMyProg: Copyright (c) "));
  assert!(content.contains("Alice\n"));
  assert!(content.ends_with("\"\"\"\n\nprint(1)\n"));

  let license = read_file(root, "COPYING")?;
  assert!(license.contains("Alice"));
  assert!(license.contains("MIT"));

  licensify()
    .args(["rm"])
    .arg(root)
    .args(["MyProg", "Alice", "mit"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed header from 1 file"));

  assert_eq!(read_file(root, "a.py")?, "print(1)\n");
  assert!(!root.join("COPYING").exists());
  Ok(())
}

#[test]
fn test_add_is_idempotent() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "src/main.c", "int main(void) { return 0; }\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "gplv3", "-y", "2020"])
    .assert()
    .success();
  let first = read_file(root, "src/main.c")?;
  assert!(first.starts_with("/*\nMyProg\nCopyright (C) 2020 Alice\n"));

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Bob", "mit"])
    .assert()
    .success()
    .stdout(predicate::str::contains("All candidate files already have a header."))
    .stdout(predicate::str::contains("License file already detected"));

  assert_eq!(read_file(root, "src/main.c")?, first);
  Ok(())
}

#[test]
fn test_add_keeps_shebang_first() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "run.sh", "#!/bin/sh\necho hi\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "wtfpl", "-y", "2021"])
    .assert()
    .success();

  let content = read_file(root, "run.sh")?;
  assert!(content.starts_with("#!/bin/sh\n# MyProg\n# Copyright (C) 2021 Alice\n"));
  assert!(content.ends_with("more details.\n\necho hi\n"));

  licensify().arg("rm").arg(root).assert().success();
  assert_eq!(read_file(root, "run.sh")?, "#!/bin/sh\necho hi\n");
  Ok(())
}

#[test]
fn test_files_glob_without_comment_style_is_skipped() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "notes.txt", "plain text\n")?;
  write_file(root, "a.py", "print(1)\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit", "-f", "*.txt"])
    .assert()
    .success()
    .stdout(predicate::str::contains("0 changed"));

  assert_eq!(read_file(root, "notes.txt")?, "plain text\n");
  assert_eq!(read_file(root, "a.py")?, "print(1)\n");
  Ok(())
}

#[test]
fn test_exclude_files_and_dirs() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "keep.go", "package main\n")?;
  write_file(root, "api_gen.go", "package main\n")?;
  write_file(root, "vendor/lib.go", "package lib\n")?;
  write_file(root, ".hidden/x.go", "package x\n")?;

  licensify()
    .current_dir(root)
    .args(["add", ".", "MyProg", "Alice", "apachev2", "-x", "*_gen.go", "-X", "vendor"])
    .assert()
    .success();

  assert!(read_file(root, "keep.go")?.starts_with("/*\nMyProg\n"));
  assert_eq!(read_file(root, "api_gen.go")?, "package main\n");
  assert_eq!(read_file(root, "vendor/lib.go")?, "package lib\n");
  assert_eq!(read_file(root, ".hidden/x.go")?, "package x\n");
  Ok(())
}

#[test]
fn test_include_hidden() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, ".hidden/x.go", "package x\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit", "-i"])
    .assert()
    .success();

  assert!(read_file(root, ".hidden/x.go")?.contains("MyProg: Copyright"));
  Ok(())
}

#[test]
fn test_existing_license_file_is_kept() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE", "my own terms\n")?;
  write_file(root, "a.rs", "fn main() {}\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit"])
    .assert()
    .success();

  assert_eq!(read_file(root, "LICENSE")?, "my own terms\n");
  assert!(!root.join("COPYING").exists());
  Ok(())
}

#[test]
fn test_rm_without_headers_reports_not_found() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.rs", "fn main() {}\n")?;

  licensify()
    .arg("rm")
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("No managed headers found."))
    .stdout(predicate::str::contains("License file not found"));

  assert_eq!(read_file(root, "a.rs")?, "fn main() {}\n");
  Ok(())
}

#[test]
fn test_bsd_requires_organization() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.c", "int x;\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "bsdnew"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("organization required"));

  assert_eq!(read_file(root, "a.c")?, "int x;\n");
  assert!(!root.join("COPYING").exists());

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "bsdnew", "-o", "Acme"])
    .assert()
    .success();
  assert!(read_file(root, "a.c")?.contains("Copyright (c) "));
  assert!(read_file(root, "a.c")?.contains(", Alice, Acme\n"));
  Ok(())
}

#[test]
fn test_missing_src_dir_fails() {
  licensify()
    .args(["add", "/nonexistent/licensify-tree", "MyProg", "Alice", "mit"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Source directory does not exist"));
}

#[test]
fn test_quiet_prints_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.py", "print(1)\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit", "-q"])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  assert!(read_file(root, "a.py")?.contains("Alice"));
  Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.py", "print(1)\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit", "--dry-run", "--show-diff"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Would add header to 1 file"))
    .stderr(predicate::str::contains("+MyProg: Copyright (c)"));

  assert_eq!(read_file(root, "a.py")?, "print(1)\n");
  assert!(!root.join("COPYING").exists());
  Ok(())
}

#[test]
fn test_save_diff_writes_file() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path().join("tree");
  write_file(&root, "a.lua", "print(1)\n")?;
  let diff_path = temp_dir.path().join("changes.diff");

  licensify()
    .arg("add")
    .arg(&root)
    .args(["MyProg", "Alice", "mit", "--dry-run", "--save-diff"])
    .arg(&diff_path)
    .assert()
    .success();

  let diff = fs::read_to_string(&diff_path)?;
  assert!(diff.contains("+--[["));
  assert!(diff.contains("a.lua"));
  Ok(())
}

#[test]
fn test_report_json() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path().join("tree");
  write_file(&root, "a.py", "print(1)\n")?;
  write_file(&root, "b.py", "# Copyright 2001 Someone\n")?;
  write_file(&root, "c.txt", "text\n")?;
  let report_path = temp_dir.path().join("report.json");

  licensify()
    .arg("add")
    .arg(&root)
    .args(["MyProg", "Alice", "mit", "--report-json"])
    .arg(&report_path)
    .assert()
    .success();

  let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
  assert_eq!(report["summary"]["headers_added"], 1);
  assert_eq!(report["summary"]["already_licensed"], 1);
  assert_eq!(report["summary"]["files_skipped"], 1);
  assert_eq!(report["license_file"]["status"], "created");

  let files = report["files"].as_array().expect("files array");
  assert_eq!(files.len(), 3);
  assert_eq!(files[0]["action"], "added");
  assert_eq!(files[1]["action"], "already_licensed");
  assert_eq!(files[2]["action"], "skipped");
  Ok(())
}

#[test]
fn test_config_comment_style_for_new_extension() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, ".licensify.toml", "[comment-styles]\nnix = { line = \"#\" }\n")?;
  write_file(root, "default.nix", "{ pkgs }: pkgs.hello\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit"])
    .assert()
    .success();
  assert!(read_file(root, "default.nix")?.starts_with("# MyProg: Copyright (c) "));

  licensify().arg("rm").arg(root).assert().success();
  assert_eq!(read_file(root, "default.nix")?, "{ pkgs }: pkgs.hello\n");

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit", "--no-config"])
    .assert()
    .success();
  assert_eq!(read_file(root, "default.nix")?, "{ pkgs }: pkgs.hello\n");
  Ok(())
}

#[test]
fn test_config_templates_dir() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path().join("tree");
  let config_dir = temp_dir.path().join("conf");
  write_file(&config_dir, "licensify.toml", "templates-dir = \"tpl\"\n")?;
  write_file(&config_dir, "tpl/headers/mit.txt", "Copyright <year> <owner> of <prog_name>\n")?;
  write_file(&config_dir, "tpl/licenses/mit.txt", "Custom terms for <owner>\n")?;
  write_file(&root, "a.rs", "fn main() {}\n")?;

  licensify()
    .arg("add")
    .arg(&root)
    .args(["MyProg", "Alice", "mit", "-y", "1999", "--config"])
    .arg(config_dir.join("licensify.toml"))
    .assert()
    .success();

  assert_eq!(
    read_file(&root, "a.rs")?,
    "/*\nCopyright 1999 Alice of MyProg\n*/\n\nfn main() {}\n"
  );
  assert_eq!(read_file(&root, "COPYING")?, "Custom terms for Alice\n");

  licensify()
    .arg("rm")
    .arg(&root)
    .arg("--config")
    .arg(config_dir.join("licensify.toml"))
    .assert()
    .success();
  assert_eq!(read_file(&root, "a.rs")?, "fn main() {}\n");
  Ok(())
}

#[test]
fn test_invalid_config_fails_before_writing() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, ".licensify.toml", "[comment-styles]\nnix = { line = \"#\", open = \"/*\" }\n")?;
  write_file(root, "a.py", "print(1)\n")?;

  licensify()
    .arg("add")
    .arg(root)
    .args(["MyProg", "Alice", "mit"])
    .assert()
    .failure();

  assert_eq!(read_file(root, "a.py")?, "print(1)\n");
  Ok(())
}

#[test]
fn test_unknown_license_is_rejected() {
  licensify()
    .args(["add", ".", "MyProg", "Alice", "gplv2"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_explicit_config_fails() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.py", "print(1)\n")?;

  licensify()
    .arg("rm")
    .arg(root)
    .arg("--config")
    .arg(root.join("nope.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load config"));
  Ok(())
}
