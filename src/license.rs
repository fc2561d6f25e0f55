//! # License Module
//!
//! This module defines the closed set of supported licenses and the
//! [`TemplateStore`] holding the header and license body template of each.
//!
//! The builtin templates are embedded in the binary. A templates directory
//! laid out as `headers/<license>.txt` and `licenses/<license>.txt` can
//! replace any of them.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use crate::templates::HeaderVars;

/// A supported license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
  /// FreeBSD (2-clause BSD) license
  #[value(name = "freebsd")]
  FreeBsd,
  /// New BSD (3-clause) license
  #[value(name = "bsdnew")]
  BsdNew,
  /// Original BSD (4-clause) license
  #[value(name = "bsdold")]
  BsdOld,
  /// MIT license
  #[value(name = "mit")]
  Mit,
  /// Apache License 2.0
  #[value(name = "apachev2")]
  ApacheV2,
  /// GNU General Public License v3
  #[value(name = "gplv3")]
  GplV3,
  /// Do What The Fuck You Want To Public License
  #[value(name = "wtfpl")]
  Wtfpl,
}

impl License {
  /// Every license, in the order header templates are tried during removal.
  pub const ALL: [License; 7] = [
    License::FreeBsd,
    License::BsdNew,
    License::BsdOld,
    License::Mit,
    License::ApacheV2,
    License::GplV3,
    License::Wtfpl,
  ];

  /// The identifier used on the command line and for template file names.
  pub const fn as_str(self) -> &'static str {
    match self {
      License::FreeBsd => "freebsd",
      License::BsdNew => "bsdnew",
      License::BsdOld => "bsdold",
      License::Mit => "mit",
      License::ApacheV2 => "apachev2",
      License::GplV3 => "gplv3",
      License::Wtfpl => "wtfpl",
    }
  }

  /// Whether the templates of this license use the organization variable.
  pub const fn requires_organization(self) -> bool {
    matches!(self, License::BsdNew | License::BsdOld)
  }

  const fn index(self) -> usize {
    self as usize
  }

  const fn builtin_pair(self) -> (&'static str, &'static str) {
    match self {
      License::FreeBsd => (
        include_str!("../templates/headers/freebsd.txt"),
        include_str!("../templates/licenses/freebsd.txt"),
      ),
      License::BsdNew => (
        include_str!("../templates/headers/bsdnew.txt"),
        include_str!("../templates/licenses/bsdnew.txt"),
      ),
      License::BsdOld => (
        include_str!("../templates/headers/bsdold.txt"),
        include_str!("../templates/licenses/bsdold.txt"),
      ),
      License::Mit => (
        include_str!("../templates/headers/mit.txt"),
        include_str!("../templates/licenses/mit.txt"),
      ),
      License::ApacheV2 => (
        include_str!("../templates/headers/apachev2.txt"),
        include_str!("../templates/licenses/apachev2.txt"),
      ),
      License::GplV3 => (
        include_str!("../templates/headers/gplv3.txt"),
        include_str!("../templates/licenses/gplv3.txt"),
      ),
      License::Wtfpl => (
        include_str!("../templates/headers/wtfpl.txt"),
        include_str!("../templates/licenses/wtfpl.txt"),
      ),
    }
  }
}

impl fmt::Display for License {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error raised when the substitution variables do not fit the license.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
  /// The license names an organization but none was given.
  #[error("organization required for: {license} (use --organization)")]
  OrganizationRequired { license: License },
}

/// Checks the substitution variables against the license requirements.
///
/// # Errors
///
/// Returns [`ValidationError::OrganizationRequired`] for `bsdnew` and `bsdold`
/// when the organization is empty.
pub fn validate_vars(license: License, vars: &HeaderVars) -> Result<(), ValidationError> {
  if license.requires_organization() && vars.organization.trim().is_empty() {
    return Err(ValidationError::OrganizationRequired { license });
  }
  Ok(())
}

/// Error raised while loading template overrides.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// An override file exists but could not be read.
  #[error("Failed to read template '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },
}

/// Header template and license body template of one license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePair {
  /// Template of the comment header prepended to source files
  pub header: String,
  /// Template of the full license text written to the tree root
  pub body: String,
}

/// Template pairs for every [`License`].
#[derive(Debug, Clone)]
pub struct TemplateStore {
  pairs: [TemplatePair; 7],
}

impl Default for TemplateStore {
  fn default() -> Self {
    Self::builtin()
  }
}

impl TemplateStore {
  /// Creates a store holding the embedded templates.
  pub fn builtin() -> Self {
    let pairs = License::ALL.map(|license| {
      let (header, body) = license.builtin_pair();
      TemplatePair {
        header: header.to_string(),
        body: body.to_string(),
      }
    });
    Self { pairs }
  }

  /// Creates a store from the embedded templates, replacing each one for
  /// which `dir` contains an override file.
  ///
  /// Missing override files are not an error; the builtin template is kept.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::ReadError`] if an override file exists but
  /// cannot be read as UTF-8 text.
  pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
    let mut store = Self::builtin();

    for license in License::ALL {
      let file_name = format!("{license}.txt");
      let pair = &mut store.pairs[license.index()];

      if let Some(header) = read_override(&dir.join("headers").join(&file_name))? {
        pair.header = header;
      }
      if let Some(body) = read_override(&dir.join("licenses").join(&file_name))? {
        pair.body = body;
      }
    }

    Ok(store)
  }

  /// The template pair of a license.
  pub const fn get(&self, license: License) -> &TemplatePair {
    &self.pairs[license.index()]
  }

  /// Header templates of every license, in [`License::ALL`] order.
  pub fn headers(&self) -> impl Iterator<Item = (License, &str)> {
    License::ALL
      .into_iter()
      .map(|license| (license, self.get(license).header.as_str()))
  }
}

fn read_override(path: &Path) -> Result<Option<String>, TemplateError> {
  if !path.is_file() {
    return Ok(None);
  }

  debug!("Using template override: {}", path.display());
  std::fs::read_to_string(path)
    .map(Some)
    .map_err(|source| TemplateError::ReadError {
      path: path.to_path_buf(),
      source,
    })
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_value_names_match_identifiers() {
    for license in License::ALL {
      let parsed = License::from_str(license.as_str(), false).expect("identifier should parse");
      assert_eq!(parsed, license);
    }
    assert!(License::from_str("gpl", false).is_err());
  }

  #[test]
  fn test_requires_organization() {
    let requiring: Vec<_> = License::ALL.into_iter().filter(|l| l.requires_organization()).collect();
    assert_eq!(requiring, vec![License::BsdNew, License::BsdOld]);
  }

  #[test]
  fn test_validate_vars() {
    let mut vars = HeaderVars {
      prog_name: "p".to_string(),
      year: "2025".to_string(),
      owner: "o".to_string(),
      organization: String::new(),
    };

    assert_eq!(
      validate_vars(License::BsdNew, &vars),
      Err(ValidationError::OrganizationRequired {
        license: License::BsdNew
      })
    );
    assert!(validate_vars(License::Mit, &vars).is_ok());

    vars.organization = "Acme".to_string();
    assert!(validate_vars(License::BsdOld, &vars).is_ok());
  }

  #[test]
  fn test_builtin_headers_mention_copyright() {
    let store = TemplateStore::builtin();
    for (license, header) in store.headers() {
      assert!(
        header.to_lowercase().contains("copyright"),
        "{license} header must trip the presence check"
      );
      assert!(header.contains("<owner>"), "{license} header should name the owner");
      assert!(!store.get(license).body.is_empty());
    }
  }

  #[test]
  fn test_organization_placeholder_only_in_bsd_headers() {
    let store = TemplateStore::builtin();
    for (license, header) in store.headers() {
      assert_eq!(header.contains("<organization>"), license.requires_organization());
    }
  }

  #[test]
  fn test_from_dir_overrides_present_files_only() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let headers = temp_dir.path().join("headers");
    std::fs::create_dir_all(&headers).expect("create headers dir");
    std::fs::write(headers.join("mit.txt"), "Copyright <year> <owner>, custom\n").expect("write override");

    let store = TemplateStore::from_dir(temp_dir.path()).expect("store should load");
    let builtin = TemplateStore::builtin();

    assert_eq!(store.get(License::Mit).header, "Copyright <year> <owner>, custom\n");
    assert_eq!(store.get(License::Mit).body, builtin.get(License::Mit).body);
    assert_eq!(store.get(License::GplV3), builtin.get(License::GplV3));
  }

  #[test]
  fn test_from_dir_rejects_unreadable_override() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let licenses = temp_dir.path().join("licenses");
    std::fs::create_dir_all(&licenses).expect("create licenses dir");
    std::fs::write(licenses.join("wtfpl.txt"), [0xff, 0xfe, 0x00]).expect("write override");

    let err = TemplateStore::from_dir(temp_dir.path()).expect_err("should fail");
    assert!(matches!(err, TemplateError::ReadError { .. }));
  }
}
