//! # Templates Module
//!
//! This module renders header and license templates. A template is plain text
//! containing placeholder tokens for four fixed variables:
//!
//! | Placeholder       | Upper-cased variant     |
//! |-------------------|-------------------------|
//! | `<prog_name>`     | `<prog_name_upper>`     |
//! | `<year>`          | `<year_upper>`          |
//! | `<owner>`         | `<owner_upper>`         |
//! | `<organization>`  | `<organization_upper>`  |
//!
//! Rendering happens in one of two modes:
//! - [`RenderMode::Literal`] substitutes the values, producing the text that is
//!   written to disk.
//! - [`RenderMode::Regex`] escapes the template and turns every placeholder into
//!   a wildcard group, producing a pattern that matches the template rendered
//!   with *any* values.
//!
//! ## Example
//!
//! ```rust
//! use licensify::templates::{HeaderVars, RenderMode, render};
//!
//! let vars = HeaderVars {
//!   prog_name: "MyProg".to_string(),
//!   year: "2025".to_string(),
//!   owner: "Alice".to_string(),
//!   organization: String::new(),
//! };
//!
//! let text = render("Copyright <year> <owner_upper>", &vars, RenderMode::Literal);
//! assert_eq!(text, "Copyright 2025 ALICE");
//!
//! let pattern = render("Copyright (c) <year>", &vars, RenderMode::Regex);
//! assert_eq!(pattern, r"Copyright \(c\) (.*?)");
//! ```

use tracing::trace;

/// Non-greedy wildcard that stands in for a placeholder in regex mode.
///
/// `.` does not match a line break, so a variable can never swallow a line.
pub const WILDCARD: &str = "(.*?)";

/// Names of the substitution variables, as they appear between `<` and `>`.
pub const VARIABLE_NAMES: [&str; 4] = ["prog_name", "year", "owner", "organization"];

/// Values for the four substitution variables of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderVars {
  /// Name of the program being licensed
  pub prog_name: String,
  /// Copyright year
  pub year: String,
  /// Copyright owner
  pub owner: String,
  /// Organization of the owner (may be empty for most licenses)
  pub organization: String,
}

impl HeaderVars {
  /// Returns the value bound to a variable name from [`VARIABLE_NAMES`].
  fn value_of(&self, name: &str) -> &str {
    match name {
      "prog_name" => &self.prog_name,
      "year" => &self.year,
      "owner" => &self.owner,
      "organization" => &self.organization,
      _ => "",
    }
  }
}

/// How placeholders are substituted by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
  /// Replace placeholders with the variable values.
  Literal,
  /// Escape the template for use in a regex and replace placeholders with
  /// [`WILDCARD`].
  Regex,
}

/// Renders a template with the given variables.
///
/// In [`RenderMode::Literal`] every `<name>` becomes the value and every
/// `<name_upper>` becomes the upper-cased value. In [`RenderMode::Regex`] the
/// template is first passed through [`regex::escape`]; the placeholders survive
/// escaping untouched (none of `<`, `>`, `_` or ASCII letters are regex
/// metacharacters) and are then replaced with [`WILDCARD`]. The values in
/// `vars` are ignored in that mode.
///
/// # Parameters
///
/// * `template` - The template text
/// * `vars` - Values for the substitution variables
/// * `mode` - Literal substitution or regex pattern construction
///
/// # Returns
///
/// The rendered text, or a regex pattern string in [`RenderMode::Regex`].
pub fn render(template: &str, vars: &HeaderVars, mode: RenderMode) -> String {
  let mut rendered = match mode {
    RenderMode::Literal => template.to_string(),
    RenderMode::Regex => regex::escape(template),
  };

  for name in VARIABLE_NAMES {
    let plain = format!("<{name}>");
    let upper = format!("<{name}_upper>");

    match mode {
      RenderMode::Literal => {
        let value = vars.value_of(name);
        rendered = rendered.replace(&plain, value).replace(&upper, &value.to_uppercase());
      }
      RenderMode::Regex => {
        rendered = rendered.replace(&plain, WILDCARD).replace(&upper, WILDCARD);
      }
    }
  }

  trace!("Rendered template ({:?}): {} bytes", mode, rendered.len());

  rendered
}

#[cfg(test)]
mod tests {
  use regex::Regex;

  use super::*;

  fn vars() -> HeaderVars {
    HeaderVars {
      prog_name: "MyProg".to_string(),
      year: "2025".to_string(),
      owner: "Alice".to_string(),
      organization: "Acme Corp".to_string(),
    }
  }

  #[test]
  fn test_literal_replaces_every_variable() {
    let template = "<prog_name> (c) <year> <owner> of <organization>";
    let rendered = render(template, &vars(), RenderMode::Literal);
    assert_eq!(rendered, "MyProg (c) 2025 Alice of Acme Corp");
  }

  #[test]
  fn test_literal_upper_variant() {
    let template = "<owner> / <owner_upper> / <organization_upper>";
    let rendered = render(template, &vars(), RenderMode::Literal);
    assert_eq!(rendered, "Alice / ALICE / ACME CORP");
  }

  #[test]
  fn test_literal_replaces_all_occurrences() {
    let rendered = render("<year>-<year>", &vars(), RenderMode::Literal);
    assert_eq!(rendered, "2025-2025");
  }

  #[test]
  fn test_literal_leaves_unknown_tokens() {
    let template = "see <http://www.gnu.org/licenses/>";
    let rendered = render(template, &vars(), RenderMode::Literal);
    assert_eq!(rendered, template);
  }

  #[test]
  fn test_regex_mode_escapes_metacharacters() {
    let rendered = render("(c) 1+1 [x] <year>.", &vars(), RenderMode::Regex);
    assert_eq!(rendered, r"\(c\) 1\+1 \[x\] (.*?)\.");
  }

  #[test]
  fn test_regex_mode_matches_any_values() {
    let template = "Copyright (c) <year>, <owner> <ORG>\n";
    let pattern = render(template, &HeaderVars::default(), RenderMode::Regex);
    let re = Regex::new(&pattern).expect("pattern should compile");

    let other = HeaderVars {
      prog_name: "X".to_string(),
      year: "1999".to_string(),
      owner: "Bob (the builder)".to_string(),
      organization: String::new(),
    };
    let literal = render(template, &other, RenderMode::Literal);
    assert!(re.is_match(&literal));
    assert!(re.is_match(&render(template, &vars(), RenderMode::Literal)));
  }

  #[test]
  fn test_regex_wildcard_does_not_cross_lines() {
    let pattern = render("a <owner> b", &vars(), RenderMode::Regex);
    let re = Regex::new(&format!("^{pattern}$")).expect("pattern should compile");
    assert!(re.is_match("a Alice b"));
    assert!(!re.is_match("a Alice\nSmith b"));
  }
}
