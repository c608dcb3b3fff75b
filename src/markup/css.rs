//! Regex recognisers for `@import` statements and `url()` references in stylesheets.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// `@import url(…)` or `@import "…"`, an optional media epilogue and the closing `;`.
pub fn import_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(concat!(
      r"@import\s+",
      r#"(?:url\((?:"([^"]*)"|'([^']*)'|(\S+?))\)|(?:"([^"]*)"|'([^']*)'))"#,
      r"(\s+[^;\r\n]+)?",
      r"\s*;",
    ))
    .expect("invalid @import regex")
  })
}

/// `url(…)` optionally followed by a `format(…)` hint and a list separator.
pub fn url_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(concat!(
      r#"\burl\((?:"([^"]*)"|'([^']*)'|(\S+?))\)"#,
      r#"(?:\s*format\((?:"([^"]*)"|'([^']*)'|(\S+?))\))?"#,
      r"(\s*,)?",
    ))
    .expect("invalid url() regex")
  })
}

fn first_group<'t>(captures: &Captures<'t>, groups: impl IntoIterator<Item = usize>) -> Option<&'t str> {
  groups
    .into_iter()
    .find_map(|index| captures.get(index))
    .map(|m| m.as_str())
}

/// An `@import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch<'t> {
  /// Complete statement including the trailing `;`.
  pub whole: &'t str,
  /// Imported URL as written.
  pub url: &'t str,
  /// Media query epilogue with its leading whitespace, e.g. `" screen"`.
  pub media: Option<&'t str>,
}

impl<'t> ImportMatch<'t> {
  /// Build a match from the captures of [`import_pattern`].
  pub fn from_captures(captures: &Captures<'t>) -> Self {
    Self {
      whole: captures.get(0).map_or("", |m| m.as_str()),
      url: first_group(captures, 1..=5).unwrap_or(""),
      media: captures.get(6).map(|m| m.as_str()),
    }
  }
}

/// A `url()` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch<'t> {
  /// Complete match including the format hint and separator.
  pub whole: &'t str,
  /// Referenced URL as written.
  pub url: &'t str,
  /// Value of a trailing `format(…)` hint.
  pub format: Option<&'t str>,
  /// Trailing `,` together with the whitespace before it.
  pub separator: Option<&'t str>,
}

impl<'t> UrlMatch<'t> {
  /// Build a match from the captures of [`url_pattern`].
  pub fn from_captures(captures: &Captures<'t>) -> Self {
    Self {
      whole: captures.get(0).map_or("", |m| m.as_str()),
      url: first_group(captures, 1..=3).unwrap_or(""),
      format: first_group(captures, 4..=6),
      separator: captures.get(7).map(|m| m.as_str()),
    }
  }

  /// Render the reference pointing at `embedded` instead, keeping hint and separator.
  pub fn render(&self, embedded: &str) -> String {
    let mut statement = format!("url(\"{embedded}\")");
    if let Some(format) = self.format.filter(|value| !value.is_empty()) {
      statement.push_str(&format!(" format(\"{format}\")"));
    }
    if let Some(separator) = self.separator {
      statement.push_str(separator);
    }
    statement
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn import(text: &str) -> ImportMatch<'_> {
    ImportMatch::from_captures(&import_pattern().captures(text).expect("import should match"))
  }

  fn url(text: &str) -> UrlMatch<'_> {
    UrlMatch::from_captures(&url_pattern().captures(text).expect("url should match"))
  }

  #[test]
  fn matches_import_shapes() {
    assert_eq!(import(r#"@import url("b.css");"#).url, "b.css");
    assert_eq!(import("@import url('b.css');").url, "b.css");
    assert_eq!(import("@import url(b.css);").url, "b.css");
    assert_eq!(import(r#"@import "b.css";"#).url, "b.css");
    assert_eq!(import("@import 'b.css' ;").url, "b.css");
  }

  #[test]
  fn captures_media_epilogue() {
    let found = import(r#"@import url("print.css") print, screen and (max-width: 10em);"#);
    assert_eq!(found.url, "print.css");
    assert_eq!(found.media, Some(" print, screen and (max-width: 10em)"));
    assert_eq!(import(r#"@import "a.css";"#).media, None);
  }

  #[test]
  fn matches_font_face_sources() {
    let text = r#"src: url("a.woff2") format("woff2"), url(a.ttf) format('truetype');"#;
    let found: Vec<UrlMatch<'_>> = url_pattern()
      .captures_iter(text)
      .map(|captures| UrlMatch::from_captures(&captures))
      .collect();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].url, "a.woff2");
    assert_eq!(found[0].format, Some("woff2"));
    assert_eq!(found[0].separator, Some(","));
    assert_eq!(found[1].url, "a.ttf");
    assert_eq!(found[1].format, Some("truetype"));
    assert_eq!(found[1].separator, None);
  }

  #[test]
  fn renders_with_hint_and_separator() {
    let found = url(r#"url('a.woff') format("woff") ,"#);
    assert_eq!(found.render("data:x"), r#"url("data:x") format("woff") ,"#);
    assert_eq!(url("url(a.png)").render("data:y"), r#"url("data:y")"#);
  }

  #[test]
  fn requires_word_boundary() {
    assert!(url_pattern().captures("myurl(a.png)").is_none());
  }
}
