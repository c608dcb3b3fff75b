//! Resolved, immutable options for one inlining run.

use crate::error::InlineResult;
use crate::policy::PatternChain;

/// Options shared by every recursive step of a single run.
#[derive(Debug, Clone, Default)]
pub struct InlineOptions {
  /// Minify HTML output.
  pub htmlmin: bool,
  /// Minify CSS output.
  pub cssmin: bool,
  /// Minify JavaScript output.
  pub jsmin: bool,
  /// Ordered include/exclude chain matched against resolved asset paths.
  pub patterns: PatternChain,
  /// Remove references rejected by `patterns` instead of leaving them untouched.
  pub purge: bool,
}

impl InlineOptions {
  /// Replace the pattern chain with freshly compiled `patterns`.
  pub fn with_patterns<I, S>(mut self, patterns: I) -> InlineResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.patterns = PatternChain::new(patterns)?;
    Ok(self)
  }

  /// Enable or disable removal of rejected references.
  pub fn with_purge(mut self, purge: bool) -> Self {
    self.purge = purge;
    self
  }

  /// Enable minification for every content type.
  pub fn minify_all(mut self) -> Self {
    self.htmlmin = true;
    self.cssmin = true;
    self.jsmin = true;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_documented_values() {
    let options = InlineOptions::default();
    assert!(!options.htmlmin);
    assert!(!options.cssmin);
    assert!(!options.jsmin);
    assert!(!options.purge);
    assert_eq!(options.patterns.patterns(), [".+".to_string()]);
  }

  #[test]
  fn builder_helpers_compose() {
    let options = InlineOptions::default()
      .with_patterns(["!.+", r"\.css$"])
      .unwrap()
      .with_purge(true)
      .minify_all();
    assert!(options.purge && options.htmlmin && options.cssmin && options.jsmin);
    assert_eq!(options.patterns.patterns().len(), 2);
  }
}
