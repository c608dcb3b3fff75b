//! Include/exclude policy deciding which referenced assets get inlined.

use std::path::Path;

use regex::Regex;

use crate::error::{InlineError, InlineResult};

/// Trait describing selection filters for inlined assets.
pub trait AssetInclusion {
  /// Returns `true` when the asset at `path` should be inlined.
  fn is_included(&self, path: &Path) -> bool;
}

/// Default pattern list: include everything.
pub const DEFAULT_PATTERN: &str = ".+";

/// A single, optionally negated, regular expression of a [`PatternChain`].
#[derive(Debug, Clone)]
struct SignedPattern {
  regex: Regex,
  negated: bool,
}

/// Ordered chain of `!`-negatable regular expressions evaluated last-match-wins.
///
/// The decision starts out as `true` when the first pattern is negated, so a chain such as
/// `["!\\.png$"]` reads as "everything except PNG files" while `["\\.css$"]` reads as
/// "only stylesheets". Every later pattern that matches overrides the decision.
#[derive(Debug, Clone)]
pub struct PatternChain {
  source: Vec<String>,
  patterns: Vec<SignedPattern>,
}

impl PatternChain {
  /// Compile a chain from raw patterns.
  pub fn new<I, S>(patterns: I) -> InlineResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let source: Vec<String> = patterns.into_iter().map(Into::into).collect();
    if source.is_empty() {
      return Err(InlineError::EmptyPattern);
    }

    let patterns = source
      .iter()
      .map(|raw| {
        let (negated, expression) = match raw.strip_prefix('!') {
          Some(rest) => (true, rest),
          None => (false, raw.as_str()),
        };
        Regex::new(expression)
          .map(|regex| SignedPattern { regex, negated })
          .map_err(|source| InlineError::Pattern {
            pattern: raw.clone(),
            source,
          })
      })
      .collect::<InlineResult<Vec<_>>>()?;

    Ok(Self { source, patterns })
  }

  /// Split a comma-separated pattern list as accepted on the command line.
  pub fn parse_list(list: &str) -> InlineResult<Self> {
    Self::new(list.split(','))
  }

  /// Raw patterns in evaluation order.
  pub fn patterns(&self) -> &[String] {
    &self.source
  }

  /// Evaluate the chain against a path string.
  pub fn matches(&self, candidate: &str) -> bool {
    let initial = self.patterns.first().is_some_and(|pattern| pattern.negated);
    self
      .patterns
      .iter()
      .fold(initial, |decision, pattern| {
        if pattern.regex.is_match(candidate) {
          !pattern.negated
        } else {
          decision
        }
      })
  }
}

impl Default for PatternChain {
  fn default() -> Self {
    Self {
      source: vec![DEFAULT_PATTERN.to_string()],
      patterns: vec![SignedPattern {
        regex: Regex::new(DEFAULT_PATTERN).expect("invalid default pattern"),
        negated: false,
      }],
    }
  }
}

impl AssetInclusion for PatternChain {
  fn is_included(&self, path: &Path) -> bool {
    self.matches(&path.to_string_lossy())
  }
}
