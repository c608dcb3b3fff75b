//! Error type shared by the inlining engine.

use std::path::PathBuf;

use crate::minify::MinifyError;
use crate::report::ContentKind;

/// Result alias used throughout the inlining engine.
pub type InlineResult<T> = Result<T, InlineError>;

/// Errors that abort an inlining run.
#[derive(Debug)]
pub enum InlineError {
  /// A referenced asset (or the top-level source) could not be read.
  Read {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// A text asset (HTML, CSS or JavaScript) was not valid UTF-8.
  Encoding {
    /// Path of the offending asset.
    path: PathBuf,
  },
  /// A stylesheet imports itself, directly or through a chain of imports.
  CyclicImport {
    /// Stylesheet that was about to be imported a second time.
    path: PathBuf,
  },
  /// An inclusion pattern is not a valid regular expression.
  Pattern {
    /// Pattern as it was supplied, including a leading `!`.
    pattern: String,
    /// Source regex error.
    source: regex::Error,
  },
  /// The inclusion pattern list was empty.
  EmptyPattern,
  /// The minifier rejected the content.
  Minify {
    /// Content type that was being minified.
    kind: ContentKind,
    /// File the content came from.
    path: PathBuf,
    /// Source minifier error.
    source: MinifyError,
  },
}

impl std::fmt::Display for InlineError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Read { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Encoding { path } => {
        write!(f, "{} is not valid UTF-8", path.display())
      }
      Self::CyclicImport { path } => {
        write!(f, "cyclic @import of {}", path.display())
      }
      Self::Pattern { pattern, source } => {
        write!(f, "invalid pattern \"{}\": {}", pattern, source)
      }
      Self::EmptyPattern => f.write_str("at least one inclusion pattern is required"),
      Self::Minify { kind, path, source } => {
        write!(f, "failed to minify {} in {}: {}", kind, path.display(), source)
      }
    }
  }
}

impl std::error::Error for InlineError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Read { source, .. } => Some(source),
      Self::Pattern { source, .. } => Some(source),
      Self::Minify { source, .. } => Some(source),
      Self::Encoding { .. } | Self::CyclicImport { .. } | Self::EmptyPattern => None,
    }
  }
}
