//! Recursive inlining engine.
//!
//! The [`Inliner`] dispatches on the source file extension into one of four mutually
//! recursive handlers: HTML pulls in scripts, stylesheets and images, CSS pulls in imported
//! stylesheets and `url()` assets, JavaScript is only minified and everything else becomes a
//! data URI. Each handler resolves references against the file it is currently rewriting.

mod css;
mod data;
mod html;
mod js;

use std::fs;
use std::path::{Path, PathBuf};

use crate::asset_paths::{Resolution, absolutize, resolve_reference};
use crate::error::{InlineError, InlineResult};
use crate::minify::{Minifier, Passthrough, StandardMinifier};
use crate::options::InlineOptions;
use crate::policy::AssetInclusion;
use crate::report::{Action, ContentKind, LogReporter, NullReporter, ProgressEvent, Reporter};

/// Inline every local asset referenced by `content`, using the standard minifier and
/// reporting progress through the `log` facade.
pub fn inline_assets(
  destination: &Path,
  source: &Path,
  content: &[u8],
  options: &InlineOptions,
) -> InlineResult<String> {
  Inliner::new(options)
    .with_reporter(&LogReporter)
    .with_minifier(&StandardMinifier)
    .process(destination, source, content)
}

/// What to do with a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Decision {
  /// Replace the reference with the content of the file.
  Inline(PathBuf),
  /// Remove the reference.
  Purge,
  /// Leave the reference as authored.
  Keep,
}

/// Stylesheets currently being expanded, outermost first.
type ImportChain = Vec<PathBuf>;

/// Inlining engine bound to one set of options and collaborators.
pub struct Inliner<'a> {
  options: &'a InlineOptions,
  inclusion: &'a dyn AssetInclusion,
  reporter: &'a dyn Reporter,
  minifier: &'a dyn Minifier,
}

impl<'a> Inliner<'a> {
  /// Create an engine that reports nothing and never changes content beyond inlining.
  pub fn new(options: &'a InlineOptions) -> Self {
    Self {
      options,
      inclusion: &options.patterns,
      reporter: &NullReporter,
      minifier: &Passthrough,
    }
  }

  /// Route progress events to `reporter`.
  pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
    self.reporter = reporter;
    self
  }

  /// Use `minifier` whenever a `*min` option is enabled.
  pub fn with_minifier(mut self, minifier: &'a dyn Minifier) -> Self {
    self.minifier = minifier;
    self
  }

  /// Replace the pattern chain from the options with a custom selection.
  pub fn with_inclusion(mut self, inclusion: &'a dyn AssetInclusion) -> Self {
    self.inclusion = inclusion;
    self
  }

  /// Rewrite `content`, read from `source`, into a self-contained document.
  ///
  /// `source` decides the content type and is the base for every relative reference.
  /// `destination` is only used for diagnostics.
  pub fn process(&self, destination: &Path, source: &Path, content: &[u8]) -> InlineResult<String> {
    let source = absolutize(source);
    let kind = ContentKind::from_path(&source);
    log::debug!(
      "inlining {} ({}) for {}",
      source.display(),
      kind,
      destination.display()
    );

    match kind {
      ContentKind::Html => self.inline_html(&source, decode(&source, content)?),
      ContentKind::Css => {
        let text = decode(&source, content)?;
        let mut chain = vec![source.clone()];
        self.inline_css(&source, text, &mut chain)
      }
      ContentKind::Js => self.inline_js(&source, decode(&source, content)?.to_string()),
      ContentKind::Data => Ok(self.inline_data(&source, content)),
    }
  }

  /// Text flavour of [`Inliner::process`].
  pub fn process_str(&self, destination: &Path, source: &Path, content: &str) -> InlineResult<String> {
    self.process(destination, source, content.as_bytes())
  }

  fn decide(&self, base: &Path, url: &str) -> Decision {
    match resolve_reference(base, url) {
      Resolution::Skip => Decision::Keep,
      Resolution::Local(path) if self.inclusion.is_included(&path) => Decision::Inline(path),
      Resolution::Local(path) if self.options.purge => {
        log::debug!("purging reference to {}", path.display());
        Decision::Purge
      }
      Resolution::Local(path) => {
        log::debug!("leaving excluded reference to {}", path.display());
        Decision::Keep
      }
    }
  }

  fn report(
    &self,
    action: Action,
    kind: ContentKind,
    path: &Path,
    size_before: usize,
    size_after: Option<usize>,
  ) {
    self.reporter.report(&ProgressEvent {
      action,
      kind,
      path,
      size_before,
      size_after,
    });
  }

  fn minify(&self, kind: ContentKind, path: &Path, content: String) -> InlineResult<String> {
    let before = content.len();
    self.report(Action::Minifying, kind, path, before, None);
    let minified = self
      .minifier
      .minify(kind, &content)
      .map_err(|source| InlineError::Minify {
        kind,
        path: path.to_path_buf(),
        source,
      })?;
    self.report(Action::Minified, kind, path, before, Some(minified.len()));
    Ok(minified)
  }
}

fn decode<'c>(path: &Path, content: &'c [u8]) -> InlineResult<&'c str> {
  std::str::from_utf8(content).map_err(|_| InlineError::Encoding {
    path: path.to_path_buf(),
  })
}

fn read_bytes(path: &Path) -> InlineResult<Vec<u8>> {
  fs::read(path).map_err(|source| InlineError::Read {
    path: path.to_path_buf(),
    source,
  })
}

fn read_text(path: &Path) -> InlineResult<String> {
  let bytes = read_bytes(path)?;
  String::from_utf8(bytes).map_err(|_| InlineError::Encoding {
    path: path.to_path_buf(),
  })
}
