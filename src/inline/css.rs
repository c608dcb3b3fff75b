use std::path::Path;

use same_file::is_same_file;

use super::{Decision, ImportChain, Inliner, read_bytes, read_text};
use crate::error::{InlineError, InlineResult};
use crate::markup::{ImportMatch, UrlMatch, import_pattern, try_replace_merged, url_pattern};
use crate::report::{Action, ContentKind};

impl Inliner<'_> {
  /// Expand `@import` statements and `url()` references of a stylesheet.
  ///
  /// `path` is the file the stylesheet text belongs to; `chain` holds the stylesheets that
  /// are currently being expanded further up the stack.
  pub(super) fn inline_css(
    &self,
    path: &Path,
    content: &str,
    chain: &mut ImportChain,
  ) -> InlineResult<String> {
    let before = content.len();
    self.report(Action::Expanding, ContentKind::Css, path, before, None);

    // One pass over both constructs: imported text already had its own `url()`s resolved
    // against the imported file and must not be rescanned here.
    let content = try_replace_merged(content, &[import_pattern(), url_pattern()], |index, captures| {
      if index == 0 {
        self.inline_import(path, ImportMatch::from_captures(captures), chain)
      } else {
        self.inline_url(path, UrlMatch::from_captures(captures))
      }
    })?;

    let content = if self.options.cssmin {
      self.minify(ContentKind::Css, path, content)?
    } else {
      content
    };

    self.report(Action::Expanded, ContentKind::Css, path, before, Some(content.len()));
    Ok(content)
  }

  fn inline_import(
    &self,
    path: &Path,
    statement: ImportMatch<'_>,
    chain: &mut ImportChain,
  ) -> InlineResult<Option<String>> {
    match self.decide(path, statement.url) {
      Decision::Keep => Ok(None),
      Decision::Purge => Ok(Some(String::new())),
      Decision::Inline(target) => {
        let css = self.import_stylesheet(&target, chain)?;
        Ok(Some(match statement.media {
          Some(media) => format!("@media{media} {{{css}}}"),
          None => css,
        }))
      }
    }
  }

  fn inline_url(&self, path: &Path, reference: UrlMatch<'_>) -> InlineResult<Option<String>> {
    match self.decide(path, reference.url) {
      Decision::Keep => Ok(None),
      Decision::Purge => Ok(Some(String::new())),
      Decision::Inline(target) => {
        let data = read_bytes(&target)?;
        Ok(Some(reference.render(&self.inline_data(&target, &data))))
      }
    }
  }

  fn import_stylesheet(&self, target: &Path, chain: &mut ImportChain) -> InlineResult<String> {
    if chain.iter().any(|ancestor| same_stylesheet(ancestor, target)) {
      return Err(InlineError::CyclicImport {
        path: target.to_path_buf(),
      });
    }

    let text = read_text(target)?;
    chain.push(target.to_path_buf());
    let result = self.inline_css(target, &text, chain);
    chain.pop();
    result
  }
}

fn same_stylesheet(left: &Path, right: &Path) -> bool {
  is_same_file(left, right).unwrap_or_else(|_| left == right)
}
