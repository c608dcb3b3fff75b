use std::path::Path;

use super::Inliner;
use crate::error::InlineResult;
use crate::report::{Action, ContentKind};

impl Inliner<'_> {
  /// Scripts carry no nested references; they are only minified on request.
  pub(super) fn inline_js(&self, path: &Path, content: String) -> InlineResult<String> {
    let before = content.len();
    self.report(Action::Expanding, ContentKind::Js, path, before, None);

    let content = if self.options.jsmin {
      self.minify(ContentKind::Js, path, content)?
    } else {
      content
    };

    self.report(Action::Expanded, ContentKind::Js, path, before, Some(content.len()));
    Ok(content)
  }
}
