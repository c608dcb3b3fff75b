use std::path::Path;

use super::Inliner;
use crate::asset_paths::encode_data_uri;
use crate::report::{Action, ContentKind};

impl Inliner<'_> {
  /// Embed an arbitrary asset as a data URI.
  pub(super) fn inline_data(&self, path: &Path, content: &[u8]) -> String {
    let before = content.len();
    self.report(Action::Expanding, ContentKind::Data, path, before, None);
    let uri = encode_data_uri(path, content);
    self.report(Action::Expanded, ContentKind::Data, path, before, Some(uri.len()));
    uri
  }
}
