use std::path::{Path, PathBuf};

use super::filters::is_skip_scheme;

/// Outcome of resolving a raw reference URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// The reference points at a local file.
  Local(PathBuf),
  /// The reference uses a skip-scheme and must be left untouched.
  Skip,
}

/// Strip the query string and fragment from a URL so it can be used as a file name.
pub fn url_to_file_name(url: &str) -> &str {
  let without_query = url.split_once('?').map_or(url, |(head, _)| head);
  without_query
    .split_once('#')
    .map_or(without_query, |(head, _)| head)
}

/// Resolve `url` against the directory of the file that references it.
///
/// `base_file` must be the referencing file at the current depth, not the top-level source,
/// so that relative references inside nested imports keep working.
pub fn resolve_reference(base_file: &Path, url: &str) -> Resolution {
  if is_skip_scheme(url) {
    return Resolution::Skip;
  }

  let base_dir = base_file.parent().unwrap_or(Path::new(""));
  let joined = base_dir.join(url_to_file_name(url));
  Resolution::Local(absolutize(&joined))
}

/// Make `path` absolute against the current directory and fold `.`/`..` components.
pub fn absolutize(path: &Path) -> PathBuf {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    match std::env::current_dir() {
      Ok(cwd) => cwd.join(path),
      Err(_) => path.to_path_buf(),
    }
  };
  path_clean::clean(absolute)
}
