//! Progress reporting hooks invoked around every expand and minify step.

use std::path::Path;

/// Content types the engine distinguishes when dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
  /// HTML documents (`.htm`, `.html`).
  Html,
  /// Stylesheets (`.css`).
  Css,
  /// Scripts (`.js`).
  Js,
  /// Any other asset, embedded as a data URI.
  Data,
}

impl ContentKind {
  /// Pick the content type from a file name extension (case-insensitive).
  pub fn from_path(path: &Path) -> Self {
    let extension = path
      .extension()
      .and_then(|value| value.to_str())
      .map(|value| value.to_ascii_lowercase());

    match extension.as_deref() {
      Some("htm" | "html") => Self::Html,
      Some("css") => Self::Css,
      Some("js") => Self::Js,
      _ => Self::Data,
    }
  }

  /// Upper-case label used in progress output.
  pub fn label(self) -> &'static str {
    match self {
      Self::Html => "HTML",
      Self::Css => "CSS",
      Self::Js => "JS",
      Self::Data => "DATA",
    }
  }
}

impl std::fmt::Display for ContentKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Step of the pipeline a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// Reference expansion started.
  Expanding,
  /// Reference expansion finished.
  Expanded,
  /// Minification started.
  Minifying,
  /// Minification finished.
  Minified,
}

impl Action {
  /// Lower-case verb used in progress output.
  pub fn label(self) -> &'static str {
    match self {
      Self::Expanding => "expanding",
      Self::Expanded => "expanded",
      Self::Minifying => "minifying",
      Self::Minified => "minified",
    }
  }
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// A single progress notification.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent<'a> {
  /// Pipeline step.
  pub action: Action,
  /// Content type being processed.
  pub kind: ContentKind,
  /// File the content belongs to.
  pub path: &'a Path,
  /// Size in bytes before the step.
  pub size_before: usize,
  /// Size in bytes after the step, `None` while the step is still running.
  pub size_after: Option<usize>,
}

impl ProgressEvent<'_> {
  /// Whether this event marks the completion of a step.
  pub fn is_complete(&self) -> bool {
    self.size_after.is_some()
  }
}

/// Observer notified by the engine around each step.
pub trait Reporter {
  /// Receive a progress notification.
  fn report(&self, event: &ProgressEvent<'_>);
}

impl<F> Reporter for F
where
  F: Fn(&ProgressEvent<'_>),
{
  fn report(&self, event: &ProgressEvent<'_>) {
    self(event)
  }
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
  fn report(&self, _event: &ProgressEvent<'_>) {}
}

/// Reporter forwarding completed steps to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
  fn report(&self, event: &ProgressEvent<'_>) {
    match event.size_after {
      Some(after) => log::info!(
        "{} {} {}: {} -> {}",
        event.action,
        event.kind,
        event.path.display(),
        format_size(event.size_before),
        format_size(after)
      ),
      None => log::debug!(
        "{} {} {} ({})",
        event.action,
        event.kind,
        event.path.display(),
        format_size(event.size_before)
      ),
    }
  }
}

/// Render a byte count with decimal units, e.g. `1.2 kB`.
pub fn format_size(bytes: usize) -> String {
  const UNITS: [&str; 5] = ["kB", "MB", "GB", "TB", "PB"];

  if bytes < 1000 {
    return format!("{bytes} B");
  }

  let mut value = bytes as f64;
  let mut unit = "B";
  for candidate in UNITS {
    if value < 1000.0 {
      break;
    }
    value /= 1000.0;
    unit = candidate;
  }

  let rendered = format!("{value:.2}");
  let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
  format!("{rendered} {unit}")
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;

  #[test]
  fn dispatches_by_extension() {
    assert_eq!(ContentKind::from_path(Path::new("a/index.HTML")), ContentKind::Html);
    assert_eq!(ContentKind::from_path(Path::new("page.htm")), ContentKind::Html);
    assert_eq!(ContentKind::from_path(Path::new("site.css")), ContentKind::Css);
    assert_eq!(ContentKind::from_path(Path::new("app.js")), ContentKind::Js);
    assert_eq!(ContentKind::from_path(Path::new("logo.png")), ContentKind::Data);
    assert_eq!(ContentKind::from_path(Path::new("README")), ContentKind::Data);
  }

  #[test]
  fn formats_sizes_like_pretty_bytes() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(999), "999 B");
    assert_eq!(format_size(1000), "1 kB");
    assert_eq!(format_size(1234), "1.23 kB");
    assert_eq!(format_size(2_500_000), "2.5 MB");
  }

  #[test]
  fn closures_act_as_reporters() {
    let seen = RefCell::new(Vec::new());
    let reporter = |event: &ProgressEvent<'_>| {
      seen.borrow_mut().push((event.action, event.is_complete()));
    };

    let path = Path::new("a.css");
    reporter.report(&ProgressEvent {
      action: Action::Expanding,
      kind: ContentKind::Css,
      path,
      size_before: 10,
      size_after: None,
    });
    reporter.report(&ProgressEvent {
      action: Action::Expanded,
      kind: ContentKind::Css,
      path,
      size_before: 10,
      size_after: Some(8),
    });

    assert_eq!(seen.into_inner(), vec![
      (Action::Expanding, false),
      (Action::Expanded, true)
    ]);
  }
}
