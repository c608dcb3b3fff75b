//! Task file loader describing batch inlining runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::InlineResult;
use crate::options::InlineOptions;
use crate::policy::DEFAULT_PATTERN;

/// File name searched for when a directory is given instead of a task file.
pub const DEFAULT_TASK_FILE: &str = "inline-assets.json";

/// Options as written in a task file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
  /// Minify HTML output.
  pub htmlmin: bool,
  /// Minify CSS output.
  pub cssmin: bool,
  /// Minify JavaScript output.
  pub jsmin: bool,
  /// Ordered include/exclude regex chain, `!` negates a pattern.
  pub pattern: Vec<String>,
  /// Remove references excluded by `pattern`.
  pub purge: bool,
}

impl Default for OptionsConfig {
  fn default() -> Self {
    Self {
      htmlmin: false,
      cssmin: false,
      jsmin: false,
      pattern: vec![DEFAULT_PATTERN.into()],
      purge: false,
    }
  }
}

impl OptionsConfig {
  /// Compile the configuration into resolved options.
  pub fn to_options(&self) -> InlineResult<InlineOptions> {
    let options = InlineOptions {
      htmlmin: self.htmlmin,
      cssmin: self.cssmin,
      jsmin: self.jsmin,
      purge: self.purge,
      ..InlineOptions::default()
    };
    options.with_patterns(self.pattern.iter().cloned())
  }
}

/// One or more source files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Sources {
  /// A single source path.
  One(String),
  /// Several source paths sharing a destination directory.
  Many(Vec<String>),
}

impl Sources {
  /// Iterate over the declared source paths.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    let items: &[String] = match self {
      Self::One(value) => std::slice::from_ref(value),
      Self::Many(values) => values,
    };
    items.iter().map(String::as_str)
  }
}

/// A source to destination mapping.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileMapping {
  /// Files to inline.
  pub src: Sources,
  /// Output file, or a directory when it ends with `/` or already exists as one.
  pub dest: String,
}

/// Batch description: shared options plus file mappings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TaskConfig {
  /// Options applied to every mapping.
  pub options: OptionsConfig,
  /// Files to process.
  pub files: Vec<FileMapping>,
}

impl TaskConfig {
  /// Locate the task file: `path` itself, or [`DEFAULT_TASK_FILE`] inside it when `path` is a
  /// directory.
  pub fn locate(path: &Path) -> PathBuf {
    if path.is_dir() {
      path.join(DEFAULT_TASK_FILE)
    } else {
      path.to_path_buf()
    }
  }

  /// Read a task file from disk.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("task file not found at {}", path.display()))?;
    Self::from_json(&content).with_context(|| format!("failed to parse {}", path.display()))
  }

  /// Parse a task description from JSON text.
  pub fn from_json(content: &str) -> Result<Self> {
    Ok(serde_json::from_str(content)?)
  }
}
