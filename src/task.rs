//! Batch runner processing every mapping of a [`TaskConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::TaskConfig;
use crate::inline::Inliner;
use crate::minify::Minifier;
use crate::report::Reporter;

/// A resolved source/destination pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskJob {
  /// File to inline.
  pub source: PathBuf,
  /// File to write.
  pub destination: PathBuf,
}

/// Expand the mappings of `config` into jobs, resolving paths against `base_dir`.
pub fn plan_jobs(config: &TaskConfig, base_dir: &Path) -> Vec<TaskJob> {
  let mut jobs = Vec::new();
  for mapping in &config.files {
    let dest = base_dir.join(&mapping.dest);
    let dest_is_dir = mapping.dest.ends_with('/') || mapping.dest.ends_with('\\') || dest.is_dir();

    for src in mapping.src.iter() {
      let source = base_dir.join(src);
      let destination = match source.file_name() {
        Some(name) if dest_is_dir => dest.join(name),
        _ => dest.clone(),
      };
      jobs.push(TaskJob {
        source,
        destination,
      });
    }
  }
  jobs
}

/// Run every job of `config` and return the written destinations.
///
/// All sources are checked before anything is written; a missing source fails the whole
/// task.
pub fn run_task(
  config: &TaskConfig,
  base_dir: &Path,
  reporter: &dyn Reporter,
  minifier: &dyn Minifier,
) -> Result<Vec<PathBuf>> {
  let options = config
    .options
    .to_options()
    .context("invalid task options")?;
  let jobs = plan_jobs(config, base_dir);

  if let Some(missing) = jobs.iter().find(|job| !job.source.is_file()) {
    bail!("source file \"{}\" not found.", missing.source.display());
  }

  let inliner = Inliner::new(&options)
    .with_reporter(reporter)
    .with_minifier(minifier);

  let mut written = Vec::with_capacity(jobs.len());
  for job in jobs {
    let content = fs::read(&job.source)
      .with_context(|| format!("failed to read {}", job.source.display()))?;
    let output = inliner
      .process(&job.destination, &job.source, &content)
      .with_context(|| format!("failed to inline {}", job.source.display()))?;

    if let Some(parent) = job.destination.parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&job.destination, output)
      .with_context(|| format!("failed to write {}", job.destination.display()))?;
    log::info!("File \"{}\" created.", job.destination.display());
    written.push(job.destination);
  }

  Ok(written)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{FileMapping, Sources};
  use crate::minify::Passthrough;
  use crate::report::NullReporter;
  use tempfile::tempdir;

  fn mapping(src: &[&str], dest: &str) -> FileMapping {
    FileMapping {
      src: Sources::Many(src.iter().map(|value| value.to_string()).collect()),
      dest: dest.into(),
    }
  }

  #[test]
  fn plans_directory_and_file_destinations() {
    let dir = tempdir().unwrap();
    let config = TaskConfig {
      files: vec![
        mapping(&["src/a.html", "src/b.html"], "dist/"),
        mapping(&["src/c.css"], "out/site.css"),
      ],
      ..TaskConfig::default()
    };

    let jobs = plan_jobs(&config, dir.path());
    let destinations: Vec<PathBuf> = jobs.into_iter().map(|job| job.destination).collect();
    assert_eq!(destinations, vec![
      dir.path().join("dist/").join("a.html"),
      dir.path().join("dist/").join("b.html"),
      dir.path().join("out/site.css"),
    ]);
  }

  #[test]
  fn writes_inlined_outputs() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    fs::create_dir_all(root.join("src"))?;
    fs::write(root.join("src/index.html"), "<link rel=\"stylesheet\" href=\"site.css\">")?;
    fs::write(root.join("src/site.css"), "a{}")?;

    let config = TaskConfig::from_json(
      r#"{"files": [{"src": "src/index.html", "dest": "dist/"}]}"#,
    )?;
    let written = run_task(&config, root, &NullReporter, &Passthrough)?;

    assert_eq!(written, vec![root.join("dist/").join("index.html")]);
    assert_eq!(
      fs::read_to_string(root.join("dist/index.html"))?,
      "<style type=\"text/css\">a{}</style>"
    );
    Ok(())
  }

  #[test]
  fn missing_sources_fail_before_writing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("present.css"), "a{}").unwrap();

    let config = TaskConfig {
      files: vec![mapping(&["present.css", "absent.css"], "dist/")],
      ..TaskConfig::default()
    };
    let err = run_task(&config, root, &NullReporter, &Passthrough).unwrap_err();

    assert!(err.to_string().contains("absent.css"));
    assert!(!root.join("dist").exists());
  }
}
