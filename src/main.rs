//! Command line front-end for inlining the assets of a single file or a task file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use inline_assets::asset_paths::absolutize;
use inline_assets::report::format_size;
use inline_assets::{
  InlineOptions, Inliner, LogReporter, PatternChain, ProgressEvent, Reporter, StandardMinifier,
  TaskConfig, run_task,
};

/// Inline external assets of HTML/CSS files.
#[derive(Debug, Parser)]
#[command(name = "inline-assets", version, about)]
struct Cli {
  /// Print verbose processing information.
  #[arg(short, long)]
  verbose: bool,
  /// Minify processed HTML content.
  #[arg(long)]
  htmlmin: bool,
  /// Minify processed CSS content.
  #[arg(long)]
  cssmin: bool,
  /// Minify processed JavaScript content.
  #[arg(long)]
  jsmin: bool,
  /// Comma-separated list of positive/negative filename regex patterns.
  #[arg(long, value_name = "PATTERNS", default_value = ".+")]
  pattern: String,
  /// Purge HTML/CSS/JavaScript references of files excluded by pattern.
  #[arg(long)]
  purge: bool,
  /// Run a JSON task file (or the inline-assets.json inside a directory).
  #[arg(long, value_name = "FILE", conflicts_with_all = ["source", "destination"])]
  task: Option<PathBuf>,
  /// File to inline.
  #[arg(required_unless_present = "task")]
  source: Option<PathBuf>,
  /// Output file or directory; standard output when omitted.
  destination: Option<PathBuf>,
}

/// Prints completed steps to standard error.
struct StderrReporter {
  cwd: PathBuf,
}

impl Reporter for StderrReporter {
  fn report(&self, event: &ProgressEvent<'_>) {
    let Some(after) = event.size_after else {
      return;
    };
    let path = event.path.strip_prefix(&self.cwd).unwrap_or(event.path);
    eprintln!(
      "++ {:<10} {:<5} {}: {} → {}",
      format!("{}:", event.action),
      format!("{}:", event.kind),
      path.display(),
      format_size(event.size_before),
      format_size(after)
    );
  }
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      // Help and version come through here too and are not failures.
      let code = if err.use_stderr() {
        ExitCode::FAILURE
      } else {
        ExitCode::SUCCESS
      };
      return match err.print() {
        Ok(()) => code,
        Err(_) => ExitCode::FAILURE,
      };
    }
  };

  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("inline-assets: ERROR: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let cwd = std::env::current_dir().context("failed to determine the current directory")?;
  let stderr_reporter = StderrReporter { cwd: cwd.clone() };
  let reporter: &dyn Reporter = if cli.verbose {
    &stderr_reporter
  } else {
    &LogReporter
  };

  if let Some(task) = &cli.task {
    let path = TaskConfig::locate(task);
    let config = TaskConfig::from_path(&path)?;
    let base_dir = path.parent().unwrap_or(Path::new(""));
    run_task(&config, base_dir, reporter, &StandardMinifier)?;
    return Ok(());
  }

  let Some(source) = &cli.source else {
    anyhow::bail!("missing source file (use \"--help\" for details)");
  };
  let source = absolutize(source);
  let content =
    fs::read(&source).with_context(|| format!("failed to read {}", source.display()))?;

  let options = InlineOptions {
    htmlmin: cli.htmlmin,
    cssmin: cli.cssmin,
    jsmin: cli.jsmin,
    patterns: PatternChain::parse_list(&cli.pattern)?,
    purge: cli.purge,
  };

  let destination = cli
    .destination
    .as_deref()
    .map(|path| resolve_destination(path, &source));
  let report_target = destination.clone().unwrap_or_else(|| cwd.clone());

  let output = Inliner::new(&options)
    .with_reporter(reporter)
    .with_minifier(&StandardMinifier)
    .process(&report_target, &source, &content)?;

  if cli.verbose {
    eprintln!("++ input:  {:>8} bytes", content.len());
    eprintln!("++ output: {:>8} bytes", output.len());
  }

  match destination {
    Some(destination) => fs::write(&destination, output)
      .with_context(|| format!("failed to write {}", destination.display()))?,
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to standard output")?;
    }
  }

  Ok(())
}

fn resolve_destination(path: &Path, source: &Path) -> PathBuf {
  let path = absolutize(path);
  match source.file_name() {
    Some(name) if path.is_dir() => path.join(name),
    _ => path,
  }
}
