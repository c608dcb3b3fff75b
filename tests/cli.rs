use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::tempdir;

fn inline_assets() -> Command {
  Command::cargo_bin("inline-assets").unwrap()
}

fn write(root: &Path, name: &str, content: &str) {
  let path = root.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(path, content).unwrap();
}

#[test]
fn missing_arguments_fail() {
  let output = inline_assets().output().unwrap();
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn too_many_arguments_fail() {
  inline_assets()
    .args(["a.html", "b.html", "c.html"])
    .assert()
    .failure()
    .code(1);
}

#[test]
fn help_succeeds() {
  let output = inline_assets().arg("--help").output().unwrap();
  assert!(output.status.success());
  assert!(String::from_utf8_lossy(&output.stdout).contains("--purge"));
}

#[test]
fn version_succeeds() {
  let output = inline_assets().arg("--version").output().unwrap();
  assert!(output.status.success());
  assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn writes_to_stdout_without_destination() {
  let dir = tempdir().unwrap();
  write(dir.path(), "index.html", "<script src=\"app.js\"></script>");
  write(dir.path(), "app.js", "run();");

  let output = inline_assets()
    .current_dir(dir.path())
    .arg("index.html")
    .output()
    .unwrap();

  assert!(output.status.success());
  assert_eq!(
    String::from_utf8(output.stdout).unwrap(),
    "<script>run();</script>"
  );
}

#[test]
fn writes_destination_file() {
  let dir = tempdir().unwrap();
  write(dir.path(), "src/site.css", "@import \"parts/base.css\";\nb{}");
  write(dir.path(), "src/parts/base.css", "a{}");

  inline_assets()
    .current_dir(dir.path())
    .args(["src/site.css", "out.css"])
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(dir.path().join("out.css")).unwrap(),
    "a{}\nb{}"
  );
}

#[test]
fn directory_destination_keeps_source_name() {
  let dir = tempdir().unwrap();
  write(dir.path(), "page.html", "<p>plain</p>");
  fs::create_dir_all(dir.path().join("dist")).unwrap();

  inline_assets()
    .current_dir(dir.path())
    .args(["page.html", "dist"])
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(dir.path().join("dist/page.html")).unwrap(),
    "<p>plain</p>"
  );
}

#[test]
fn excluded_references_are_purged() {
  let dir = tempdir().unwrap();
  write(
    dir.path(),
    "index.html",
    "<link rel=\"stylesheet\" href=\"a.css\"><link rel=\"stylesheet\" href=\"b.css\">",
  );
  write(dir.path(), "a.css", "a{}");
  write(dir.path(), "b.css", "b{}");

  let output = inline_assets()
    .current_dir(dir.path())
    .args(["--pattern", ".+,!b\\.css$", "--purge", "index.html"])
    .output()
    .unwrap();

  assert!(output.status.success());
  assert_eq!(
    String::from_utf8(output.stdout).unwrap(),
    "<style type=\"text/css\">a{}</style>"
  );
}

#[test]
fn verbose_reports_totals() {
  let dir = tempdir().unwrap();
  write(dir.path(), "page.html", "<p>plain</p>");

  let output = inline_assets()
    .current_dir(dir.path())
    .args(["-v", "page.html"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("++ input:"));
  assert!(stderr.contains("++ output:"));
}

#[test]
fn missing_source_fails() {
  let dir = tempdir().unwrap();
  inline_assets()
    .current_dir(dir.path())
    .arg("absent.html")
    .assert()
    .failure()
    .code(1);
}

#[test]
fn runs_task_files() {
  let dir = tempdir().unwrap();
  write(dir.path(), "site/index.html", "<img src=\"dot.svg\">");
  write(dir.path(), "site/dot.svg", "<svg/>");
  write(
    dir.path(),
    "site/inline-assets.json",
    r#"{"files": [{"src": ["index.html"], "dest": "dist/"}]}"#,
  );

  inline_assets()
    .arg("--task")
    .arg(dir.path().join("site"))
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(dir.path().join("site/dist/index.html")).unwrap(),
    "<img src=\"data:image/svg+xml;base64,PHN2Zy8+\"/>"
  );
}
