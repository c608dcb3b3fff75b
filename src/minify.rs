//! Pluggable minification applied at the end of each content pass.

use crate::report::ContentKind;

/// Error raised by a minifier backend.
#[derive(Debug)]
pub struct MinifyError {
  message: String,
}

impl MinifyError {
  /// Create an error from a backend message.
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

impl std::fmt::Display for MinifyError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message)
  }
}

impl std::error::Error for MinifyError {}

/// Opaque `(text, kind) -> text` transform.
pub trait Minifier {
  /// Minify `text` of the given content type.
  fn minify(&self, kind: ContentKind, text: &str) -> Result<String, MinifyError>;
}

/// Minifier returning its input untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Minifier for Passthrough {
  fn minify(&self, _kind: ContentKind, text: &str) -> Result<String, MinifyError> {
    Ok(text.to_string())
  }
}

/// Default minifier: `minify-html` for markup, `lightningcss` for stylesheets and `oxc`
/// for scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMinifier;

impl Minifier for StandardMinifier {
  fn minify(&self, kind: ContentKind, text: &str) -> Result<String, MinifyError> {
    match kind {
      ContentKind::Html => html(text),
      ContentKind::Css => css(text),
      ContentKind::Js => js(text),
      ContentKind::Data => Ok(text.to_string()),
    }
  }
}

fn html(input: &str) -> Result<String, MinifyError> {
  // Inline style and script bodies went through their own pass already.
  let cfg = minify_html::Cfg {
    keep_comments: false,
    minify_css: false,
    minify_js: false,
    ..Default::default()
  };

  let bytes = minify_html::minify(input.as_bytes(), &cfg);
  String::from_utf8(bytes).map_err(|err| MinifyError::new(err.to_string()))
}

fn css(input: &str) -> Result<String, MinifyError> {
  use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

  let stylesheet = StyleSheet::parse(input, ParserOptions::default())
    .map_err(|err| MinifyError::new(format!("CSS parse error: {err}")))?;

  let minified = stylesheet
    .to_css(PrinterOptions {
      minify: true,
      ..Default::default()
    })
    .map_err(|err| MinifyError::new(format!("CSS print error: {err}")))?;

  Ok(minified.code)
}

fn js(input: &str) -> Result<String, MinifyError> {
  use oxc::allocator::Allocator;
  use oxc::codegen::{Codegen, CodegenOptions};
  use oxc::minifier::{Minifier as OxcMinifier, MinifierOptions};
  use oxc::parser::Parser;
  use oxc::span::SourceType;

  let allocator = Allocator::default();
  let ret = Parser::new(&allocator, input, SourceType::mjs()).parse();

  if let Some(error) = ret.errors.first() {
    return Err(MinifyError::new(format!("JS parse error: {error}")));
  }

  let mut program = ret.program;
  let options = MinifierOptions {
    mangle: None,
    ..MinifierOptions::default()
  };
  OxcMinifier::new(options).build(&allocator, &mut program);

  let codegen_options = CodegenOptions {
    minify: true,
    ..Default::default()
  };
  Ok(Codegen::new().with_options(codegen_options).build(&program).code)
}
