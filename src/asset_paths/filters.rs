use regex::Regex;

fn skip_scheme_patterns() -> &'static [Regex] {
  use std::sync::OnceLock;

  static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
  PATTERNS
    .get_or_init(|| {
      vec![
        Regex::new(r"(?i)^https?:").expect("invalid http(s) regex"),
        Regex::new(r"(?i)^data:").expect("invalid data URI regex"),
      ]
    })
    .as_slice()
}

/// Determine whether a reference already points somewhere that cannot be inlined from disk.
///
/// Remote URLs and data URIs are left exactly as authored.
pub fn is_skip_scheme(value: &str) -> bool {
  skip_scheme_patterns()
    .iter()
    .any(|pattern| pattern.is_match(value))
}
