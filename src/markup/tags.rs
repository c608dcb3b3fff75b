//! Regex recognisers for HTML tags and their attribute lists.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Attribute name followed by an optional quoted, single-quoted or bare value.
const ATTRIBUTE: &str = r#"\s+([a-zA-Z][a-zA-Z0-9-]*)(?:=(?:"([^"]*)"|'([^']*)'|(\S+)))?"#;

/// Same shape as [`ATTRIBUTE`] without capture groups, for embedding in tag patterns.
const ATTRIBUTE_SHAPE: &str = r#"\s+[a-zA-Z][a-zA-Z0-9-]*(?:=(?:"[^"]*"|'[^']*'|\S+))?"#;

/// HTML tags the engine knows how to inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlTag {
  /// `<script src=…>`, self-closing or with an empty body.
  Script,
  /// `<link href=…>`.
  Link,
  /// `<img src=…>`.
  Img,
  /// `<style>…</style>`, matched together with its body.
  Style,
}

impl HtmlTag {
  /// Tag name as written in markup.
  pub fn name(self) -> &'static str {
    match self {
      Self::Script => "script",
      Self::Link => "link",
      Self::Img => "img",
      Self::Style => "style",
    }
  }

  /// Whether the tag is matched together with an inner text body.
  pub fn has_body(self) -> bool {
    matches!(self, Self::Style)
  }

  /// Compiled pattern for this tag.
  pub fn pattern(self) -> &'static Regex {
    static PATTERNS: [OnceLock<Regex>; 4] = [const { OnceLock::new() }; 4];
    PATTERNS[self as usize].get_or_init(|| {
      let source = if self.has_body() {
        complex_tag_source(self.name())
      } else {
        simple_tag_source(self.name())
      };
      Regex::new(&source).expect("invalid tag regex")
    })
  }
}

fn simple_tag_source(name: &str) -> String {
  format!(r"<({name})((?:{ATTRIBUTE_SHAPE})*)\s*(?:/>|>\s*</{name}>|>)")
}

fn complex_tag_source(name: &str) -> String {
  format!(r"(?s)<({name})((?:{ATTRIBUTE_SHAPE})*)\s*>(.*?)</{name}>")
}

fn attribute_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(ATTRIBUTE).expect("invalid attribute regex"))
}

/// A tag occurrence found in a buffer.
#[derive(Debug, Clone)]
pub struct TagMatch<'t> {
  /// Complete matched text.
  pub whole: &'t str,
  /// Tag name.
  pub name: &'t str,
  /// Decoded attributes in source order.
  pub attributes: Attributes,
  /// Inner text for tags matched with a body.
  pub body: Option<&'t str>,
  body_span: Option<(usize, usize)>,
}

impl<'t> TagMatch<'t> {
  /// Build a match from the captures of [`HtmlTag::pattern`].
  pub fn from_captures(captures: &Captures<'t>) -> Self {
    let text = |index: usize| captures.get(index).map_or("", |m| m.as_str());
    let offset = captures.get(0).map_or(0, |m| m.start());
    let body = captures.get(3);
    Self {
      whole: text(0),
      name: text(1),
      attributes: Attributes::parse(text(2)),
      body: body.map(|m| m.as_str()),
      body_span: body.map(|m| (m.start() - offset, m.end() - offset)),
    }
  }

  /// The matched text with its body swapped for `body`, opening and closing tags untouched.
  pub fn with_body(&self, body: &str) -> String {
    match self.body_span {
      Some((start, end)) => format!("{}{}{}", &self.whole[..start], body, &self.whole[end..]),
      None => self.whole.to_string(),
    }
  }
}

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
  /// Boolean attribute written without a value (`defer`).
  Flag,
  /// Attribute with an entity-decoded value.
  Text(String),
}

/// Ordered attribute list of a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
  entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
  /// Parse a raw attribute string such as ` src="a.js" defer`.
  ///
  /// Repeated names keep their first position and their last value.
  pub fn parse(raw: &str) -> Self {
    let mut attributes = Self::default();
    for captures in attribute_pattern().captures_iter(raw) {
      let key = captures.get(1).map_or("", |m| m.as_str());
      let value = captures
        .get(2)
        .or_else(|| captures.get(3))
        .or_else(|| captures.get(4))
        .map_or(AttributeValue::Flag, |m| {
          AttributeValue::Text(decode_entities(m.as_str()))
        });
      attributes.set(key, value);
    }
    attributes
  }

  /// Build an attribute list from name/value pairs.
  pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    let mut attributes = Self::default();
    for (key, value) in pairs {
      attributes.set(key, AttributeValue::Text(value.to_string()));
    }
    attributes
  }

  /// Text value of `key`; `None` for missing and boolean attributes.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.iter().find_map(|(name, value)| match value {
      AttributeValue::Text(text) if name == key => Some(text.as_str()),
      _ => None,
    })
  }

  /// Whether `key` is present, with or without a value.
  pub fn contains(&self, key: &str) -> bool {
    self.entries.iter().any(|(name, _)| name == key)
  }

  /// Set `key`, keeping its position if it already exists.
  pub fn set(&mut self, key: &str, value: AttributeValue) {
    match self.entries.iter_mut().find(|(name, _)| name == key) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((key.to_string(), value)),
    }
  }

  /// Remove `key`, returning its previous value.
  pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
    let index = self.entries.iter().position(|(name, _)| name == key)?;
    Some(self.entries.remove(index).1)
  }

  /// Iterate over attributes in source order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
    self.entries.iter().map(|(name, value)| (name.as_str(), value))
  }
}

fn decode_entities(value: &str) -> String {
  value.replace("&quot;", "\"").replace("&amp;", "&")
}

fn encode_entities(value: &str) -> String {
  value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Serialise a tag. Without a body the tag is emitted self-closing.
pub fn render_tag(name: &str, attributes: &Attributes, body: Option<&str>) -> String {
  let mut tag = format!("<{name}");
  for (key, value) in attributes.iter() {
    match value {
      AttributeValue::Flag => {
        tag.push(' ');
        tag.push_str(key);
      }
      AttributeValue::Text(text) => {
        tag.push_str(&format!(" {key}=\"{}\"", encode_entities(text)));
      }
    }
  }
  match body {
    Some(body) => tag.push_str(&format!(">{body}</{name}>")),
    None => tag.push_str("/>"),
  }
  tag
}
