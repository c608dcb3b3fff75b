//! Structural pattern matching over markup and stylesheets.
//!
//! References are located with regular expressions shaped after well-formed tags and the
//! standard `@import`/`url()` syntax rather than a full parser. Everything outside the matched
//! regions is copied through unchanged.

pub mod css;
pub mod tags;

use regex::{Captures, Regex};

pub use css::{ImportMatch, UrlMatch, import_pattern, url_pattern};
pub use tags::{AttributeValue, Attributes, HtmlTag, TagMatch, render_tag};

/// Replace matches of several patterns in a single left-to-right scan.
///
/// At every position the earliest match among `patterns` wins, ties going to the pattern
/// listed first. The callback receives the index of the winning pattern and returns
/// `Ok(None)` to keep the matched text as it was. Replacement text is never scanned again, so
/// content spliced in for one match cannot be picked up by a later pattern. The first error
/// stops the scan.
pub fn try_replace_merged<E, F>(text: &str, patterns: &[&Regex], mut replace: F) -> Result<String, E>
where
  F: FnMut(usize, &Captures<'_>) -> Result<Option<String>, E>,
{
  let mut output = String::with_capacity(text.len());
  let mut last = 0;
  let mut upcoming: Vec<Option<Captures<'_>>> = patterns
    .iter()
    .map(|pattern| pattern.captures_at(text, 0))
    .collect();

  loop {
    let next = upcoming
      .iter()
      .enumerate()
      .filter_map(|(index, slot)| {
        let start = slot.as_ref()?.get(0)?.start();
        Some((start, index))
      })
      .min();
    let Some((_, index)) = next else {
      break;
    };
    let Some(captures) = upcoming[index].take() else {
      break;
    };
    let Some(whole) = captures.get(0) else {
      break;
    };

    output.push_str(&text[last..whole.start()]);
    match replace(index, &captures)? {
      Some(replacement) => output.push_str(&replacement),
      None => output.push_str(whole.as_str()),
    }
    last = whole.end();

    for (position, slot) in upcoming.iter_mut().enumerate() {
      let stale = match slot {
        Some(pending) => pending.get(0).is_none_or(|m| m.start() < last),
        None => position == index,
      };
      if stale {
        *slot = patterns[position].captures_at(text, last);
      }
    }
  }

  output.push_str(&text[last..]);
  Ok(output)
}

/// Replace occurrences of several tag kinds in a single left-to-right scan.
///
/// Ordering follows [`try_replace_merged`]: the earliest tag wins and replacements are not
/// rescanned.
pub fn try_replace_tags<E, F>(text: &str, tags: &[HtmlTag], mut replace: F) -> Result<String, E>
where
  F: FnMut(HtmlTag, TagMatch<'_>) -> Result<Option<String>, E>,
{
  let patterns: Vec<&Regex> = tags.iter().map(|tag| tag.pattern()).collect();
  try_replace_merged(text, &patterns, |index, captures| {
    replace(tags[index], TagMatch::from_captures(captures))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_unmatched_regions_verbatim() {
    let pattern = Regex::new(r"\d+").unwrap();
    let result: Result<String, ()> = try_replace_merged("a1b22c", &[&pattern], |_, captures| {
      let digits = captures.get(0).map_or("", |m| m.as_str());
      Ok((digits.len() > 1).then(|| "#".to_string()))
    });
    assert_eq!(result.unwrap(), "a1b#c");
  }

  #[test]
  fn scans_tags_in_document_order() {
    let html = r#"<img src="a.png"><style>b{}</style><script src="c.js"></script>"#;
    let mut seen = Vec::new();
    let result: Result<String, ()> =
      try_replace_tags(html, &[HtmlTag::Script, HtmlTag::Style, HtmlTag::Img], |tag, found| {
        seen.push(tag);
        Ok((tag == HtmlTag::Style).then(|| found.with_body("x")))
      });

    assert_eq!(seen, vec![HtmlTag::Img, HtmlTag::Style, HtmlTag::Script]);
    assert_eq!(
      result.unwrap(),
      r#"<img src="a.png"><style>x</style><script src="c.js"></script>"#
    );
  }

  #[test]
  fn replacements_are_not_rescanned() {
    let html = r#"<script src="a.js"></script><img src="b.png">"#;
    let mut images = 0;
    let result: Result<String, ()> =
      try_replace_tags(html, &[HtmlTag::Script, HtmlTag::Img], |tag, _| {
        if tag == HtmlTag::Img {
          images += 1;
          return Ok(None);
        }
        Ok(Some(r#"<script>document.write('<img src="c.png">')</script>"#.to_string()))
      });

    assert_eq!(images, 1);
    assert!(result.unwrap().contains("<img src=\"c.png\">"));
  }

  #[test]
  fn merged_patterns_take_the_earliest_match() {
    let words = Regex::new(r"[a-z]+").unwrap();
    let digits = Regex::new(r"\d+").unwrap();
    let mut order = Vec::new();
    let result: Result<String, ()> = try_replace_merged("ab12cd", &[&digits, &words], |index, _| {
      order.push(index);
      Ok(Some(if index == 0 { "x7".to_string() } else { "_".to_string() }))
    });

    assert_eq!(order, vec![1, 0, 1]);
    assert_eq!(result.unwrap(), "_x7_");
  }

  #[test]
  fn stops_at_first_error() {
    let pattern = Regex::new("x").unwrap();
    let mut calls = 0;
    let result: Result<String, &str> = try_replace_merged("xxx", &[&pattern], |_, _| {
      calls += 1;
      Err("boom")
    });
    assert_eq!(result.unwrap_err(), "boom");
    assert_eq!(calls, 1);
  }
}
