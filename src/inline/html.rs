use std::path::Path;

use super::{Decision, Inliner, read_bytes, read_text};
use crate::error::InlineResult;
use crate::markup::{AttributeValue, Attributes, HtmlTag, TagMatch, render_tag, try_replace_tags};
use crate::report::{Action, ContentKind};

const INLINED_TAGS: [HtmlTag; 4] = [HtmlTag::Script, HtmlTag::Link, HtmlTag::Style, HtmlTag::Img];

const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".gif", ".jpg", ".jpeg", ".svg"];

impl Inliner<'_> {
  /// Inline scripts, stylesheets, style bodies and images of an HTML document.
  pub(super) fn inline_html(&self, path: &Path, content: &str) -> InlineResult<String> {
    let before = content.len();
    self.report(Action::Expanding, ContentKind::Html, path, before, None);

    let content = try_replace_tags(content, &INLINED_TAGS, |tag, found| match tag {
      HtmlTag::Script => self.inline_script_tag(path, found),
      HtmlTag::Link => self.inline_link_tag(path, found),
      HtmlTag::Style => self.inline_style_tag(path, found),
      HtmlTag::Img => self.inline_img_tag(path, found),
    })?;

    let content = if self.options.htmlmin {
      self.minify(ContentKind::Html, path, content)?
    } else {
      content
    };

    self.report(Action::Expanded, ContentKind::Html, path, before, Some(content.len()));
    Ok(content)
  }

  fn inline_script_tag(&self, path: &Path, found: TagMatch<'_>) -> InlineResult<Option<String>> {
    let mut attributes = found.attributes;
    let Some(src) = attributes.get("src").map(str::to_string) else {
      return Ok(None);
    };

    let is_javascript = !attributes.contains("type")
      || attributes.get("type") == Some("text/javascript")
      || src.to_ascii_lowercase().contains(".js");
    if !is_javascript {
      return Ok(None);
    }

    match self.decide(path, &src) {
      Decision::Keep => Ok(None),
      Decision::Purge => Ok(Some(String::new())),
      Decision::Inline(target) => {
        let js = self.inline_js(&target, read_text(&target)?)?;
        attributes.remove("src");
        Ok(Some(render_tag("script", &attributes, Some(&js))))
      }
    }
  }

  fn inline_link_tag(&self, path: &Path, found: TagMatch<'_>) -> InlineResult<Option<String>> {
    let attributes = found.attributes;
    let Some(href) = attributes.get("href") else {
      return Ok(None);
    };

    let is_stylesheet = attributes.get("rel") == Some("stylesheet")
      || attributes.get("type") == Some("text/css")
      || href.to_ascii_lowercase().ends_with(".css");
    if !is_stylesheet {
      return Ok(None);
    }

    match self.decide(path, href) {
      Decision::Keep => Ok(None),
      Decision::Purge => Ok(Some(String::new())),
      Decision::Inline(target) => {
        let text = read_text(&target)?;
        let mut chain = vec![target.clone()];
        let mut css = self.inline_css(&target, &text, &mut chain)?;
        if let Some(media) = attributes.get("media") {
          css = format!("@media {media} {{{css} }}");
        }
        Ok(Some(style_tag(&css)))
      }
    }
  }

  fn inline_style_tag(&self, path: &Path, found: TagMatch<'_>) -> InlineResult<Option<String>> {
    let is_css = !found.attributes.contains("type")
      || found.attributes.get("type") == Some("text/css");
    let Some(body) = found.body.filter(|_| is_css) else {
      return Ok(None);
    };

    let mut chain = vec![path.to_path_buf()];
    let css = self.inline_css(path, body, &mut chain)?;
    Ok(Some(found.with_body(&css)))
  }

  fn inline_img_tag(&self, path: &Path, found: TagMatch<'_>) -> InlineResult<Option<String>> {
    let mut attributes = found.attributes;
    let Some(src) = attributes.get("src") else {
      return Ok(None);
    };

    let lowered = src.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|extension| lowered.ends_with(extension)) {
      return Ok(None);
    }

    match self.decide(path, src) {
      Decision::Keep => Ok(None),
      Decision::Purge => Ok(Some(String::new())),
      Decision::Inline(target) => {
        let data = read_bytes(&target)?;
        let uri = self.inline_data(&target, &data);
        attributes.set("src", AttributeValue::Text(uri));
        Ok(Some(render_tag("img", &attributes, None)))
      }
    }
  }
}

fn style_tag(css: &str) -> String {
  render_tag("style", &Attributes::from_pairs([("type", "text/css")]), Some(css))
}
