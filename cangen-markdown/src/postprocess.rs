//! DOM post-processing of rendered HTML.
//!
//! Runs after comrak: assigns slug ids to headings that lack one (headings
//! written as raw HTML included, since they pass through the renderer
//! untouched), collects the headings for navigation consumers, and
//! serializes the body fragment.

use std::collections::HashMap;

use kuchikikiki::NodeRef;
use markup5ever::local_name;
use tendril::TendrilSink;

use crate::{types::Header, utils::slugify};

/// Hands out unique slugs within one document.
///
/// Repeated heading text gets `-1`, `-2`, ... suffixes, and a derived slug
/// is itself marked taken so later collisions keep incrementing.
#[derive(Debug, Default)]
pub struct SlugCounter {
  seen: HashMap<String, usize>,
}

impl SlugCounter {
  /// Produce the anchor id for a heading's text.
  pub fn assign(&mut self, text: &str) -> String {
    let base = slugify(text);
    let count = {
      let entry = self.seen.entry(base.clone()).or_insert(0);
      let current = *entry;
      *entry += 1;
      current
    };

    if count == 0 {
      base
    } else {
      let slug = format!("{base}-{count}");
      self.seen.entry(slug.clone()).or_insert(1);
      slug
    }
  }
}

/// Parse rendered HTML, assign heading anchor ids, and return the body
/// fragment together with the headings found in document order.
#[must_use]
pub fn finalize_fragment(html: &str) -> (String, Vec<Header>) {
  let document = kuchikikiki::parse_html().one(html);
  let headers = assign_heading_ids(&document);
  (serialize_body(&document), headers)
}

fn assign_heading_ids(document: &NodeRef) -> Vec<Header> {
  let mut counter = SlugCounter::default();
  let mut headers = Vec::new();

  let Ok(headings) = document.select("h1, h2, h3, h4, h5, h6") else {
    return headers;
  };

  for heading in headings {
    let level = match heading.name.local.as_ref() {
      "h1" => 1,
      "h2" => 2,
      "h3" => 3,
      "h4" => 4,
      "h5" => 5,
      _ => 6,
    };
    let text = heading.as_node().text_contents();
    let text = text.trim();

    let existing = heading
      .attributes
      .borrow()
      .get(local_name!("id"))
      .map(std::string::ToString::to_string);

    let id = if let Some(id) = existing {
      id
    } else {
      let id = counter.assign(text);
      heading
        .attributes
        .borrow_mut()
        .insert(local_name!("id"), id.clone());
      id
    };

    headers.push(Header {
      text: text.to_string(),
      level,
      id,
    });
  }

  headers
}

/// Serialize the children of `<body>` only. The site injects fragments via
/// `innerHTML`, so no document wrapper may leak into the output.
fn serialize_body(document: &NodeRef) -> String {
  let Ok(body) = document.select_first("body") else {
    return String::new();
  };

  let mut out = Vec::new();
  for child in body.as_node().children() {
    if child.serialize(&mut out).is_err() {
      log::error!("failed to serialize rendered fragment");
      return String::new();
    }
  }
  String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slug_counter_suffixes_repeats() {
    let mut counter = SlugCounter::default();
    assert_eq!(counter.assign("Setup"), "setup");
    assert_eq!(counter.assign("Setup"), "setup-1");
    assert_eq!(counter.assign("Setup"), "setup-2");
    assert_eq!(counter.assign("Other"), "other");
  }

  #[test]
  fn fragment_has_no_document_wrapper() {
    let (html, _) = finalize_fragment("<h1>Hi</h1><p>text</p>");
    assert!(!html.contains("<html"));
    assert!(!html.contains("<body"));
    assert!(html.contains(r#"<h1 id="hi">Hi</h1>"#));
  }

  #[test]
  fn existing_ids_are_kept() {
    let (html, headers) =
      finalize_fragment(r#"<h2 id="custom">Already anchored</h2>"#);
    assert!(html.contains(r#"id="custom""#));
    assert_eq!(headers[0].id, "custom");
  }
}
