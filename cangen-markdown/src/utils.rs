//! Text utilities shared by the processor and the metadata pipeline.

use std::sync::LazyLock;

use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use regex::Regex;

/// Slugify heading text for use as an anchor ID.
///
/// Lowercases, drops punctuation, and turns each space into a dash. This is
/// the id scheme the site's table-of-contents script reconstructs from the
/// markdown source, so it must stay stable.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .trim()
    .to_lowercase()
    .chars()
    .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
    .map(|c| if c.is_whitespace() { '-' } else { c })
    .collect()
}

fn gfm_options() -> Options<'static> {
  let mut options = Options::default();
  options.extension.table = true;
  options.extension.footnotes = true;
  options.extension.strikethrough = true;
  options.extension.tasklist = true;
  options.render.r#unsafe = true;
  options
}

/// Extract the first level-1 heading from markdown content as the document
/// title.
///
/// # Returns
///
/// `None` if no H1 heading is found or it is empty.
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
  let arena = Arena::new();
  let root = parse_document(&arena, content, &gfm_options());

  for node in root.descendants() {
    if let NodeValue::Heading(NodeHeading { level: 1, .. }) =
      &node.data.borrow().value
    {
      let text = inline_text(node);
      let text = text.trim();
      if !text.is_empty() {
        return Some(text.to_string());
      }
    }
  }
  None
}

/// Collect the inline text of a node, recursing through emphasis, links and
/// the other inline containers.
#[must_use]
pub fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough => text.push_str(&inline_text(child)),
      _ => {},
    }
  }
  text
}

/// Strip markdown formatting and return plain body text.
///
/// Walks the AST and collects text content only; code blocks and the first
/// level-1 heading (the title) are excluded so the result is usable as
/// summary material.
#[must_use]
pub fn strip_markdown(content: &str) -> String {
  let arena = Arena::new();
  let root = parse_document(&arena, content, &gfm_options());

  let mut plain = String::new();
  let mut skipped_title = false;

  for node in root.children() {
    let is_title = matches!(
      &node.data.borrow().value,
      NodeValue::Heading(NodeHeading { level: 1, .. })
    );
    if is_title && !skipped_title {
      skipped_title = true;
      continue;
    }
    if matches!(
      &node.data.borrow().value,
      NodeValue::CodeBlock(_) | NodeValue::HtmlBlock(_)
    ) {
      continue;
    }
    collect_text(node, &mut plain);
  }

  plain.trim().to_string()
}

fn collect_text<'a>(node: &'a AstNode<'a>, plain: &mut String) {
  match &node.data.borrow().value {
    NodeValue::Text(t) => {
      plain.push_str(t);
    },
    NodeValue::Code(t) => plain.push_str(&t.literal),
    NodeValue::CodeBlock(_) | NodeValue::HtmlBlock(_)
    | NodeValue::HtmlInline(_) => return,
    NodeValue::SoftBreak | NodeValue::LineBreak => plain.push(' '),
    _ => {},
  }
  for child in node.children() {
    collect_text(child, plain);
  }
  // Paragraph-ish blocks separate sentences
  if matches!(
    &node.data.borrow().value,
    NodeValue::Paragraph | NodeValue::Heading(_) | NodeValue::Item(_)
  ) && !plain.ends_with(' ')
    && !plain.is_empty()
  {
    plain.push(' ');
  }
}

static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used, reason = "pattern is a compile-time constant")]
  let re = Regex::new(r"[.!?](?:\s|$)").unwrap();
  re
});

/// Return the first sentence of a plain-text body.
///
/// A sentence ends at the first `.`, `!` or `?` that is followed by
/// whitespace or the end of input. Falls back to the whole (trimmed) text
/// when no terminator is present.
#[must_use]
pub fn first_sentence(text: &str) -> Option<String> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }

  let sentence = SENTENCE_END_RE.find(text).map_or(text, |m| &text[..m.end()]);
  Some(sentence.trim().to_string())
}
