//! Types for the cangen-markdown public API.
use serde::{Deserialize, Serialize};

/// A heading found in a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Heading text (inline content, no markdown formatting).
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID assigned to the heading in the HTML output.
  pub id:    String,
}

/// Result of rendering one markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML fragment (body children only, no document wrapper).
  pub html: String,

  /// Headings in document order (for `ToC` and navigation consumers).
  pub headers: Vec<Header>,

  /// Title of the document, if found (first level-1 heading).
  pub title: Option<String>,
}
