//! # cangen-markdown
//!
//! Markdown processor for the Cangjie team site. Renders GitHub-flavored
//! markdown to HTML *fragments* (the site injects them into its own pages),
//! with syntax-highlighted code blocks — including the Cangjie language via
//! a bundled grammar — and stable slugged heading anchors.
//!
//! ## Quick start
//!
//! ```rust
//! use cangen_markdown::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Hello\n\nThis is **bold** text.");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains(r#"<h1 id="hello">"#));
//! ```

mod postprocess;
mod processor;
pub mod syntax;
mod transform;
mod types;
pub mod utils;

pub use crate::{
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    collect_markdown_files,
  },
  transform::AstTransformer,
  types::{Header, MarkdownResult},
};
