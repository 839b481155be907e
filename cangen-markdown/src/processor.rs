//! Core markdown processor.
//!
//! One `MarkdownProcessor` is built per run and reused across files: it
//! owns the syntax manager (and its lazily-built syntax set), while
//! rendering itself is stateless.

use std::path::{Path, PathBuf};

use comrak::{Arena, options::Options, parse_document};
use log::trace;
use walkdir::WalkDir;

use crate::{
  postprocess,
  syntax::{SyntaxManager, create_default_manager},
  transform::{AstTransformer, CodeBlockHighlighter},
  types::MarkdownResult,
};

/// Options for configuring the markdown processor.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown extensions.
  pub gfm: bool,

  /// Enable syntax highlighting for code blocks.
  pub highlight_code: bool,

  /// Optional: highlight theme name (defaults to a light theme).
  pub highlight_theme: Option<String>,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:             true,
      highlight_code:  true,
      highlight_theme: None,
    }
  }
}

/// Builder for constructing [`MarkdownOptions`] with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  /// Set the syntax highlighting theme.
  #[must_use]
  pub fn highlight_theme<S: Into<String>>(mut self, theme: Option<S>) -> Self {
    self.options.highlight_theme = theme.map(Into::into);
    self
  }

  /// Build the final [`MarkdownOptions`].
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

/// Main markdown processor.
pub struct MarkdownProcessor {
  options:        MarkdownOptions,
  syntax_manager: Option<SyntaxManager>,
}

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let syntax_manager = if options.highlight_code {
      Some(create_default_manager(options.highlight_theme.as_deref()))
    } else {
      None
    };

    Self {
      options,
      syntax_manager,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render markdown to an HTML fragment, extracting headings and title.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let html = self.convert_to_html(markdown);
    let (html, headers) = postprocess::finalize_fragment(&html);
    let title = headers
      .iter()
      .find(|h| h.level == 1)
      .map(|h| h.text.clone());

    MarkdownResult {
      html,
      headers,
      title,
    }
  }

  /// Convert markdown to HTML using comrak and the configured options.
  fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    if let Some(manager) = &self.syntax_manager {
      let highlighter = CodeBlockHighlighter::new(
        manager,
        self.options.highlight_theme.as_deref(),
      );
      highlighter.transform(root);
    }

    let mut html_output = String::new();
    comrak::format_html(root, &options, &mut html_output).unwrap_or_default();
    html_output
  }

  /// Build comrak options from [`MarkdownOptions`].
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    // Raw HTML passes through; heading ids are assigned in our own DOM pass
    options.render.r#unsafe = true;
    options.extension.header_ids = None;
    options
  }
}

impl Default for MarkdownProcessor {
  fn default() -> Self {
    Self::new(MarkdownOptions::default())
  }
}

/// Collect all markdown files under the input directory, sorted for
/// deterministic processing (the index append order depends on it).
#[must_use]
pub fn collect_markdown_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files = Vec::new();

  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
      files.push(path.to_owned());
    }
  }

  files.sort();
  trace!("found {} markdown files in {}", files.len(), input_dir.display());
  files
}
