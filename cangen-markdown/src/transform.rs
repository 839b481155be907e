//! AST transformations applied between parsing and HTML generation.

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use log::trace;

use crate::syntax::SyntaxManager;

/// Trait for AST transformations.
pub trait AstTransformer {
  fn transform<'a>(&self, node: &'a AstNode<'a>);
}

/// Replaces fenced code blocks with syntax-highlighted HTML.
///
/// The first word of the fence info string selects the language; a fence
/// with no label is highlighted as plain text. Code is trimmed before
/// highlighting. A failed highlight degrades to an escaped
/// `<pre><code>` block rather than failing the render.
pub struct CodeBlockHighlighter<'a> {
  manager: &'a SyntaxManager,
  theme:   Option<&'a str>,
}

impl<'a> CodeBlockHighlighter<'a> {
  #[must_use]
  pub const fn new(manager: &'a SyntaxManager, theme: Option<&'a str>) -> Self {
    Self { manager, theme }
  }

  fn render_block(&self, info: &str, literal: &str) -> String {
    let language = info.split_whitespace().next().unwrap_or("plaintext");
    let code = literal.trim();

    trace!("highlighting code block: {language}");
    match self.manager.highlight_code(code, language, self.theme) {
      Ok(html) => html,
      Err(e) => {
        log::warn!("highlighting '{language}' block failed: {e}");
        format!(
          "<pre><code>{}</code></pre>",
          html_escape::encode_text(code)
        )
      },
    }
  }
}

impl AstTransformer for CodeBlockHighlighter<'_> {
  fn transform<'a>(&self, node: &'a AstNode<'a>) {
    for child in node.children() {
      let rendered = {
        let data = child.data.borrow();
        if let NodeValue::CodeBlock(ref block) = data.value {
          Some(self.render_block(&block.info, &block.literal))
        } else {
          None
        }
      };

      if let Some(literal) = rendered {
        child.data.borrow_mut().value =
          NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal,
          });
      } else {
        // Code blocks are leaves; only unreplaced nodes need descending
        self.transform(child);
      }
    }
  }
}
