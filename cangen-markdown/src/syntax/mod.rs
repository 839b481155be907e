//! Syntax highlighting for fenced code blocks.
//!
//! A trait-based backend architecture so the highlighter can be swapped
//! without touching the processor. The shipped backend is syntect (Sublime
//! Text syntax definitions) extended with two-face's definition set and the
//! bundled Cangjie grammar.

pub mod error;
pub mod types;

mod syntect;

pub use error::{SyntaxError, SyntaxResult};
pub use syntect::{SyntectHighlighter, create_syntect_manager};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

/// Create the default syntax manager.
#[must_use]
pub fn create_default_manager(default_theme: Option<&str>) -> SyntaxManager {
  create_syntect_manager(default_theme)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn syntax_config_default_aliases() {
    let config = SyntaxConfig::default();
    assert!(config.fallback_to_plain);
    assert_eq!(config.language_aliases["cj"], "cangjie");
    assert_eq!(config.language_aliases["js"], "javascript");
  }

  #[test]
  fn syntect_highlighter_reports_languages_and_themes() {
    let highlighter = SyntectHighlighter::default();
    assert_eq!(highlighter.name(), "Syntect");
    assert!(!highlighter.supported_languages().is_empty());
    assert!(!highlighter.available_themes().is_empty());
  }

  #[test]
  fn cangjie_grammar_is_loaded() {
    let highlighter = SyntectHighlighter::default();
    let languages = highlighter.supported_languages();
    assert!(
      languages.contains(&"cangjie".to_string()),
      "expected the bundled Cangjie grammar to be available"
    );
    assert_eq!(
      highlighter.language_from_extension("cj"),
      Some("cangjie".to_string())
    );
  }

  #[test]
  fn highlight_cangjie_code() {
    let manager = create_default_manager(None);
    let code = r#"func main() {
    let greeting = "hello ${name}"
    println(greeting)
}"#;

    let html = manager
      .highlight_code(code, "cangjie", None)
      .expect("highlighting Cangjie failed");
    assert!(html.starts_with("<pre"));
    assert!(html.contains("<span"));
    assert!(html.contains("main"));
  }

  #[test]
  fn highlight_common_languages() {
    let manager = create_default_manager(None);
    for (code, lang) in [
      ("fn main() {}", "rust"),
      ("const x = 1;", "javascript"),
      ("def f():\n    pass", "python"),
      ("{\"a\": 1}", "json"),
      ("echo hi", "bash"),
    ] {
      let html = manager
        .highlight_code(code, lang, None)
        .unwrap_or_else(|e| panic!("highlighting {lang} failed: {e}"));
      assert!(html.contains("<span"), "no markup produced for {lang}");
    }
  }

  #[test]
  fn unknown_language_falls_back_to_plain() {
    let manager = create_default_manager(None);
    let html = manager
      .highlight_code("plain words", "definitely-not-a-language", None)
      .expect("plain-text fallback failed");
    assert!(html.contains("plain words"));
  }

  #[test]
  fn alias_resolution() {
    let manager = create_default_manager(None);
    assert_eq!(manager.resolve_language("cj"), "cangjie");
    assert_eq!(manager.resolve_language("TS"), "typescript");
    assert_eq!(manager.resolve_language("rust"), "rust");
  }

  #[test]
  fn configured_theme_is_used() {
    let light = create_default_manager(None)
      .highlight_code("let x = 1", "cangjie", None)
      .expect("highlighting with the default theme failed");
    let dark = create_default_manager(Some("Nord"))
      .highlight_code("let x = 1", "cangjie", None)
      .expect("highlighting with Nord failed");
    assert_ne!(light, dark, "theme selection had no effect");
  }
}
