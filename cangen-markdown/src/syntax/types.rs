//! Core types and traits for syntax highlighting.

use std::collections::HashMap;

use super::error::SyntaxResult;

/// Trait for syntax highlighting backends.
///
/// Implementations handle language detection, theme management, and the
/// actual highlighting process.
pub trait SyntaxHighlighter: Send + Sync {
  /// Name of this highlighter backend.
  fn name(&self) -> &'static str;

  /// Languages this backend can highlight (names and extensions,
  /// lowercase).
  fn supported_languages(&self) -> Vec<String>;

  /// Themes this backend can render with.
  fn available_themes(&self) -> Vec<String>;

  /// Check if a language is supported.
  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  /// Highlight code with the specified language and theme.
  ///
  /// # Arguments
  ///
  /// * `code` - The source code to highlight
  /// * `language` - The language token (case-insensitive)
  /// * `theme` - The theme name (optional)
  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String>;

  /// Detect a language from a file extension.
  fn language_from_extension(&self, extension: &str) -> Option<String>;
}

/// Configuration for syntax highlighting.
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Default theme to use when none is specified.
  pub default_theme: Option<String>,

  /// Language aliases mapping common fence labels to supported languages.
  pub language_aliases: HashMap<String, String>,

  /// Whether to fall back to plain text for unsupported languages.
  pub fallback_to_plain: bool,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let mut language_aliases = HashMap::new();

    // Fence labels seen in the site's content
    language_aliases.insert("cj".to_string(), "cangjie".to_string());
    language_aliases.insert("js".to_string(), "javascript".to_string());
    language_aliases.insert("ts".to_string(), "typescript".to_string());
    language_aliases.insert("py".to_string(), "python".to_string());
    language_aliases.insert("c++".to_string(), "cpp".to_string());
    language_aliases.insert("sh".to_string(), "bash".to_string());
    language_aliases.insert("shell".to_string(), "bash".to_string());
    language_aliases.insert("yml".to_string(), "yaml".to_string());
    language_aliases.insert("plaintext".to_string(), "text".to_string());
    language_aliases.insert("plain".to_string(), "text".to_string());

    Self {
      default_theme: None,
      language_aliases,
      fallback_to_plain: true,
    }
  }
}

/// High-level syntax highlighting manager.
///
/// Wraps a backend and applies alias resolution, the configured default
/// theme, and the plain-text fallback.
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config.
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Get the underlying highlighter.
  #[must_use]
  pub fn highlighter(&self) -> &dyn SyntaxHighlighter {
    self.highlighter.as_ref()
  }

  /// Get the configuration.
  #[must_use]
  pub const fn config(&self) -> &SyntaxConfig {
    &self.config
  }

  /// Resolve a language name using the configured aliases.
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    let lower = language.to_lowercase();
    self
      .config
      .language_aliases
      .get(&lower)
      .cloned()
      .unwrap_or(lower)
  }

  /// Highlight code with alias resolution and plain-text fallback.
  ///
  /// # Errors
  ///
  /// Returns an error when the language is unsupported and the fallback is
  /// disabled, or when the backend fails.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let resolved = self.resolve_language(language);
    let theme = theme.or(self.config.default_theme.as_deref());

    if self.highlighter.supports_language(&resolved) {
      return self.highlighter.highlight(code, &resolved, theme);
    }

    if self.config.fallback_to_plain {
      log::debug!("no grammar for '{resolved}', highlighting as plain text");
      return self.highlighter.highlight(code, "text", theme);
    }

    Err(super::error::SyntaxError::UnsupportedLanguage(resolved))
  }
}
