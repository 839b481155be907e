//! Syntect-based syntax highlighting backend.
//!
//! Uses Sublime Text syntax definitions (TextMate-style grammars) through
//! the syntect library, extended with the two-face definition set, plus the
//! bundled grammar for the Cangjie language that no stock definition set
//! carries.

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::highlighted_html_for_string,
  parsing::{SyntaxSet, syntax_definition::SyntaxDefinition},
};
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

/// The bundled Cangjie grammar, compiled into the binary.
const CANGJIE_SYNTAX: &str = include_str!("cangjie.sublime-syntax");

/// Theme used when nothing is configured. A light theme, matching the
/// site's styling.
const DEFAULT_THEME: &str = "InspiredGitHub";

/// Syntect-based syntax highlighter.
pub struct SyntectHighlighter {
  theme_name: String,
}

impl SyntectHighlighter {
  /// Create a new highlighter with the specified default theme.
  #[must_use]
  pub fn new(theme_name: Option<String>) -> Self {
    Self {
      theme_name: theme_name.unwrap_or_else(|| DEFAULT_THEME.to_string()),
    }
  }

  /// The syntax set: two-face's extended definitions plus Cangjie.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
      let mut builder = two_face::syntax::extra_newlines().into_builder();
      match SyntaxDefinition::load_from_str(CANGJIE_SYNTAX, true, None) {
        Ok(cangjie) => builder.add(cangjie),
        Err(e) => {
          log::error!("failed to load bundled Cangjie grammar: {e}");
        },
      }
      builder.build()
    })
  }

  /// The default syntect theme set.
  fn default_theme_set() -> &'static ThemeSet {
    static DEFAULT_THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    DEFAULT_THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// The extended two-face theme set.
  fn extra_theme_set() -> &'static EmbeddedLazyThemeSet {
    static EXTRA_THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();
    EXTRA_THEME_SET.get_or_init(two_face::theme::extra)
  }

  /// Names of the embedded two-face themes we expose.
  fn embedded_theme(name: &str) -> Option<EmbeddedThemeName> {
    match name {
      "Github" => Some(EmbeddedThemeName::Github),
      "InspiredGithub" => Some(EmbeddedThemeName::InspiredGithub),
      "Nord" => Some(EmbeddedThemeName::Nord),
      "Dracula" => Some(EmbeddedThemeName::Dracula),
      "GruvboxDark" => Some(EmbeddedThemeName::GruvboxDark),
      "GruvboxLight" => Some(EmbeddedThemeName::GruvboxLight),
      "OneHalfDark" => Some(EmbeddedThemeName::OneHalfDark),
      "OneHalfLight" => Some(EmbeddedThemeName::OneHalfLight),
      "SolarizedDark" => Some(EmbeddedThemeName::SolarizedDark),
      "SolarizedLight" => Some(EmbeddedThemeName::SolarizedLight),
      "MonokaiExtended" => Some(EmbeddedThemeName::MonokaiExtended),
      "MonokaiExtendedLight" => Some(EmbeddedThemeName::MonokaiExtendedLight),
      "VisualStudioDarkPlus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
      "ColdarkCold" => Some(EmbeddedThemeName::ColdarkCold),
      "ColdarkDark" => Some(EmbeddedThemeName::ColdarkDark),
      "Zenburn" => Some(EmbeddedThemeName::Zenburn),
      _ => None,
    }
  }

  /// Look up a theme by name, falling back to the configured default and
  /// finally to [`DEFAULT_THEME`].
  fn get_theme(&self, theme_name: Option<&str>) -> &'static Theme {
    let name = theme_name.unwrap_or_else(|| {
      if self.theme_name.is_empty() {
        DEFAULT_THEME
      } else {
        &self.theme_name
      }
    });

    if let Some(theme) = Self::default_theme_set().themes.get(name) {
      return theme;
    }

    if let Some(embedded) = Self::embedded_theme(name) {
      return Self::extra_theme_set().get(embedded);
    }

    log::warn!("unknown highlight theme '{name}', using {DEFAULT_THEME}");
    Self::default_theme_set()
      .themes
      .get(DEFAULT_THEME)
      .unwrap_or_else(|| {
        Self::extra_theme_set().get(EmbeddedThemeName::InspiredGithub)
      })
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(None)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supported_languages(&self) -> Vec<String> {
    Self::syntax_set()
      .syntaxes()
      .iter()
      .flat_map(|syntax| {
        std::iter::once(syntax.name.to_lowercase())
          .chain(syntax.file_extensions.iter().map(|ext| ext.to_lowercase()))
      })
      .collect()
  }

  fn available_themes(&self) -> Vec<String> {
    let mut themes: Vec<String> =
      Self::default_theme_set().themes.keys().cloned().collect();
    themes.extend(
      [
        "Github",
        "InspiredGithub",
        "Nord",
        "Dracula",
        "GruvboxDark",
        "GruvboxLight",
        "OneHalfDark",
        "OneHalfLight",
        "SolarizedDark",
        "SolarizedLight",
        "MonokaiExtended",
        "MonokaiExtendedLight",
        "VisualStudioDarkPlus",
        "ColdarkCold",
        "ColdarkDark",
        "Zenburn",
      ]
      .map(String::from),
    );
    themes.sort();
    themes.dedup();
    themes
  }

  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let theme = self.get_theme(theme);

    highlighted_html_for_string(code, syntax_set, syntax, theme)
      .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))
  }

  fn language_from_extension(&self, extension: &str) -> Option<String> {
    Self::syntax_set()
      .find_syntax_by_extension(extension)
      .map(|syntax| syntax.name.to_lowercase())
  }
}

/// Create a syntect-backed syntax manager with the default configuration.
#[must_use]
pub fn create_syntect_manager(default_theme: Option<&str>) -> SyntaxManager {
  let highlighter =
    Box::new(SyntectHighlighter::new(default_theme.map(String::from)));
  let mut config = SyntaxConfig::default();
  config.default_theme =
    Some(default_theme.unwrap_or(DEFAULT_THEME).to_string());
  SyntaxManager::new(highlighter, config)
}
