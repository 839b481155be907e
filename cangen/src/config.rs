use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};

fn default_highlight_theme() -> String {
  "InspiredGitHub".to_string()
}

const fn default_true() -> bool {
  true
}

fn default_blogs_section() -> SectionConfig {
  SectionConfig {
    input_dir:  PathBuf::from("blogs"),
    output_dir: PathBuf::from("blogsHTML"),
    index:      Some(PathBuf::from("data/blogInformation.json")),
  }
}

fn default_news_section() -> Option<SectionConfig> {
  Some(SectionConfig {
    input_dir:  PathBuf::from("news"),
    output_dir: PathBuf::from("newsHTML"),
    index:      None,
  })
}

/// One content section: a directory of markdown posts rendered into a
/// mirrored output directory, optionally feeding a JSON index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
  /// Directory containing the markdown sources.
  pub input_dir: PathBuf,

  /// Directory the rendered HTML fragments are written to.
  pub output_dir: PathBuf,

  /// JSON index that gets a record auto-appended for each new post.
  /// Omit to leave the section's index (if any) maintained by hand.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub index: Option<PathBuf>,
}

/// Configuration options for cangen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Whether to enable syntax highlighting for code blocks
  #[serde(default = "default_true")]
  pub highlight_code: bool,

  /// Syntax highlighting theme
  #[serde(default = "default_highlight_theme")]
  pub highlight_theme: String,

  /// Number of threads to use for parallel processing
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub jobs: Option<usize>,

  /// The blog section
  #[serde(default = "default_blogs_section")]
  pub blogs: SectionConfig,

  /// The news section. Set to nothing to disable news processing.
  #[serde(default = "default_news_section", skip_serializing_if = "Option::is_none")]
  pub news: Option<SectionConfig>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      highlight_code:  true,
      highlight_theme: default_highlight_theme(),
      jobs:            None,
      blogs:           default_blogs_section(),
      news:            default_news_section(),
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
      bail!("Config file has no extension: {}", path.display());
    };

    match ext.to_lowercase().as_str() {
      "json" => {
        serde_json::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse JSON config from {}", path.display())
        })
      },
      "toml" => {
        toml::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse TOML config from {}", path.display())
        })
      },
      _ => bail!("Unsupported config file format: {}", path.display()),
    }
  }

  /// Load config from file and CLI arguments
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(config_path) = &cli.config_file {
      // Config file explicitly specified via CLI
      Self::from_file(config_path).wrap_err_with(|| {
        format!("Failed to load config from {}", config_path.display())
      })?
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered).wrap_err_with(|| {
        format!(
          "Failed to load discovered config from {}",
          discovered.display()
        )
      })?
    } else {
      Self::default()
    };

    // Merge CLI arguments
    config.merge_with_cli(cli);

    // The blog directory is the one input we cannot do without
    if !config.blogs.input_dir.exists() {
      bail!(
        "Blogs directory does not exist: {}. Run from the site root, or \
         point --blogs-dir or a config file at it.",
        config.blogs.input_dir.display()
      );
    }

    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(Commands::Build {
      blogs_dir,
      blogs_output,
      blog_index,
      news_dir,
      news_output,
      jobs,
      theme,
      no_highlight,
    }) = &cli.command
    {
      if let Some(blogs_dir) = blogs_dir {
        self.blogs.input_dir.clone_from(blogs_dir);
      }

      if let Some(blogs_output) = blogs_output {
        self.blogs.output_dir.clone_from(blogs_output);
      }

      if let Some(blog_index) = blog_index {
        self.blogs.index = Some(blog_index.clone());
      }

      if news_dir.is_some() || news_output.is_some() {
        let news = self.news.get_or_insert_with(|| SectionConfig {
          input_dir:  PathBuf::from("news"),
          output_dir: PathBuf::from("newsHTML"),
          index:      None,
        });
        if let Some(news_dir) = news_dir {
          news.input_dir.clone_from(news_dir);
        }
        if let Some(news_output) = news_output {
          news.output_dir.clone_from(news_output);
        }
      }

      self.jobs = jobs.or(self.jobs);

      if let Some(theme) = theme {
        self.highlight_theme.clone_from(theme);
      }

      if *no_highlight {
        self.highlight_code = false;
      }
    }
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let config_filenames = [
      "cangen.toml",
      "cangen.json",
      ".cangen.toml",
      ".cangen.json",
      ".config/cangen.toml",
      ".config/cangen.json",
    ];

    let current_dir = std::env::current_dir().ok()?;
    for filename in &config_filenames {
      let config_path = current_dir.join(filename);
      if config_path.exists() {
        return Some(config_path);
      }
    }

    // If we have a $XDG_CONFIG_HOME environment variable, check there too
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let xdg_config_dir = PathBuf::from(xdg_config_home).join("cangen");
      for filename in &["config.toml", "config.json"] {
        let config_path = xdg_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    None
  }

  /// Generate a default configuration file in the requested format.
  pub fn generate_default_config(format: &str, output: &Path) -> Result<()> {
    let config = Self::default();

    let content = match format {
      "json" => serde_json::to_string_pretty(&config)
        .wrap_err("Failed to serialize default config as JSON")?,
      "toml" => toml::to_string_pretty(&config)
        .wrap_err("Failed to serialize default config as TOML")?,
      _ => bail!("Unsupported config format: {format}"),
    };

    fs::write(output, content).wrap_err_with(|| {
      format!("Failed to write config file: {}", output.display())
    })?;

    log::info!("Created configuration file: {}", output.display());
    Ok(())
  }
}
