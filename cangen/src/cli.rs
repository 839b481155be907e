use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for cangen
#[derive(Parser, Debug)]
#[command(author, version, about = "cangen: Cangjie team site preprocessor")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the cangen CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new cangen configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "cangen.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render blog and news markdown and update the blog index.
  Build {
    /// Directory containing blog markdown files.
    #[arg(short, long)]
    blogs_dir: Option<PathBuf>,

    /// Output directory for rendered blog fragments.
    #[arg(long)]
    blogs_output: Option<PathBuf>,

    /// Path to the blog index JSON file (auto-appended with new posts).
    #[arg(long)]
    blog_index: Option<PathBuf>,

    /// Directory containing news markdown files.
    #[arg(short, long)]
    news_dir: Option<PathBuf>,

    /// Output directory for rendered news fragments.
    #[arg(long)]
    news_output: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Syntax highlighting theme for code blocks.
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Disable syntax highlighting for code blocks.
    #[arg(long = "no-highlight", action = clap::ArgAction::SetTrue)]
    no_highlight: bool,
  },

  /// List the available syntax highlighting themes.
  Themes,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
