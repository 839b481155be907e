use std::fs;

use cangen_markdown::{
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  syntax::{SyntaxHighlighter, SyntectHighlighter},
};
use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};

mod cli;
mod config;
mod index;
mod pipeline;

use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Handle subcommands
  if let Some(command) = &cli.command {
    match command {
      Commands::Init {
        output,
        format,
        force,
      } => {
        // Check if file already exists and that we're not forcing overwrite
        if output.exists() && !force {
          bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output.display()
          );
        }

        if let Some(parent) = output.parent() {
          if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).wrap_err_with(|| {
              format!("Failed to create directory: {}", parent.display())
            })?;
          }
        }

        Config::generate_default_config(format, output).wrap_err_with(|| {
          format!(
            "Failed to generate configuration file: {}",
            output.display()
          )
        })?;

        info!(
          "Configuration file created. Edit it to point at your content \
           directories."
        );
        return Ok(());
      },

      Commands::Themes => {
        #[allow(clippy::print_stdout, reason = "Listing is the command's output")]
        for theme in SyntectHighlighter::default().available_themes() {
          println!("{theme}");
        }
        return Ok(());
      },

      // The Build command is merged into the config in Config::load
      Commands::Build { .. } => {},
    }
  }

  // Create configuration from CLI and/or config file
  let config = Config::load(&cli)?;

  // Run the main generation process
  generate_site_content(&config)
}

/// Main content generation process
fn generate_site_content(config: &Config) -> Result<()> {
  info!("Starting site content generation...");

  // Setup thread pool once for all parallel operations
  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()?;

  let processor = MarkdownProcessor::new(
    MarkdownOptionsBuilder::new()
      .gfm(true)
      .highlight_code(config.highlight_code)
      .highlight_theme(Some(config.highlight_theme.clone()))
      .build(),
  );

  // Blogs: render fragments, then keep the index in sync
  let posts = pipeline::process_section(&processor, &config.blogs)?;
  if let Some(index_path) = &config.blogs.index {
    index::update_index(index_path, &posts)?;
  }

  // News: same conversion path, own directories
  if let Some(news) = &config.news {
    let news_posts = pipeline::process_section(&processor, news)?;
    if let Some(index_path) = &news.index {
      index::update_index(index_path, &news_posts)?;
    }
  }

  info!("Site content generated successfully");

  Ok(())
}
