//! Section processing: discover markdown sources, render them in parallel,
//! and write the HTML fragments to the mirrored output directory.

use std::{
  fs,
  path::{Path, PathBuf},
};

use cangen_markdown::{MarkdownProcessor, collect_markdown_files};
use color_eyre::eyre::{Context, Result};
use log::{info, warn};
use rayon::prelude::*;

use crate::config::SectionConfig;

/// A post rendered to disk during this run.
#[derive(Debug)]
pub struct RenderedPost {
  /// File stem; maps the post to its output fragment and index record.
  pub slug: String,

  /// Markdown source path.
  pub source: PathBuf,

  /// Raw markdown content, kept for metadata derivation.
  pub content: String,

  /// Title from the first level-1 heading, if any.
  pub title: Option<String>,
}

/// Render every markdown file of a section.
///
/// A file that fails to read or write is reported and skipped so one broken
/// post cannot block the rest of the batch. A missing input directory skips
/// the whole section.
///
/// # Errors
///
/// Returns an error when the output directory cannot be created.
pub fn process_section(
  processor: &MarkdownProcessor,
  section: &SectionConfig,
) -> Result<Vec<RenderedPost>> {
  if !section.input_dir.exists() {
    warn!(
      "Skipping section, input directory does not exist: {}",
      section.input_dir.display()
    );
    return Ok(Vec::new());
  }

  let files = collect_markdown_files(&section.input_dir);
  info!(
    "Processing {} markdown files from {}",
    files.len(),
    section.input_dir.display()
  );

  fs::create_dir_all(&section.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      section.output_dir.display()
    )
  })?;

  let posts: Vec<RenderedPost> = files
    .par_iter()
    .filter_map(|file| {
      match render_one(processor, section, file) {
        Ok(post) => Some(post),
        Err(e) => {
          log::error!("Error processing {}: {e:#}", file.display());
          None
        },
      }
    })
    .collect();

  Ok(posts)
}

fn render_one(
  processor: &MarkdownProcessor,
  section: &SectionConfig,
  file: &Path,
) -> Result<RenderedPost> {
  let content = fs::read_to_string(file).wrap_err_with(|| {
    format!("Failed to read markdown file: {}", file.display())
  })?;

  let result = processor.render(&content);

  let rel = file
    .strip_prefix(&section.input_dir)
    .unwrap_or(file);
  let mut output_path = section.output_dir.join(rel);
  output_path.set_extension("html");

  if let Some(parent) = output_path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create output directory: {}", parent.display())
    })?;
  }

  fs::write(&output_path, &result.html).wrap_err_with(|| {
    format!("Failed to write output HTML: {}", output_path.display())
  })?;

  let slug = file
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();

  Ok(RenderedPost {
    slug,
    source: file.to_path_buf(),
    content,
    title: result.title,
  })
}
