//! Blog index maintenance.
//!
//! The site's list pages read a JSON array of post records. For each
//! rendered post whose slug is not yet present (matched on `name`), a
//! record is derived from the post itself and appended:
//!
//! - `title` — the post's first level-1 heading,
//! - `description` — the first sentence of its body text,
//! - `date` — the source file's creation time as `DD/MM/YYYY`.
//!
//! Existing records are carried as raw JSON values so hand-edited fields
//! round-trip untouched, and the file is rewritten only when at least one
//! record was added.

use std::{
  collections::HashSet,
  fs,
  path::Path,
  time::SystemTime,
};

use cangen_markdown::utils::{first_sentence, strip_markdown};
use color_eyre::eyre::{Context, Result};
use jiff::{Timestamp, tz::TimeZone};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use crate::pipeline::RenderedPost;

/// A record appended for a newly discovered post.
///
/// `tags` and `authors` start empty (the list pages treat them as
/// optional); a repository link is left for hand editing entirely.
#[derive(Debug, Clone, Serialize)]
pub struct IndexRecord {
  pub name:        String,
  pub title:       String,
  pub date:        String,
  pub description: String,
  pub tags:        Vec<String>,
  pub authors:     Vec<String>,
}

/// Append records for posts not yet present in the index.
///
/// A missing index file counts as an empty index and is created on first
/// append. Returns the number of records added; zero means the file was
/// left untouched.
///
/// # Errors
///
/// Returns an error when the index exists but is not valid JSON, or on I/O
/// failure.
pub fn update_index(
  index_path: &Path,
  posts: &[RenderedPost],
) -> Result<usize> {
  let mut records: Vec<Value> = if index_path.exists() {
    let content = fs::read_to_string(index_path).wrap_err_with(|| {
      format!("Failed to read index: {}", index_path.display())
    })?;
    serde_json::from_str(&content).wrap_err_with(|| {
      format!("Index is not a JSON array: {}", index_path.display())
    })?
  } else {
    Vec::new()
  };

  let known: HashSet<&str> = records
    .iter()
    .filter_map(|record| record.get("name").and_then(Value::as_str))
    .collect();

  let mut fresh = Vec::new();
  for post in posts {
    if known.contains(post.slug.as_str()) {
      continue;
    }
    debug!("adding index record for '{}'", post.slug);
    fresh.push(serde_json::to_value(derive_record(post)?)?);
  }
  drop(known);

  let added = fresh.len();
  if added > 0 {
    records.extend(fresh);

    if let Some(parent) = index_path.parent() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create index directory: {}", parent.display())
      })?;
    }

    let mut out = serde_json::to_string_pretty(&records)
      .wrap_err("Failed to serialize index")?;
    out.push('\n');
    fs::write(index_path, out).wrap_err_with(|| {
      format!("Failed to write index: {}", index_path.display())
    })?;

    info!(
      "Added {added} record(s) to {}",
      index_path.display()
    );
  }

  Ok(added)
}

/// Derive an index record from a rendered post.
fn derive_record(post: &RenderedPost) -> Result<IndexRecord> {
  // The list page shows names with underscores as spaces, so that is the
  // title fallback for posts without a heading
  let title = post
    .title
    .clone()
    .unwrap_or_else(|| post.slug.replace('_', " "));

  let description =
    first_sentence(&strip_markdown(&post.content)).unwrap_or_default();

  let metadata = fs::metadata(&post.source).wrap_err_with(|| {
    format!("Failed to stat source file: {}", post.source.display())
  })?;
  let created = metadata
    .created()
    .or_else(|_| metadata.modified())
    .wrap_err_with(|| {
      format!("No timestamps available for: {}", post.source.display())
    })?;

  Ok(IndexRecord {
    name: post.slug.clone(),
    title,
    date: format_display_date(created),
    description,
    tags: Vec::new(),
    authors: Vec::new(),
  })
}

/// Format a timestamp the way the site displays and sorts dates.
fn format_display_date(time: SystemTime) -> String {
  let timestamp =
    Timestamp::try_from(time).unwrap_or(Timestamp::UNIX_EPOCH);
  timestamp
    .to_zoned(TimeZone::system())
    .strftime("%d/%m/%Y")
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_date_format() {
    let date = format_display_date(SystemTime::now());
    let parts: Vec<&str> = date.split('/').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].len(), 2);
    assert_eq!(parts[1].len(), 2);
    assert_eq!(parts[2].len(), 4);
  }
}
