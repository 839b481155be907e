use std::fs;

use cangen::{
  config::SectionConfig,
  index::update_index,
  pipeline::process_section,
};
use cangen_markdown::{MarkdownOptions, MarkdownProcessor};

struct Fixture {
  dir: tempfile::TempDir,
}

impl Fixture {
  fn new(posts: &[(&str, &str)]) -> Self {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let blogs = dir.path().join("blogs");
    fs::create_dir_all(&blogs).expect("mkdir failed");
    for (name, content) in posts {
      fs::write(blogs.join(name), content).expect("write failed");
    }
    Self { dir }
  }

  fn render(&self) -> Vec<cangen::pipeline::RenderedPost> {
    let section = SectionConfig {
      input_dir:  self.dir.path().join("blogs"),
      output_dir: self.dir.path().join("blogsHTML"),
      index:      None,
    };
    let processor = MarkdownProcessor::new(MarkdownOptions::default());
    process_section(&processor, &section).expect("render failed")
  }

  fn index_path(&self) -> std::path::PathBuf {
    self.dir.path().join("data/blogInformation.json")
  }
}

#[test]
fn creates_index_with_derived_records() {
  let fixture = Fixture::new(&[(
    "Memory_Model.md",
    "# The Cangjie Memory Model\n\nA short tour of ownership in Cangjie. \
     It goes deeper later.\n\n```cangjie\nlet x = 1\n```\n",
  )]);
  let posts = fixture.render();

  let added =
    update_index(&fixture.index_path(), &posts).expect("update failed");
  assert_eq!(added, 1);

  let content =
    fs::read_to_string(fixture.index_path()).expect("index missing");
  let records: Vec<serde_json::Value> =
    serde_json::from_str(&content).expect("index is not JSON");
  assert_eq!(records.len(), 1);

  let record = &records[0];
  assert_eq!(record["name"], "Memory_Model");
  assert_eq!(record["title"], "The Cangjie Memory Model");
  assert_eq!(
    record["description"],
    "A short tour of ownership in Cangjie."
  );
  assert_eq!(record["tags"], serde_json::json!([]));
  assert_eq!(record["authors"], serde_json::json!([]));

  let date = record["date"].as_str().expect("date missing");
  let parts: Vec<&str> = date.split('/').collect();
  assert_eq!(parts.len(), 3, "date should be DD/MM/YYYY, got {date}");
  assert_eq!(parts[0].len(), 2);
  assert_eq!(parts[1].len(), 2);
  assert_eq!(parts[2].len(), 4);
}

#[test]
fn second_run_adds_nothing_and_leaves_file_untouched() {
  let fixture = Fixture::new(&[
    ("a.md", "# A\n\nFirst post body.\n"),
    ("b.md", "# B\n\nSecond post body.\n"),
  ]);
  let posts = fixture.render();

  let added =
    update_index(&fixture.index_path(), &posts).expect("update failed");
  assert_eq!(added, 2);
  let first_pass =
    fs::read(fixture.index_path()).expect("index missing");

  let added =
    update_index(&fixture.index_path(), &posts).expect("update failed");
  assert_eq!(added, 0);
  let second_pass =
    fs::read(fixture.index_path()).expect("index missing");

  assert_eq!(first_pass, second_pass);
}

#[test]
fn existing_records_round_trip_untouched() {
  let fixture = Fixture::new(&[
    ("known.md", "# Known\n\nAlready indexed.\n"),
    ("fresh.md", "# Fresh\n\nNot yet indexed.\n"),
  ]);
  let posts = fixture.render();

  // Hand-written record with fields the tool never produces
  fs::create_dir_all(fixture.dir.path().join("data")).expect("mkdir failed");
  fs::write(
    fixture.index_path(),
    r#"[
  {
    "name": "known",
    "date": "03/02/2025",
    "description": "Hand-written summary.",
    "tags": ["compiler", "deep-dive"],
    "repoLink": "https://example.com/repo",
    "authors": ["ada"]
  }
]
"#,
  )
  .expect("write failed");

  let added =
    update_index(&fixture.index_path(), &posts).expect("update failed");
  assert_eq!(added, 1);

  let content =
    fs::read_to_string(fixture.index_path()).expect("index missing");
  let records: Vec<serde_json::Value> =
    serde_json::from_str(&content).expect("index is not JSON");
  assert_eq!(records.len(), 2);

  // The hand-written record keeps every field, in its original key order
  let known = &records[0];
  assert_eq!(known["name"], "known");
  assert_eq!(known["date"], "03/02/2025");
  assert_eq!(known["repoLink"], "https://example.com/repo");
  assert_eq!(known["tags"], serde_json::json!(["compiler", "deep-dive"]));
  let keys: Vec<&String> = known
    .as_object()
    .expect("record should be an object")
    .keys()
    .collect();
  assert_eq!(keys[0], "name");
  assert_eq!(keys[1], "date");

  // The new record is appended after the existing ones
  assert_eq!(records[1]["name"], "fresh");
  assert_eq!(records[1]["title"], "Fresh");
}

#[test]
fn post_without_heading_falls_back_to_slug_title() {
  let fixture = Fixture::new(&[(
    "release_notes.md",
    "Just a body without any heading at all\n",
  )]);
  let posts = fixture.render();

  update_index(&fixture.index_path(), &posts).expect("update failed");

  let content =
    fs::read_to_string(fixture.index_path()).expect("index missing");
  let records: Vec<serde_json::Value> =
    serde_json::from_str(&content).expect("index is not JSON");
  assert_eq!(records[0]["title"], "release notes");
}

#[test]
fn invalid_index_is_an_error() {
  let fixture = Fixture::new(&[("a.md", "# A\n\nbody.\n")]);
  let posts = fixture.render();

  fs::create_dir_all(fixture.dir.path().join("data")).expect("mkdir failed");
  fs::write(fixture.index_path(), "{ not json ]").expect("write failed");

  assert!(update_index(&fixture.index_path(), &posts).is_err());
}

#[test]
fn no_posts_means_no_index_file() {
  let fixture = Fixture::new(&[]);
  let posts = fixture.render();
  let added =
    update_index(&fixture.index_path(), &posts).expect("update failed");
  assert_eq!(added, 0);
  assert!(!fixture.index_path().exists());
}
