//! File naming conventions shared by the scan and the composers.
//!
//! Content files are identified purely by their names:
//! - `faq.md` is a section with anchor id `faq`
//! - `faq/` is the topic directory of that section (extension stripped, nothing appended)
//! - `faq/billing.md` is a topic with anchor id `billing`
//!
//! Only the exact lowercase `.md` extension counts as Markdown.

use std::path::{Path, PathBuf};

pub const MARKDOWN_EXT: &str = "md";

/// Whether the path names a Markdown file by extension alone.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == MARKDOWN_EXT)
}

/// Anchor id for a content file: its file name without the `.md` extension.
pub fn anchor_id(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Topic directory belonging to a section file: same path, extension stripped.
///
/// `content/faq.md` → `content/faq`
pub fn topic_dir(section_file: &Path) -> PathBuf {
    section_file.with_extension("")
}

/// Build a GitHub edit link for a topic.
///
/// `edit_root` is expected to end with `/`; the section directory name and
/// the topic file name are appended as `{section}/{file}`.
pub fn edit_link(edit_root: &str, section: &str, topic_file: &str) -> String {
    format!("{}{}/{}", edit_root, section, topic_file)
}
