//! Shared test utilities.
//!
//! Content writers for ad-hoc trees in a `TempDir`, a fixture site copy, and
//! a few extractors for asserting on scanned trees.
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_content(&tmp.path().join("faq.md"), "FAQ", "Häufige Fragen");
//! write_content(&tmp.path().join("faq/billing.md"), "Billing", "Abrechnung");
//!
//! let tree = scan(tmp.path(), &Lang::ALL).unwrap();
//! assert_eq!(topic_ids(&tree.sections[0]), vec!["billing"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{ContentTree, Section};

/// Content root inside the fixture site.
pub const FIXTURE_CONTENT: &str = "content/pages/info";

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Content writers
// =========================================================================

/// Source of a content file with an English and a German block.
///
/// Bodies are `"{title} body"` in each language.
pub fn bilingual(en_title: &str, de_title: &str) -> String {
    format!(
        "+++\nlang = \"en\"\ntitle = \"{en_title}\"\n+++\n{en_title} body\n\n\
         +++\nlang = \"de\"\ntitle = \"{de_title}\"\n+++\n{de_title} body\n"
    )
}

/// Write a bilingual content file, creating parent directories.
pub fn write_content(path: &Path, en_title: &str, de_title: &str) {
    write_file(path, &bilingual(en_title, de_title));
}

/// Write a content file that only has an English block.
pub fn write_english_only(path: &Path, title: &str) {
    write_file(
        path,
        &format!("+++\nlang = \"en\"\ntitle = \"{title}\"\n+++\n{title} body\n"),
    );
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =========================================================================
// Extractors
// =========================================================================

pub fn section_names(tree: &ContentTree) -> Vec<&str> {
    tree.sections.iter().map(|s| s.name.as_str()).collect()
}

pub fn topic_ids(section: &Section) -> Vec<&str> {
    section.topics.iter().map(|t| t.id.as_str()).collect()
}
