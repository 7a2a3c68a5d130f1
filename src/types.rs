//! Shared types used across all pipeline stages.
//!
//! The scan produces a [`ContentTree`]; the composers and the page assembler
//! only ever read it. Nothing here touches the filesystem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A supported page language.
///
/// Serialized as the lowercase code used in front matter, `meta.json` keys,
/// `config.toml` and output directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    De,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::De];

    /// Language code, e.g. `"en"`.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Title and rendered HTML body of one content file in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRecord {
    pub title: String,
    pub rendered_body: String,
}

/// All language records of one content file, keyed by language.
///
/// Built by [`crate::markdown::load`], which guarantees an entry for every
/// language it was asked for.
#[derive(Debug, Clone)]
pub struct LocalizedContent {
    /// Source file the records were parsed from.
    pub source: PathBuf,
    pub records: BTreeMap<Lang, LanguageRecord>,
}

/// A top-level content file, optionally owning a directory of topics.
#[derive(Debug, Clone)]
pub struct Section {
    /// File stem; used as the `<section>` id and index anchor.
    pub name: String,
    pub content: LocalizedContent,
    /// Whether a directory named like the section exists. Only such sections
    /// are listed in the page index.
    pub has_topic_dir: bool,
    pub topics: Vec<Topic>,
}

/// A content file inside a section's directory.
#[derive(Debug, Clone)]
pub struct Topic {
    /// File stem; used as the topic fragment id and index anchor.
    pub id: String,
    /// File name including extension, as it appears in edit links.
    pub file_name: String,
    pub content: LocalizedContent,
}

/// Something the scan noticed but did not compose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// A non-Markdown file or nested directory inside a section directory.
    Skipped(PathBuf),
    /// A top-level directory with no same-named `.md` section file.
    OrphanDirectory(PathBuf),
    /// An anchor id already used by an earlier section or topic.
    DuplicateAnchor { id: String, path: PathBuf },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::Skipped(path) => {
                write!(f, "skipped non-Markdown entry {}", path.display())
            }
            ScanWarning::OrphanDirectory(path) => {
                write!(f, "directory {} has no section file", path.display())
            }
            ScanWarning::DuplicateAnchor { id, path } => {
                write!(f, "anchor #{} reused by {}", id, path.display())
            }
        }
    }
}

/// The ordered content of one info page.
#[derive(Debug, Clone)]
pub struct ContentTree {
    pub root: PathBuf,
    pub sections: Vec<Section>,
    pub warnings: Vec<ScanWarning>,
}

impl ContentTree {
    pub fn topic_count(&self) -> usize {
        self.sections.iter().map(|s| s.topics.len()).sum()
    }
}
