//! Content tree scanning.
//!
//! Walks the content root once and produces the [`ContentTree`] that both the
//! content and the index composers read. Using one traversal with one filter
//! means a topic is either in both outputs or in neither.
//!
//! ## Directory Structure
//!
//! ```text
//! content/pages/info/          # Content root
//! ├── meta.json                # Page metadata (ignored by the scan)
//! ├── a-landing.md             # Section
//! ├── a-landing/               # Its topics (landing: content only, not indexed)
//! │   └── welcome.md
//! ├── faq.md                   # Section
//! ├── faq/                     # Its topics
//! │   ├── billing.md           # Topic, anchor #billing
//! │   └── notes.txt            # Skipped and reported
//! ├── privacy.md               # Section without topics (not indexed)
//! └── drafts/                  # No drafts.md: reported as orphan
//! ```
//!
//! ## Ordering
//!
//! Entries are visited in byte-wise file-name order at every level, whatever
//! order the filesystem lists them in. Document order is therefore a function
//! of the names alone, which is why the landing section is called `a-landing`.
//!
//! ## Warnings
//!
//! Things the scan skips are reported as [`ScanWarning`]s instead of being
//! dropped silently: non-Markdown entries in topic directories, directories
//! without a section file, and anchor ids used twice. Hidden Markdown files
//! (`.draft.md`) are skipped with a warning; other hidden entries (`.DS_Store`,
//! `.git`) are ignored without one.
//!
//! Topic files may be symlinks. Section files at the content root must be
//! regular files.

use crate::markdown::{self, ContentError};
use crate::naming;
use crate::types::{ContentTree, Lang, ScanWarning, Section, Topic};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan `root` into an ordered content tree.
///
/// Every content file must carry a block for each of `languages`.
pub fn scan(root: &Path, languages: &[Lang]) -> Result<ContentTree, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut warnings = Vec::new();
    let entries = list_entries(root, &mut warnings)?;
    let mut sections = Vec::new();

    for entry in &entries {
        if entry.file_type().is_file() && naming::is_markdown(entry.path()) {
            sections.push(scan_section(entry.path(), languages, &mut warnings)?);
        }
    }

    let section_names: HashSet<&str> = sections.iter().map(|s| s.name.as_str()).collect();
    for entry in &entries {
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() && !section_names.contains(name.as_ref()) {
            warnings.push(ScanWarning::OrphanDirectory(entry.path().to_path_buf()));
        }
    }

    flag_duplicate_anchors(&sections, &mut warnings);

    Ok(ContentTree {
        root: root.to_path_buf(),
        sections,
        warnings,
    })
}

fn scan_section(
    path: &Path,
    languages: &[Lang],
    warnings: &mut Vec<ScanWarning>,
) -> Result<Section, ScanError> {
    let content = markdown::load(path, languages)?;
    let name = naming::anchor_id(path).unwrap_or_default();

    let dir = naming::topic_dir(path);
    let has_topic_dir = dir.is_dir();
    let mut topics = Vec::new();

    if has_topic_dir {
        for entry in list_entries(&dir, warnings)? {
            let topic_path = entry.path();
            // Follows symlinks: a linked topic file is still a topic.
            if topic_path.is_file() && naming::is_markdown(topic_path) {
                topics.push(Topic {
                    id: naming::anchor_id(topic_path).unwrap_or_default(),
                    file_name: entry.file_name().to_string_lossy().into_owned(),
                    content: markdown::load(topic_path, languages)?,
                });
            } else {
                warnings.push(ScanWarning::Skipped(topic_path.to_path_buf()));
            }
        }
    }

    Ok(Section {
        name,
        content,
        has_topic_dir,
        topics,
    })
}

/// Direct children of `dir`, hidden entries excluded, sorted by file name.
///
/// Hidden Markdown files (`.draft.md`) are reported as skipped.
fn list_entries(dir: &Path, warnings: &mut Vec<ScanWarning>) -> Result<Vec<DirEntry>, ScanError> {
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let (hidden, visible): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|e| e.file_name().to_string_lossy().starts_with('.'));
    warnings.extend(
        hidden
            .iter()
            .filter(|e| naming::is_markdown(e.path()))
            .map(|e| ScanWarning::Skipped(e.path().to_path_buf())),
    );
    Ok(visible)
}

fn flag_duplicate_anchors(sections: &[Section], warnings: &mut Vec<ScanWarning>) {
    let mut seen = HashSet::new();
    let anchors = sections.iter().flat_map(|section| {
        std::iter::once((&section.name, &section.content.source)).chain(
            section
                .topics
                .iter()
                .map(|topic| (&topic.id, &topic.content.source)),
        )
    });

    for (id, path) in anchors {
        if !seen.insert(id.as_str()) {
            warnings.push(ScanWarning::DuplicateAnchor {
                id: id.clone(),
                path: path.clone(),
            });
        }
    }
}
