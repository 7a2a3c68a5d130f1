//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every section and
//! topic is listed by positional index and title, with its source file as an
//! indented `Source:` line. The result reads as an inventory of the page
//! while still pointing back at the files to edit.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Sections
//! 001 Welcome (not indexed)
//!     Source: a-landing.md
//!     001 Hello
//!         Source: a-landing/welcome.md
//! 002 Frequently asked questions (2 topics)
//!     Source: faq.md
//!     001 Accounts
//!         Source: faq/accounts.md
//!     002 Billing
//!         Source: faq/billing.md
//!
//! Warnings
//!     skipped non-Markdown entry faq/notes.txt
//! ```
//!
//! ## Generate
//!
//! ```text
//! en → en/info.html (4 sections, 5 topics)
//! de → de/info.html (4 sections, 5 topics)
//!
//! Generated 2 pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::generate::BuiltPage;
use crate::types::{ContentTree, Lang, ScanWarning};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path relative to the content root, for display.
fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn format_warning(root: &Path, warning: &ScanWarning) -> String {
    match warning {
        ScanWarning::Skipped(path) => {
            format!("skipped non-Markdown entry {}", display_path(root, path))
        }
        ScanWarning::OrphanDirectory(path) => {
            format!("directory {} has no section file", display_path(root, path))
        }
        ScanWarning::DuplicateAnchor { id, path } => {
            format!("anchor #{} reused by {}", id, display_path(root, path))
        }
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scanned content tree, titles in `lang`.
///
/// Sections that won't appear in the page index are marked `(not indexed)`.
pub fn format_scan_output(tree: &ContentTree, lang: Lang, landing_dir: &str) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    for (i, section) in tree.sections.iter().enumerate() {
        let title = section
            .content
            .records
            .get(&lang)
            .map(|r| r.title.as_str())
            .unwrap_or(&section.name);

        let detail = if !section.has_topic_dir || section.name == landing_dir {
            " (not indexed)".to_string()
        } else {
            match section.topics.len() {
                1 => " (1 topic)".to_string(),
                n => format!(" ({} topics)", n),
            }
        };

        lines.push(format!("{} {}{}", format_index(i + 1), title, detail));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            display_path(&tree.root, &section.content.source)
        ));

        for (j, topic) in section.topics.iter().enumerate() {
            let title = topic
                .content
                .records
                .get(&lang)
                .map(|r| r.title.as_str())
                .unwrap_or(&topic.id);
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), title));
            lines.push(format!(
                "{}Source: {}",
                indent(2),
                display_path(&tree.root, &topic.content.source)
            ));
        }
    }

    if !tree.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &tree.warnings {
            lines.push(format!("{}{}", indent(1), format_warning(&tree.root, warning)));
        }
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(tree: &ContentTree, lang: Lang, landing_dir: &str) {
    for line in format_scan_output(tree, lang, landing_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the pages written by the generate stage.
pub fn format_generate_output(pages: &[BuiltPage]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|page| {
            format!(
                "{} \u{2192} {} ({} sections, {} topics)",
                page.lang,
                page.path.display(),
                page.sections,
                page.topics
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(match pages.len() {
        1 => "Generated 1 page".to_string(),
        n => format!("Generated {} pages", n),
    });
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(pages: &[BuiltPage]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}
