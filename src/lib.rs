//! # Info Pages
//!
//! Builds a site's multilingual info page: one static HTML document per
//! language, assembled from a directory of Markdown sections and topics.
//! The directory is the data source: top-level `.md` files become sections,
//! a directory of the same name holds the section's topics, and file names
//! become anchor ids.
//!
//! # Architecture: Scan Once, Render Per Language
//!
//! ```text
//! 1. Scan      content/pages/info/  →  ContentTree   (every language parsed once)
//! 2. Compose   ContentTree + lang   →  content + index fragments
//! 3. Generate  fragments + chrome   →  public/<lang>/<page>.html
//! ```
//!
//! The content fragment and the page index are both derived from the same
//! [`types::ContentTree`]. A topic that is rendered is always indexed (landing
//! section aside) and an index entry always has a target on the page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content root into a [`types::ContentTree`], reporting skipped entries |
//! | [`markdown`] | Loads multilingual content files: `+++` language blocks with Markdown bodies |
//! | [`compose`] | Per-language content fragment and page index |
//! | [`generate`] | Loads the build context, renders every language, writes the pages |
//! | [`templates`] | Maud templates for the page chrome and topic articles |
//! | [`metadata`] | Page `meta.json` and language toggle strings |
//! | [`styles`] | Concatenates and minifies the stylesheets inlined into each page |
//! | [`config`] | `config.toml` loading and validation |
//! | [`types`] | Languages and the scanned content tree |
//! | [`naming`] | File-name conventions: anchor ids, topic directories, edit links |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## File Names Define Order
//!
//! Sections and topics appear in byte-wise file-name order. There is no
//! ordering field in the front matter and no dependence on the order the
//! filesystem happens to list entries in. The landing section is named
//! `a-landing` so it sorts first, and it is kept out of the page index.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! checked at compile time and every interpolation is escaped, so the only
//! runtime failure left in rendering is missing per-language data, reported
//! as [`metadata::MetadataError::MissingContext`].
//!
//! ## All Or Nothing
//!
//! Every language is rendered before the first file is written. A broken
//! translation in one language leaves the previous build in place instead of
//! a half-updated output directory.

pub mod compose;
pub mod config;
pub mod generate;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;
pub mod styles;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
