//! Page assembly.
//!
//! Final stage of the build. Takes the scanned [`ContentTree`] and a
//! [`BuildContext`] and renders one HTML page per configured language.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── en/
//! │   └── info.html
//! └── de/
//!     └── info.html
//! ```
//!
//! The file name comes from `pageName` in the content root's `meta.json`.
//!
//! ## Build Context
//!
//! Everything that is the same for every language (config, page metadata,
//! language toggle strings, bundled CSS) is loaded once into a
//! [`BuildContext`] and passed by reference. Rendering a page is a pure
//! function of the context, the tree and the language.
//!
//! ## Failure Behaviour
//!
//! All languages are rendered (in parallel, on the rayon pool) before anything
//! is written. A content or metadata error in any language therefore leaves
//! existing output untouched.

use crate::compose::{self, TopicContext};
use crate::config::SiteConfig;
use crate::markdown::ContentError;
use crate::metadata::{LangToggle, MetadataError, PageMeta};
use crate::styles::{self, StyleError};
use crate::templates::{self, PageData};
use crate::types::{ContentTree, Lang};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Read-only inputs shared by every language's page.
#[derive(Debug)]
pub struct BuildContext {
    pub config: SiteConfig,
    pub content_dir: PathBuf,
    pub meta: PageMeta,
    pub lang_toggle: LangToggle,
    pub internal_css: String,
}

impl BuildContext {
    /// Load metadata, toggle strings and stylesheets for a site.
    pub fn load(site_root: &Path, config: SiteConfig) -> Result<Self, GenerateError> {
        let content_dir = config.content_dir(site_root);
        let meta = PageMeta::load(&content_dir)?;
        let lang_toggle = LangToggle::load(&site_root.join(&config.paths.lang_toggle))?;
        let style_paths: Vec<PathBuf> = config
            .paths
            .styles
            .iter()
            .map(|p| site_root.join(p))
            .collect();
        let internal_css = styles::bundle_styles(&style_paths)?;

        Ok(Self {
            config,
            content_dir,
            meta,
            lang_toggle,
            internal_css,
        })
    }

    /// Output path of a language's page, relative to the output directory.
    pub fn page_path(&self, lang: Lang) -> PathBuf {
        Path::new(lang.code()).join(self.meta.file_name())
    }
}

/// A page written by [`generate`].
#[derive(Debug, Clone)]
pub struct BuiltPage {
    pub lang: Lang,
    /// Relative to the output directory.
    pub path: PathBuf,
    pub sections: usize,
    pub topics: usize,
}

/// Render the page for one language.
pub fn render_page(
    ctx: &BuildContext,
    tree: &ContentTree,
    lang: Lang,
) -> Result<String, GenerateError> {
    let languages = &ctx.config.languages;
    let localized = ctx.meta.localized(lang)?;
    let toggle_strings = ctx.lang_toggle.strings(lang)?;
    let edit_root = ctx.config.edit_root();

    let topic_ctx = TopicContext {
        edit_root: edit_root.as_deref(),
        edit_button_text: &localized.edit_button_text,
    };

    let data = PageData {
        lang,
        title: &localized.title,
        meta_tags: templates::meta_tags(&ctx.meta, localized, lang, languages),
        internal_css: &ctx.internal_css,
        lang_toggle: templates::lang_toggle(toggle_strings, lang, languages, &ctx.meta.page_name),
        page_index: compose::compose_index(tree, lang, &ctx.config.landing_dir)?,
        content: compose::compose_content(tree, lang, topic_ctx)?,
        footer: templates::footer(ctx.config.repository()),
    };

    Ok(templates::page_document(&data).into_string())
}

/// Render every configured language, in configured order.
pub fn render_all(
    ctx: &BuildContext,
    tree: &ContentTree,
) -> Result<Vec<(Lang, String)>, GenerateError> {
    ctx.config
        .languages
        .par_iter()
        .map(|&lang| render_page(ctx, tree, lang).map(|html| (lang, html)))
        .collect()
}

/// Render every language and write the pages below `output_dir`.
pub fn generate(
    ctx: &BuildContext,
    tree: &ContentTree,
    output_dir: &Path,
) -> Result<Vec<BuiltPage>, GenerateError> {
    let rendered = render_all(ctx, tree)?;

    let mut pages = Vec::with_capacity(rendered.len());
    for (lang, html) in rendered {
        let path = ctx.page_path(lang);
        let target = output_dir.join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, html)?;

        pages.push(BuiltPage {
            lang,
            path,
            sections: tree.sections.len(),
            topics: tree.topic_count(),
        });
    }
    Ok(pages)
}
