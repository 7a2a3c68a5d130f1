//! Page metadata and fragment strings.
//!
//! Two JSON files feed the page chrome:
//!
//! - `meta.json` in the content root: per-language page title, description and
//!   edit button text, plus language-independent Open Graph fields and the page
//!   name that output files and language links are named after.
//!
//!   ```json
//!   {
//!     "en": { "title": "Info", "editButtonText": "Edit on GitHub" },
//!     "de": { "title": "Info", "editButtonText": "Auf GitHub bearbeiten" },
//!     "openGraphImageLink": "/img/og.png",
//!     "openGraphType": "website",
//!     "pageName": "info"
//!   }
//!   ```
//!
//! - the language toggle's `meta.json`: per-language label and language names.
//!
//!   ```json
//!   { "en": { "label": "Language", "names": { "en": "English", "de": "Deutsch" } } }
//!   ```
//!
//! Entries for a language are looked up when that language's page is rendered.
//! A missing entry is a [`MetadataError::MissingContext`]: the page cannot be
//! rendered without it.

use crate::types::Lang;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const META_FILE: &str = "meta.json";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} has no '{lang}' entry needed to render the page")]
    MissingContext { path: PathBuf, lang: Lang },
}

/// Contents of the page's `meta.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(skip)]
    pub source: PathBuf,
    /// Base name of the output file and of language toggle links.
    pub page_name: String,
    #[serde(default = "default_og_type")]
    pub open_graph_type: String,
    #[serde(default)]
    pub open_graph_image_link: Option<String>,
    #[serde(flatten)]
    pub localized: BTreeMap<Lang, LocalizedMeta>,
}

fn default_og_type() -> String {
    "website".to_string()
}

/// Per-language part of `meta.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMeta {
    pub title: String,
    pub edit_button_text: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PageMeta {
    /// Load `meta.json` from the content root.
    pub fn load(content_root: &Path) -> Result<Self, MetadataError> {
        let path = content_root.join(META_FILE);
        let mut meta: PageMeta = load_json(&path)?;
        meta.source = path;
        Ok(meta)
    }

    pub fn localized(&self, lang: Lang) -> Result<&LocalizedMeta, MetadataError> {
        self.localized
            .get(&lang)
            .ok_or_else(|| MetadataError::MissingContext {
                path: self.source.clone(),
                lang,
            })
    }

    /// Output file name, e.g. `info.html`.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.page_name)
    }
}

/// Strings for the language toggle in one language.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleStrings {
    /// Accessible label of the toggle, e.g. "Language".
    pub label: String,
    /// Display names of the target languages, in this language.
    #[serde(default)]
    pub names: BTreeMap<Lang, String>,
}

impl ToggleStrings {
    /// Display name for `lang`, falling back to its code.
    pub fn name_of(&self, lang: Lang) -> &str {
        self.names.get(&lang).map(String::as_str).unwrap_or(lang.code())
    }
}

/// Contents of the language toggle's `meta.json`.
#[derive(Debug, Clone)]
pub struct LangToggle {
    pub source: PathBuf,
    pub strings: BTreeMap<Lang, ToggleStrings>,
}

impl LangToggle {
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        Ok(Self {
            source: path.to_path_buf(),
            strings: load_json(path)?,
        })
    }

    pub fn strings(&self, lang: Lang) -> Result<&ToggleStrings, MetadataError> {
        self.strings
            .get(&lang)
            .ok_or_else(|| MetadataError::MissingContext {
                path: self.source.clone(),
                lang,
            })
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, MetadataError> {
    let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| MetadataError::Json {
        path: path.to_path_buf(),
        source,
    })
}
