//! Multilingual Markdown content files.
//!
//! A content file holds one block per language. Each block opens with a TOML
//! front matter fenced by lines that are exactly `+++`, followed by the
//! Markdown body, which runs until the next fence or the end of the file:
//!
//! ```text
//! +++
//! lang = "en"
//! title = "FAQ"
//! +++
//! Answers to *frequent* questions.
//!
//! +++
//! lang = "de"
//! title = "Häufige Fragen"
//! +++
//! Antworten auf *häufige* Fragen.
//! ```
//!
//! Bodies are rendered to HTML with pulldown-cmark at load time, so the rest
//! of the pipeline only ever sees [`LanguageRecord`]s. A fence line inside a
//! body always starts a new block; there is no escaping.

use crate::types::{Lang, LanguageRecord, LocalizedContent};
use pulldown_cmark::{Options, Parser, html as md_html};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FENCE: &str = "+++";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("No '{lang}' block in {path}")]
    MissingLanguage { path: PathBuf, lang: Lang },
}

/// Front matter of a single language block.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockHeader {
    lang: Lang,
    title: String,
}

impl LocalizedContent {
    /// The record for `lang`, or [`ContentError::MissingLanguage`].
    pub fn record(&self, lang: Lang) -> Result<&LanguageRecord, ContentError> {
        self.records
            .get(&lang)
            .ok_or_else(|| ContentError::MissingLanguage {
                path: self.source.clone(),
                lang,
            })
    }
}

/// Read and parse a content file, requiring a block for every language in `languages`.
pub fn load(path: &Path, languages: &[Lang]) -> Result<LocalizedContent, ContentError> {
    if !path.is_file() {
        return Err(ContentError::NotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source, path, languages)
}

/// Parse the text of a content file. `path` is only used for error messages
/// and as the identity of the result.
pub fn parse(
    source: &str,
    path: &Path,
    languages: &[Lang],
) -> Result<LocalizedContent, ContentError> {
    let mut records = BTreeMap::new();
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    for (header, body) in split_blocks(source, path)? {
        let header: BlockHeader = toml::from_str(&header).map_err(|e| ContentError::Parse {
            path: path.to_path_buf(),
            message: format!("invalid front matter: {}", e.message()),
        })?;
        if records.contains_key(&header.lang) {
            return Err(ContentError::Parse {
                path: path.to_path_buf(),
                message: format!("duplicate '{}' block", header.lang),
            });
        }
        records.insert(
            header.lang,
            LanguageRecord {
                title: header.title.trim().to_string(),
                rendered_body: render_markdown(&body),
            },
        );
    }

    if let Some(&lang) = languages.iter().find(|l| !records.contains_key(l)) {
        return Err(ContentError::MissingLanguage {
            path: path.to_path_buf(),
            lang,
        });
    }

    Ok(LocalizedContent {
        source: path.to_path_buf(),
        records,
    })
}

enum State {
    Preamble,
    Header,
    Body,
}

/// Split a content file into `(front matter, markdown body)` pairs.
fn split_blocks(source: &str, path: &Path) -> Result<Vec<(String, String)>, ContentError> {
    let parse_error = |message: String| ContentError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut blocks = Vec::new();
    let mut header = String::new();
    let mut body = String::new();
    let mut state = State::Preamble;

    for (idx, line) in source.lines().enumerate() {
        let is_fence = line.trim_end() == FENCE;
        match state {
            State::Preamble => {
                if is_fence {
                    state = State::Header;
                } else if !line.trim().is_empty() {
                    return Err(parse_error(format!(
                        "line {}: text before the first `{FENCE}` front matter",
                        idx + 1
                    )));
                }
            }
            State::Header => {
                if is_fence {
                    state = State::Body;
                } else {
                    header.push_str(line);
                    header.push('\n');
                }
            }
            State::Body => {
                if is_fence {
                    blocks.push((std::mem::take(&mut header), std::mem::take(&mut body)));
                    state = State::Header;
                } else {
                    body.push_str(line);
                    body.push('\n');
                }
            }
        }
    }

    match state {
        State::Preamble => Err(parse_error("no front matter block".into())),
        State::Header => Err(parse_error("unterminated front matter".into())),
        State::Body => {
            blocks.push((header, body));
            Ok(blocks)
        }
    }
}

/// Render a Markdown body to HTML.
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(body, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    const BOTH: &[Lang] = &[Lang::En, Lang::De];

    fn parse_str(source: &str) -> Result<LocalizedContent, ContentError> {
        parse(source, Path::new("test.md"), BOTH)
    }

    #[test]
    fn parses_one_record_per_language() {
        let content = parse_str(&bilingual("FAQ", "Häufige Fragen")).unwrap();

        assert_eq!(content.records.len(), 2);
        assert_eq!(content.record(Lang::En).unwrap().title, "FAQ");
        assert_eq!(content.record(Lang::De).unwrap().title, "Häufige Fragen");
    }

    #[test]
    fn bodies_are_rendered_to_html() {
        let source = "+++\nlang = \"en\"\ntitle = \"A\"\n+++\nSome *emphasis*.\n\n\
                      +++\nlang = \"de\"\ntitle = \"B\"\n+++\n| a |\n|---|\n| b |\n";
        let content = parse_str(source).unwrap();

        assert_eq!(
            content.record(Lang::En).unwrap().rendered_body,
            "<p>Some <em>emphasis</em>.</p>"
        );
        assert!(content.record(Lang::De).unwrap().rendered_body.contains("<table>"));
    }

    #[test]
    fn body_does_not_leak_into_next_block() {
        let content = parse_str(&bilingual("One", "Eins")).unwrap();
        let en = &content.record(Lang::En).unwrap().rendered_body;

        assert!(en.contains("One body"));
        assert!(!en.contains("Eins"));
    }

    #[test]
    fn missing_language_is_error() {
        let source = "+++\nlang = \"en\"\ntitle = \"Only English\"\n+++\nBody\n";
        let result = parse_str(source);

        assert!(matches!(
            result,
            Err(ContentError::MissingLanguage { lang: Lang::De, .. })
        ));
    }

    #[test]
    fn missing_language_ignored_when_not_required() {
        let source = "+++\nlang = \"en\"\ntitle = \"Only English\"\n+++\nBody\n";
        let content = parse(source, Path::new("test.md"), &[Lang::En]).unwrap();

        assert!(matches!(
            content.record(Lang::De),
            Err(ContentError::MissingLanguage { lang: Lang::De, .. })
        ));
    }

    #[test]
    fn unknown_language_is_parse_error() {
        let source = "+++\nlang = \"fr\"\ntitle = \"Bonjour\"\n+++\nBody\n";
        assert!(matches!(parse_str(source), Err(ContentError::Parse { .. })));
    }

    #[test]
    fn missing_title_is_parse_error() {
        let source = "+++\nlang = \"en\"\n+++\nBody\n";
        assert!(matches!(parse_str(source), Err(ContentError::Parse { .. })));
    }

    #[test]
    fn duplicate_language_is_parse_error() {
        let source = "+++\nlang = \"en\"\ntitle = \"A\"\n+++\nA\n\
                      +++\nlang = \"en\"\ntitle = \"B\"\n+++\nB\n";
        let err = parse_str(source).unwrap_err();

        assert!(err.to_string().contains("duplicate 'en' block"));
    }

    #[test]
    fn text_before_front_matter_is_parse_error() {
        let source = format!("stray text\n{}", bilingual("A", "B"));
        let err = parse_str(&source).unwrap_err();

        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn leading_blank_lines_are_allowed() {
        let source = format!("\n\n{}", bilingual("A", "B"));
        assert!(parse_str(&source).is_ok());
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let source = format!("\u{feff}{}", bilingual("A", "B"));
        let content = parse_str(&source).unwrap();

        assert_eq!(content.record(Lang::En).unwrap().title, "A");
        assert_eq!(content.record(Lang::De).unwrap().title, "B");
    }

    #[test]
    fn unterminated_front_matter_is_parse_error() {
        let source = "+++\nlang = \"en\"\ntitle = \"A\"\n";
        let err = parse_str(source).unwrap_err();

        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn empty_file_is_parse_error() {
        assert!(matches!(parse_str(""), Err(ContentError::Parse { .. })));
    }

    #[test]
    fn crlf_line_endings_accepted() {
        let source = bilingual("A", "B").replace('\n', "\r\n");
        let content = parse_str(&source).unwrap();

        assert_eq!(content.record(Lang::En).unwrap().title, "A");
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = load(&tmp.path().join("nope.md"), BOTH);

        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[test]
    fn load_reads_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.md");
        write_content(&path, "FAQ", "Häufige Fragen");

        let content = load(&path, BOTH).unwrap();

        assert_eq!(content.source, path);
        assert_eq!(content.record(Lang::De).unwrap().title, "Häufige Fragen");
    }
}
