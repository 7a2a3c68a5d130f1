//! Stylesheet bundling.
//!
//! The page ships with a single inline `<style>` block. Source stylesheets are
//! read in the configured order (later files win the cascade), minified and
//! concatenated.
//!
//! Minification is deliberately shallow: comments are removed, runs of
//! whitespace collapse to one space, and spaces next to `{`, `}`, `;` and `,`
//! are dropped. Spaces around `:` and combinators are kept since they can be
//! significant in selectors. Quoted strings pass through untouched.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Cannot read stylesheet {path}: {source}")]
pub struct StyleError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Read, minify and concatenate stylesheets in the given order.
pub fn bundle_styles<P: AsRef<Path>>(paths: &[P]) -> Result<String, StyleError> {
    let mut bundle = String::new();
    for path in paths {
        let path = path.as_ref();
        let css = fs::read_to_string(path).map_err(|source| StyleError {
            path: path.to_path_buf(),
            source,
        })?;
        bundle.push_str(&minify_css(&css));
    }
    Ok(bundle)
}

fn is_tight(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ',')
}

/// Minify a stylesheet.
pub fn minify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                pending_space = true;
            }
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
                let mut escaped = false;
                for s in chars.by_ref() {
                    out.push(s);
                    if escaped {
                        escaped = false;
                    } else if s == '\\' {
                        escaped = true;
                    } else if s == c {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => pending_space = true,
            c => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
            }
        }
    }
    out
}

/// Emit a collapsed space before `next` unless either side is tight.
fn flush_space(out: &mut String, pending: &mut bool, next: char) {
    if *pending && !out.is_empty() && !is_tight(next) && !out.ends_with(is_tight) {
        out.push(' ');
    }
    *pending = false;
}
