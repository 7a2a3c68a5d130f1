//! HTML fragments and the page template.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! every fragment is a function of typed inputs, interpolation is escaped,
//! and rendered Markdown bodies and the bundled CSS are the only values
//! inserted with [`PreEscaped`].

use crate::metadata::{LocalizedMeta, PageMeta, ToggleStrings};
use crate::types::Lang;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Everything the page template needs for one language.
pub struct PageData<'a> {
    pub lang: Lang,
    pub title: &'a str,
    pub meta_tags: Markup,
    pub internal_css: &'a str,
    pub lang_toggle: Markup,
    pub page_index: Markup,
    pub content: Markup,
    pub footer: Markup,
}

/// URL of a language's page, relative to the site root.
pub fn page_url(lang: Lang, page_name: &str) -> String {
    format!("/{}/{}.html", lang, page_name)
}

/// Renders the full page document.
pub fn page_document(data: &PageData) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(data.lang.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (data.title) }
                (data.meta_tags)
                style { (PreEscaped(data.internal_css)) }
            }
            body.info-page {
                header.page-header {
                    input.index-toggle type="checkbox" id="index-toggle";
                    label.index-hamburger for="index-toggle" {
                        span.hamburger-line {}
                        span.hamburger-line {}
                        span.hamburger-line {}
                    }
                    span.page-title { (data.title) }
                    (data.lang_toggle)
                    nav.page-index {
                        (data.page_index)
                    }
                }
                main.content {
                    (data.content)
                }
                (data.footer)
            }
        }
    }
}

/// Renders one topic of a section.
///
/// The edit button is only rendered when an edit link is available.
pub fn topic_fragment(
    id: &str,
    title: &str,
    body: &str,
    edit_link: Option<&str>,
    edit_button_text: &str,
) -> Markup {
    html! {
        article.topic id=(id) {
            h2.topic-title { (title) }
            div.topic-body { (PreEscaped(body)) }
            @if let Some(link) = edit_link {
                a.topic-edit href=(link) target="_blank" rel="noopener" { (edit_button_text) }
            }
        }
    }
}

/// Renders description, Open Graph tags and language alternates.
pub fn meta_tags(meta: &PageMeta, localized: &LocalizedMeta, lang: Lang, languages: &[Lang]) -> Markup {
    html! {
        @if let Some(description) = &localized.description {
            meta name="description" content=(description);
            meta property="og:description" content=(description);
        }
        meta property="og:title" content=(localized.title);
        meta property="og:type" content=(meta.open_graph_type);
        meta property="og:locale" content=(lang.code());
        @if let Some(image) = &meta.open_graph_image_link {
            meta property="og:image" content=(image);
        }
        @for other in languages {
            link rel="alternate" hreflang=(other.code()) href=(page_url(*other, &meta.page_name));
        }
    }
}

/// Renders the language toggle: the current language as plain text, every
/// other configured language as a link to its page.
pub fn lang_toggle(
    strings: &ToggleStrings,
    current: Lang,
    languages: &[Lang],
    page_name: &str,
) -> Markup {
    html! {
        nav.lang-toggle aria-label=(strings.label) {
            ul {
                @for lang in languages {
                    @let is_current = *lang == current;
                    li class=[is_current.then_some("current")] {
                        @if is_current {
                            span lang=(lang.code()) { (strings.name_of(*lang)) }
                        } @else {
                            a href=(page_url(*lang, page_name)) hreflang=(lang.code()) lang=(lang.code()) {
                                (strings.name_of(*lang))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the page footer.
pub fn footer(github_link: Option<&str>) -> Markup {
    html! {
        footer.site-footer {
            @if let Some(link) = github_link {
                a href=(link) target="_blank" rel="noopener" { "GitHub" }
            }
        }
    }
}
