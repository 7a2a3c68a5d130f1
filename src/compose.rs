//! Document and index composition.
//!
//! Turns a scanned [`ContentTree`] into the two HTML pieces of the page for
//! one language:
//!
//! - **Content**: every section as `<section id="{name}">` holding its title,
//!   its body and its topics, in tree order.
//! - **Index**: jump links to every section that owns a topic directory
//!   (except the landing section) and to each of its topics.
//!
//! Both read the same tree, so index anchors always point at ids the content
//! emits. Composition is pure: identical trees give byte-identical output.

use crate::markdown::ContentError;
use crate::naming;
use crate::templates;
use crate::types::{ContentTree, Lang, Section, Topic};
use maud::{Markup, PreEscaped, html};

/// Inputs of the topic fragment that don't come from the topic itself.
#[derive(Debug, Clone, Copy)]
pub struct TopicContext<'a> {
    /// Edit link prefix; `None` renders topics without an edit button.
    pub edit_root: Option<&'a str>,
    pub edit_button_text: &'a str,
}

/// Compose the page content for `lang`.
pub fn compose_content(
    tree: &ContentTree,
    lang: Lang,
    ctx: TopicContext,
) -> Result<Markup, ContentError> {
    let sections = tree
        .sections
        .iter()
        .map(|section| compose_section(section, lang, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        @for section in &sections {
            (section)
        }
    })
}

fn compose_section(section: &Section, lang: Lang, ctx: TopicContext) -> Result<Markup, ContentError> {
    let record = section.content.record(lang)?;
    let topics = section
        .topics
        .iter()
        .map(|topic| render_topic(topic, &section.name, lang, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        section id=(section.name) {
            h1 { (record.title) }
            div { (PreEscaped(&record.rendered_body)) }
            @for topic in &topics {
                (topic)
            }
        }
    })
}

fn render_topic(
    topic: &Topic,
    section_name: &str,
    lang: Lang,
    ctx: TopicContext,
) -> Result<Markup, ContentError> {
    let record = topic.content.record(lang)?;
    let edit_link = ctx
        .edit_root
        .map(|root| naming::edit_link(root, section_name, &topic.file_name));

    Ok(templates::topic_fragment(
        &topic.id,
        &record.title,
        &record.rendered_body,
        edit_link.as_deref(),
        ctx.edit_button_text,
    ))
}

/// Compose the page index for `lang`.
///
/// Sections without a topic directory and the section named `landing_dir`
/// are left out.
pub fn compose_index(
    tree: &ContentTree,
    lang: Lang,
    landing_dir: &str,
) -> Result<Markup, ContentError> {
    let mut entries = Vec::new();

    for section in tree
        .sections
        .iter()
        .filter(|s| s.has_topic_dir && s.name != landing_dir)
    {
        let title = &section.content.record(lang)?.title;
        let topics = section
            .topics
            .iter()
            .map(|topic| {
                let record = topic.content.record(lang)?;
                Ok::<_, ContentError>((topic.id.as_str(), record.title.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        entries.push(html! {
            h1 { a href={ "#" (section.name) } class="index-entry" { (title) } }
            ul {
                @for (id, topic_title) in &topics {
                    li { a href={ "#" (id) } class="index-entry" { (topic_title) } }
                }
            }
        });
    }

    Ok(html! {
        @for entry in &entries {
            (entry)
        }
    })
}
