//! Markdown body → HTML fragment.
//!
//! Thin wrapper around `pulldown-cmark` with the settings the layouts expect:
//! GFM tables, strikethrough, task lists and footnotes; raw HTML passed
//! through untouched; and an `id` on every heading so pages can link to
//! sections.
//!
//! Heading ids come from `{#explicit}` attributes when present, otherwise
//! from the heading text: ASCII letters and digits lowercased, `-` and `_`
//! kept, each whitespace character turned into `-`, everything else dropped.
//! Collisions within a document get `-1`, `-2`, ... appended.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("document body is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Convert a markdown body to an HTML fragment.
pub fn convert(body: &[u8]) -> Result<String, ConvertError> {
    let text = std::str::from_utf8(body)?;
    let mut events: Vec<Event> = Parser::new_ext(text, options()).collect();
    assign_heading_ids(&mut events);

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    Ok(out)
}

fn assign_heading_ids(events: &mut [Event]) {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|e| match e {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    for i in 0..events.len() {
        if let Event::Start(Tag::Heading { id: None, .. }) = &events[i] {
            let text = heading_text(&events[i + 1..]);
            let slug = unique(slugify(&text), &mut used);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(slug));
            }
        }
    }
}

fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Derive an anchor id from heading text.
pub fn slugify(text: &str) -> String {
    let slug: String = text
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            '-' | '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect();

    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug
    }
}

fn unique(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}
