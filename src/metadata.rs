//! Front matter extraction.
//!
//! A document may open with a preamble of `key: value` lines fenced by `---`:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-05-01
//! ---
//! # Body starts here
//! ```
//!
//! ## Parsing rules
//!
//! - No leading `---` means no preamble: the whole input is the body.
//! - An opening `---` without a closing one also means no preamble. Broken
//!   front matter degrades to "no metadata", it never fails the build.
//! - Each line between the fences is split on its first `:`, both halves are
//!   trimmed, and lines without a `:` are skipped. Later keys win.
//! - Values are single-line. There is no quoting, escaping or nesting.
//!
//! The closing fence is located by plain substring search, so it does not need
//! to sit on its own line.

use std::collections::BTreeMap;

/// Metadata parsed from a document preamble.
pub type Metadata = BTreeMap<String, String>;

const DELIMITER: &[u8] = b"---";

/// Split raw document bytes into its metadata and the remaining body.
///
/// The body starts after the closing delimiter and the line ending that
/// follows it, if any.
pub fn extract(raw: &[u8]) -> (Metadata, &[u8]) {
    if !raw.starts_with(DELIMITER) {
        return (Metadata::new(), raw);
    }

    let rest = &raw[DELIMITER.len()..];
    let Some(end) = find(rest, DELIMITER) else {
        return (Metadata::new(), raw);
    };

    let preamble = String::from_utf8_lossy(&rest[..end]);
    let meta = parse_preamble(&preamble);
    let body = strip_line_ending(&rest[end + DELIMITER.len()..]);
    (meta, body)
}

fn parse_preamble(text: &str) -> Metadata {
    let mut meta = Metadata::new();
    for line in text.split('\n') {
        if let Some((key, value)) = line.split_once(':') {
            meta.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    meta
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn strip_line_ending(body: &[u8]) -> &[u8] {
    body.strip_prefix(b"\r\n")
        .or_else(|| body.strip_prefix(b"\n"))
        .unwrap_or(body)
}
