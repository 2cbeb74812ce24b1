//! The document model shared by scanning and generation.
//!
//! Documents are serialized straight into the template context, so the field
//! names below are the names layouts use (`page.meta.title`, `page.url`, ...).

use crate::metadata::Metadata;
use serde::Serialize;
use std::path::PathBuf;

/// One source file discovered under the site root.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Front matter key/value pairs. Keys without a value are simply absent.
    pub meta: Metadata,
    /// Site-relative URL (`posts/hello.html`, `posts/` for an index page).
    pub url: String,
    /// Absolute path of the source file.
    pub abs_path: PathBuf,
    /// Source path relative to the site root.
    pub rel_path: PathBuf,
    /// Raw body bytes after the front matter.
    #[serde(skip)]
    pub body: Vec<u8>,
    /// Converted HTML, filled in once during generation.
    #[serde(skip)]
    pub html: Option<String>,
}

impl Document {
    /// Value of the metadata field used for ordering; missing sorts as `""`.
    pub fn sort_key<'a>(&'a self, key: &str) -> &'a str {
        self.meta.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Template view of the document being rendered: the document plus its HTML.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    #[serde(flatten)]
    pub document: &'a Document,
    pub html: &'a str,
}
