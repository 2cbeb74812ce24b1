//! # marc
//!
//! A minimal static site generator. Point it at a directory of markdown
//! files and every `foo.md` gets a rendered `foo.html` next to it.
//!
//! # Pipeline
//!
//! ```text
//! site/*.md ─► metadata::extract ─► scan (sorted registry)
//!                                      │
//!                      for each page:  ▼
//!              markdown::convert ─► layout (page, pages) ─► site/*.html
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Splits `---` fenced `key: value` front matter from the body |
//! | [`naming`] | Source path → site-relative URL and output path |
//! | [`scan`] | Discovers documents and orders them newest first |
//! | [`markdown`] | Markdown body → HTML fragment |
//! | [`functions`] | `dateformat` and the closed set of date formats |
//! | [`layout`] | Loads `base.tmpl` or falls back to the built-in layout |
//! | [`generate`] | Runs the whole pipeline for one site root |
//! | [`config`] | Build settings and optional TOML overrides |
//! | [`output`] | CLI output formatting |
//! | [`types`] | The `Document` model exposed to templates |
//!
//! # Design Decisions
//!
//! ## One Layout, Whole-Site Context
//!
//! Each page is rendered with the full document list alongside it, so a
//! single layout can draw navigation, archives and "latest posts" without a
//! separate index step. The list is sorted once by the `date` front matter
//! field and never changes during a run, which keeps every page's listing
//! identical.
//!
//! ## String Dates
//!
//! Dates are compared as strings. Use ISO 8601 (`2024-05-01`) in front matter
//! and the order is chronological; mix formats and it is not.
//!
//! ## Fail Fast
//!
//! The first unreadable file, markdown that is not UTF-8, template error or
//! failed write stops the build. Pages already written stay on disk.
//! The one deliberate exception is a site layout that does not compile: it is
//! reported as a warning and the built-in layout is used instead.

pub mod config;
pub mod functions;
pub mod generate;
pub mod layout;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
