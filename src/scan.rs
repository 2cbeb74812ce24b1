//! Document discovery and ordering.
//!
//! Walks the site root depth-first, visiting each directory's entries in
//! lexical order, and turns every regular file with the source extension into
//! a [`Document`]. Everything else (stylesheets, images, HTML from a previous
//! run) is ignored.
//!
//! A symlink counts when its target is a regular file; the target is read
//! through the link. Symlinked directories are not descended into.
//!
//! Extensions come from [`Path::extension`], so a file named just `.md` has
//! no extension and is not a document.
//!
//! ## Ordering
//!
//! The resulting registry is sorted once, newest first, by the `date` front
//! matter field:
//!
//! - Dates are compared as plain strings, not parsed. Ordering is only
//!   chronological if every document uses a lexically sortable format such as
//!   ISO 8601 (`2024-05-01`).
//! - Documents without a date compare as `""` and therefore come last.
//! - The sort is stable: equal dates keep discovery order.

use crate::config::BuildConfig;
use crate::metadata;
use crate::naming::{self, PathError};
use crate::types::Document;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to walk {root}")]
    Discovery {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Discover all documents under `root` and return them in registry order.
pub fn scan(root: &Path, config: &BuildConfig) -> Result<Vec<Document>, ScanError> {
    let mut documents = discover(root, &config.source_extension)?;
    sort_documents(&mut documents, &config.date_key);
    Ok(documents)
}

/// Collect documents in discovery order (depth-first, lexical per directory).
pub fn discover(root: &Path, extension: &str) -> Result<Vec<Document>, ScanError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Discovery {
            root: root.to_path_buf(),
            source,
        })?;
        if !has_extension(entry.path(), extension) || !entry.path().is_file() {
            continue;
        }
        debug!(path = %entry.path().display(), "discovered document");
        documents.push(read_document(entry.path(), root)?);
    }

    Ok(documents)
}

/// Stable sort, descending by the string value of `key`.
pub fn sort_documents(documents: &mut [Document], key: &str) {
    documents.sort_by(|a, b| b.sort_key(key).cmp(a.sort_key(key)));
}

/// Read a single source file and split it into metadata and body.
pub fn read_document(path: &Path, root: &Path) -> Result<Document, ScanError> {
    let raw = fs::read(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mapped = naming::map_path(path, root)?;
    let (meta, body) = metadata::extract(&raw);

    Ok(Document {
        meta,
        url: mapped.url,
        abs_path: path.to_path_buf(),
        rel_path: mapped.relative,
        body: body.to_vec(),
        html: None,
    })
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|e| e == extension)
}
