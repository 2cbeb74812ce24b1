//! Site generation.
//!
//! Ties the pipeline together for one site root:
//!
//! ```text
//! 1. Resolve the layout        base.tmpl or the built-in one
//! 2. Scan                      *.md → documents, newest first
//! 3. For each document, in order:
//!      convert body            markdown → HTML fragment
//!      render                  layout(page, pages) → bytes
//!      write                   foo.md → foo.html, next to the source
//! ```
//!
//! Documents are processed one at a time with a single reused output buffer.
//! The first failure stops the run: pages written before it stay on disk,
//! nothing after it is touched, and the error names the source file that
//! broke.

use crate::config::BuildConfig;
use crate::functions::TemplateFunctions;
use crate::layout::{self, Layout, LayoutError, LayoutSource};
use crate::markdown::{self, ConvertError};
use crate::naming;
use crate::scan::{self, ScanError};
use crate::types::{Document, PageView};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tera::Context;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("failed to convert {path}")]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },
    #[error("failed to render {path}")]
    Render {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One page written by a run.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub url: String,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Report {
    pub site_root: PathBuf,
    pub layout: LayoutSource,
    /// Pages in the order they were written (registry order).
    pub pages: Vec<WrittenPage>,
}

/// Build every document under `site_root`.
pub fn generate(site_root: &Path, config: &BuildConfig) -> Result<Report, GenerateError> {
    generate_with_progress(site_root, config, |_| {})
}

/// Like [`generate`], calling `on_page` right after each page is written.
///
/// Pages reported before a failure are exactly the ones left on disk.
pub fn generate_with_progress(
    site_root: &Path,
    config: &BuildConfig,
    mut on_page: impl FnMut(&WrittenPage),
) -> Result<Report, GenerateError> {
    let layout = layout::resolve(site_root, config, &TemplateFunctions)?;
    let mut documents = scan::scan(site_root, config)?;
    info!(count = documents.len(), root = %site_root.display(), "scanned site");

    let mut buf = Vec::new();
    let mut pages = Vec::with_capacity(documents.len());

    for index in 0..documents.len() {
        let html = markdown::convert(&documents[index].body).map_err(|source| {
            GenerateError::Conversion {
                path: documents[index].abs_path.clone(),
                source,
            }
        })?;
        documents[index].html = Some(html);

        let document = &documents[index];
        buf.clear();
        render_page(&layout, document, &documents, &mut buf).map_err(|source| {
            GenerateError::Render {
                path: document.abs_path.clone(),
                source,
            }
        })?;

        let output = naming::output_path(&document.abs_path);
        write_output(&output, &buf, config.output_mode).map_err(|source| {
            GenerateError::Write {
                path: output.clone(),
                source,
            }
        })?;
        debug!(output = %output.display(), bytes = buf.len(), "wrote page");

        let page = WrittenPage {
            source: document.abs_path.clone(),
            output,
            url: document.url.clone(),
        };
        on_page(&page);
        pages.push(page);
    }

    info!(count = pages.len(), "site generated");
    Ok(Report {
        site_root: site_root.to_path_buf(),
        layout: layout.source().clone(),
        pages,
    })
}

/// Render one document through the layout into `out`.
pub fn render_page(
    layout: &Layout,
    document: &Document,
    registry: &[Document],
    out: &mut Vec<u8>,
) -> tera::Result<()> {
    let page = PageView {
        document,
        html: document.html.as_deref().unwrap_or_default(),
    };
    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("pages", registry);
    layout.render_to(&context, out)
}

fn write_output(path: &Path, bytes: &[u8], mode: u32) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    file.write_all(bytes)
}
