//! Source path → output path and URL mapping.
//!
//! Every document lives in the site root and is rendered next to itself:
//!
//! ```text
//! site/                      URL           output file
//! ├── index.md           →   ""            site/index.html
//! ├── about.md           →   "about.html"  site/about.html
//! └── posts/
//!     ├── index.md       →   "posts/"      site/posts/index.html
//!     └── hello.md       →   "posts/hello.html"
//! ```
//!
//! ## Index pages
//!
//! A file named `index.<ext>` stands for its directory, so its URL drops the
//! trailing `index.html`. Only a final path component that is exactly
//! `index.html` is stripped: `reindex.md` keeps its full URL and an `index`
//! directory in the middle of a path is left alone. The file on disk is still
//! written as `index.html`.
//!
//! URLs always use `/` separators regardless of platform.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const OUTPUT_EXTENSION: &str = "html";
const INDEX_PAGE: &str = "index.html";

#[derive(Error, Debug)]
#[error("{path} is not inside the site root {root}")]
pub struct PathError {
    pub path: PathBuf,
    pub root: PathBuf,
}

/// Site-relative location of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedPath {
    /// Path relative to the site root, with the source extension.
    pub relative: PathBuf,
    /// Canonical site-relative URL.
    pub url: String,
}

/// Derive the site-relative path and URL of a source file.
pub fn map_path(path: &Path, site_root: &Path) -> Result<MappedPath, PathError> {
    let relative = path
        .strip_prefix(site_root)
        .map_err(|_| PathError {
            path: path.to_path_buf(),
            root: site_root.to_path_buf(),
        })?
        .to_path_buf();

    let url = url_for(&relative);
    Ok(MappedPath { relative, url })
}

/// The file a source document renders to: same directory, `.html` extension.
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

fn url_for(relative: &Path) -> String {
    let with_ext = relative.with_extension(OUTPUT_EXTENSION);
    let segments: Vec<String> = with_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let url = segments.join("/");
    match segments.last() {
        Some(last) if last == INDEX_PAGE => url[..url.len() - INDEX_PAGE.len()].to_string(),
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(rel: &str) -> String {
        map_path(&Path::new("/site").join(rel), Path::new("/site"))
            .unwrap()
            .url
    }

    #[test]
    fn plain_page() {
        assert_eq!(url("about.md"), "about.html");
    }

    #[test]
    fn nested_page() {
        assert_eq!(url("posts/2024/hello.md"), "posts/2024/hello.html");
    }

    #[test]
    fn root_index_maps_to_empty_url() {
        assert_eq!(url("index.md"), "");
    }

    #[test]
    fn nested_index_maps_to_directory() {
        assert_eq!(url("posts/index.md"), "posts/");
    }

    #[test]
    fn index_suffix_inside_a_name_is_kept() {
        assert_eq!(url("reindex.md"), "reindex.html");
    }

    #[test]
    fn index_directory_mid_path_is_kept() {
        assert_eq!(url("index/page.md"), "index/page.html");
    }

    #[test]
    fn file_without_extension_gets_html() {
        assert_eq!(url("notes/README"), "notes/README.html");
    }

    #[test]
    fn relative_path_keeps_source_extension() {
        let mapped = map_path(Path::new("/site/a/b.md"), Path::new("/site")).unwrap();
        assert_eq!(mapped.relative, PathBuf::from("a/b.md"));
    }

    #[test]
    fn path_outside_root_is_an_error() {
        let err = map_path(Path::new("/elsewhere/a.md"), Path::new("/site")).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/elsewhere/a.md"));
        assert!(err.to_string().contains("/site"));
    }

    #[test]
    fn output_path_keeps_index_name() {
        assert_eq!(
            output_path(Path::new("/site/posts/index.md")),
            PathBuf::from("/site/posts/index.html")
        );
    }

    #[test]
    fn output_path_is_sibling_of_source() {
        assert_eq!(
            output_path(Path::new("/site/a.md")),
            PathBuf::from("/site/a.html")
        );
    }
}
