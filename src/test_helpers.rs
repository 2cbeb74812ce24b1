//! Shared test utilities: throwaway sites on disk.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = site_with(&[
//!     ("index.md", "---\ntitle: Home\n---\nWelcome"),
//!     ("posts/hello.md", "Hello"),
//! ]);
//! generate(site.path(), &BuildConfig::default()).unwrap();
//! assert!(read_output(&site, "index.html").contains("Welcome"));
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a temp directory holding the given `(relative path, contents)` files.
pub fn site_with(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        write_file(tmp.path(), rel, contents);
    }
    tmp
}

/// Write a file below `root`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
}

/// Read a generated file. Panics with the file list if it is missing.
pub fn read_output(site: &TempDir, rel: &str) -> String {
    let path = site.path().join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| {
        let present: Vec<String> = walkdir::WalkDir::new(site.path())
            .into_iter()
            .filter_map(Result::ok)
            .map(|entry| entry.path().display().to_string())
            .collect();
        panic!("cannot read {}: {e}. Present: {present:?}", path.display())
    })
}
