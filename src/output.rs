//! CLI output formatting.
//!
//! ```text
//! * /site/posts/hello.html
//! * /site/index.html
//! Layout: built-in
//! Generated 2 pages in /site
//! ```
//!
//! Page lines are printed as each page is written, so a failed run still
//! shows which files it left behind. The summary follows a successful run.
//!
//! `format_*` functions are pure and return lines for testability; `print_*`
//! wrappers write them to stdout. Diagnostics go through `tracing` to stderr,
//! never through here.

use crate::generate::{Report, WrittenPage};
use crate::layout::LayoutSource;
use std::error::Error;

fn layout_line(source: &LayoutSource) -> String {
    match source {
        LayoutSource::User(path) => format!("Layout: {}", path.display()),
        LayoutSource::Builtin => "Layout: built-in".to_string(),
    }
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn format_page_written(page: &WrittenPage) -> String {
    format!("* {}", page.output.display())
}

pub fn print_page_written(page: &WrittenPage) {
    println!("{}", format_page_written(page));
}

pub fn format_generate_summary(report: &Report) -> Vec<String> {
    vec![
        layout_line(&report.layout),
        format!(
            "Generated {} in {}",
            pluralize(report.pages.len(), "page"),
            report.site_root.display()
        ),
    ]
}

pub fn print_generate_summary(report: &Report) {
    for line in format_generate_summary(report) {
        println!("{line}");
    }
}

/// An error and its causes, one per line.
pub fn format_error(error: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("error: {error}")];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("  caused by: {cause}"));
        source = cause.source();
    }
    lines
}

pub fn print_error(error: &dyn Error) {
    for line in format_error(error) {
        eprintln!("{line}");
    }
}
