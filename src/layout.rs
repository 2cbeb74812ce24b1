//! Layout template resolution.
//!
//! Every page of a site is rendered through one layout. The site may provide
//! its own (`base.tmpl` in the site root by default); otherwise the built-in
//! layout is used with the built-in stylesheet inlined in place of its
//! `STYLE_PLACEHOLDER` token.
//!
//! A user layout that exists but fails to compile also falls back to the
//! built-in one. The build keeps going and a warning with the template error
//! is logged.
//!
//! ## Template context
//!
//! ```text
//! page        the document being rendered
//!   .meta       front matter map (page.meta.title, page.meta.date, ...)
//!   .url        site-relative URL
//!   .html       converted body, emit with `| safe`
//!   .abs_path   source file path
//!   .rel_path   source path relative to the site root
//! pages       every document, newest first (same fields, without html)
//! dateformat  see [`crate::functions`]
//! ```
//!
//! The layout is registered as `layout.html`, so tera autoescapes every
//! interpolated value unless it is marked `safe`.
//!
//! Printing a front matter key the page does not have is a render error and
//! stops the build. Optional keys need a default or a guard:
//!
//! ```text
//! {{ page.meta.author | default(value="") }}
//! {% if page.meta.date %}<time>{{ page.meta.date }}</time>{% endif %}
//! ```
//!
//! A layout path that exists but cannot be read as a file (a directory, bad
//! permissions, invalid UTF-8) falls back like a broken one.

use crate::config::BuildConfig;
use crate::functions::TemplateFunctions;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, warn};

/// Name the compiled layout is registered under.
pub const TEMPLATE_NAME: &str = "layout.html";
/// Token in the built-in layout replaced by the built-in stylesheet.
pub const STYLE_PLACEHOLDER: &str = "STYLE_PLACEHOLDER";

pub const DEFAULT_LAYOUT: &str = include_str!("../static/layout.html");
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/style.css");

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("built-in layout failed to compile")]
    Builtin(#[source] tera::Error),
}

/// Where the active layout came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutSource {
    User(PathBuf),
    Builtin,
}

/// A compiled layout with the template functions bound.
#[derive(Debug)]
pub struct Layout {
    tera: Tera,
    source: LayoutSource,
}

impl Layout {
    pub fn source(&self) -> &LayoutSource {
        &self.source
    }

    /// Render into `out`, appending to whatever it already holds.
    pub fn render_to(&self, context: &Context, out: &mut Vec<u8>) -> tera::Result<()> {
        self.tera.render_to(TEMPLATE_NAME, context, out)
    }
}

/// Compile the site's layout, falling back to the built-in one.
pub fn resolve(
    site_root: &Path,
    config: &BuildConfig,
    functions: &TemplateFunctions,
) -> Result<Layout, LayoutError> {
    let path = site_root.join(&config.layout_file);

    match fs::read_to_string(&path) {
        Ok(text) => match compile(&text, functions) {
            Ok(tera) => {
                debug!(path = %path.display(), "using site layout");
                return Ok(Layout {
                    tera,
                    source: LayoutSource::User(path),
                });
            }
            Err(e) => warn!(
                path = %path.display(),
                error = %describe(&e),
                "site layout failed to compile, using built-in layout"
            ),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no site layout, using built-in layout");
        }
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "site layout is unreadable, using built-in layout"
        ),
    }

    builtin(functions)
}

/// The built-in layout with the built-in stylesheet inlined.
pub fn builtin(functions: &TemplateFunctions) -> Result<Layout, LayoutError> {
    let text = DEFAULT_LAYOUT.replacen(STYLE_PLACEHOLDER, DEFAULT_STYLESHEET, 1);
    let tera = compile(&text, functions).map_err(LayoutError::Builtin)?;
    Ok(Layout {
        tera,
        source: LayoutSource::Builtin,
    })
}

fn compile(text: &str, functions: &TemplateFunctions) -> tera::Result<Tera> {
    let mut tera = Tera::default();
    functions.register(&mut tera);
    tera.add_raw_template(TEMPLATE_NAME, text)?;
    Ok(tera)
}

/// Flatten a tera error and its causes into one line.
pub fn describe(error: &tera::Error) -> String {
    use std::error::Error;

    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::site_with;

    fn render(layout: &Layout, context: &Context) -> String {
        let mut out = Vec::new();
        layout.render_to(context, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn page_context(title: &str, html: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("page", &page_value(title, html));
        ctx.insert("pages", &Vec::<tera::Value>::new());
        ctx
    }

    fn page_value(title: &str, html: &str) -> tera::Value {
        let mut meta = tera::Map::new();
        meta.insert("title".into(), tera::Value::String(title.into()));
        let mut page = tera::Map::new();
        page.insert("meta".into(), tera::Value::Object(meta));
        page.insert("html".into(), tera::Value::String(html.into()));
        page.insert("url".into(), tera::Value::String("x.html".into()));
        page.insert("rel_path".into(), tera::Value::String("x.md".into()));
        tera::Value::Object(page)
    }

    #[test]
    fn missing_layout_uses_builtin() {
        let site = site_with(&[]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        assert_eq!(layout.source(), &LayoutSource::Builtin);
    }

    #[test]
    fn builtin_inlines_stylesheet() {
        let layout = builtin(&TemplateFunctions).unwrap();
        let out = render(&layout, &page_context("Hi", "<p>body</p>"));
        assert!(out.contains(DEFAULT_STYLESHEET.trim()));
        assert!(!out.contains(STYLE_PLACEHOLDER));
        assert!(out.contains("<p>body</p>"));
        assert!(out.contains("<title>Hi</title>"));
    }

    #[test]
    fn user_layout_is_used() {
        let site = site_with(&[("base.tmpl", "<main>{{ page.html | safe }}</main>")]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        assert_eq!(
            layout.source(),
            &LayoutSource::User(site.path().join("base.tmpl"))
        );
        let out = render(&layout, &page_context("Hi", "<p>x</p>"));
        assert_eq!(out, "<main><p>x</p></main>");
    }

    #[test]
    fn broken_user_layout_falls_back() {
        let site = site_with(&[("base.tmpl", "{% if page.html %}unterminated")]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        assert_eq!(layout.source(), &LayoutSource::Builtin);
    }

    #[test]
    fn unreadable_layout_falls_back() {
        // A directory at the layout path exists but cannot be read.
        let site = site_with(&[("base.tmpl/keep.txt", "")]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        assert_eq!(layout.source(), &LayoutSource::Builtin);
    }

    #[test]
    fn non_utf8_layout_falls_back() {
        let site = site_with(&[]);
        std::fs::write(site.path().join("base.tmpl"), [0xff, 0xfe]).unwrap();
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        assert_eq!(layout.source(), &LayoutSource::Builtin);
    }

    #[test]
    fn missing_meta_key_is_a_render_error() {
        let site = site_with(&[("base.tmpl", "{{ page.meta.author }}")]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        let mut out = Vec::new();
        assert!(layout.render_to(&page_context("Hi", ""), &mut out).is_err());
    }

    #[test]
    fn guarded_meta_keys_render_empty() {
        let site = site_with(&[(
            "base.tmpl",
            "[{{ page.meta.author | default(value=\"\") }}]{% if page.meta.date %}x{% endif %}",
        )]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        let out = render(&layout, &page_context("Hi", ""));
        assert_eq!(out, "[]");
    }

    #[test]
    fn configured_layout_name_is_honoured() {
        let site = site_with(&[("site.html", "custom")]);
        let config = BuildConfig {
            layout_file: "site.html".into(),
            ..BuildConfig::default()
        };
        let layout = resolve(site.path(), &config, &TemplateFunctions).unwrap();
        assert!(matches!(layout.source(), LayoutSource::User(_)));
    }

    #[test]
    fn user_layout_can_call_dateformat() {
        let site = site_with(&[(
            "base.tmpl",
            r#"{{ dateformat(src="yyyy-mm-dd", dst="shortdate", input=page.meta.title) }}"#,
        )]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        let out = render(&layout, &page_context("2024-05-01", ""));
        assert_eq!(out, "01 May 2024");
    }

    #[test]
    fn metadata_is_escaped() {
        let site = site_with(&[("base.tmpl", "{{ page.meta.title }}")]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        let out = render(&layout, &page_context("Tom & Jerry", ""));
        assert_eq!(out, "Tom &amp; Jerry");
    }

    #[test]
    fn render_appends_to_buffer() {
        let site = site_with(&[("base.tmpl", "b")]);
        let layout = resolve(site.path(), &BuildConfig::default(), &TemplateFunctions).unwrap();
        let mut out = b"a".to_vec();
        layout.render_to(&page_context("", ""), &mut out).unwrap();
        assert_eq!(out, b"ab");
    }
}
