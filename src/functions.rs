//! Functions and filters available to layout templates.
//!
//! Only date handling lives here. Layouts store dates in front matter as
//! plain strings and reformat them at render time:
//!
//! ```text
//! {{ dateformat(src="yyyy-mm-dd", dst="shortdate", input=page.meta.date) }}
//! {{ page.meta.date | dateformat(src="yyyy-mm-dd", dst="rfc822") }}
//! ```
//!
//! ## Formats
//!
//! The set of format names is closed:
//!
//! | name         | example                 |
//! |--------------|-------------------------|
//! | `rfc822`     | `02 Jan 06 15:04 UTC`   |
//! | `yyyy-mm-dd` | `2006-01-02`            |
//! | `shortdate`  | `02 Jan 2006`           |
//!
//! Times are zone-naive. `rfc822` accepts any zone abbreviation on input but
//! ignores it, and always prints `UTC`: `02 Jan 06 15:04 MST` comes out as
//! `02 Jan 06 15:04 UTC` with the clock time unchanged.
//!
//! An unknown name in either position is a template error. An input that does
//! not match the source format is *not* an error: it is logged and rendered
//! as the zero time (`0001-01-01 00:00 UTC`), so one badly dated post does not
//! take the whole site down.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;
use tera::{Tera, Value};
use thiserror::Error;
use tracing::warn;

const DATE_FORMATS: &[(&str, &str)] = &[
    ("rfc822", "%d %b %y %H:%M %Z"),
    ("yyyy-mm-dd", "%Y-%m-%d"),
    ("shortdate", "%d %b %Y"),
];

#[derive(Error, Debug, PartialEq)]
pub enum FormatError {
    #[error("unknown date format: {0}")]
    UnknownFormat(String),
}

/// Look up the strftime pattern behind a format name.
pub fn date_pattern(name: &str) -> Result<&'static str, FormatError> {
    DATE_FORMATS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, pattern)| *pattern)
        .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))
}

/// Names of all supported date formats.
pub fn date_format_names() -> impl Iterator<Item = &'static str> {
    DATE_FORMATS.iter().map(|(name, _)| *name)
}

/// Reparse `input` from format `src` and print it in format `dst`.
pub fn dateformat(src: &str, dst: &str, input: &str) -> Result<String, FormatError> {
    let src_pattern = date_pattern(src)?;
    let dst_pattern = date_pattern(dst)?;

    let when = parse_date(input, src_pattern).unwrap_or_else(|| {
        warn!(input, format = src, "date does not match format, using zero time");
        zero_time()
    });

    Ok(Utc
        .from_utc_datetime(&when)
        .format(dst_pattern)
        .to_string())
}

fn parse_date(input: &str, pattern: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, input, StrftimeItems::new(pattern)).ok()?;
    let date = parsed.to_naive_date().ok()?;
    let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

fn zero_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// The set of callables bound into every layout.
///
/// Passed explicitly to [`crate::layout::resolve`] rather than living in a
/// global, so a renderer can be built with or without it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFunctions;

impl TemplateFunctions {
    /// Register `dateformat` as both a function and a filter.
    pub fn register(&self, tera: &mut Tera) {
        tera.register_function("dateformat", dateformat_function);
        tera.register_filter("dateformat", dateformat_filter);
    }
}

fn dateformat_function(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let src = string_arg(args, "src")?;
    let dst = string_arg(args, "dst")?;
    let input = string_arg(args, "input")?;
    convert_value(src, dst, input)
}

fn dateformat_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let input = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("dateformat filter requires a string value"))?;
    let src = string_arg(args, "src")?;
    let dst = string_arg(args, "dst")?;
    convert_value(src, dst, input)
}

fn convert_value(src: &str, dst: &str, input: &str) -> tera::Result<Value> {
    dateformat(src, dst, input)
        .map(Value::String)
        .map_err(|e| tera::Error::msg(e.to_string()))
}

fn string_arg<'a>(args: &'a HashMap<String, Value>, name: &str) -> tera::Result<&'a str> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(tera::Error::msg(format!(
            "dateformat: `{name}` must be a string, got {other}"
        ))),
        None => Err(tera::Error::msg(format!(
            "dateformat: missing argument `{name}`"
        ))),
    }
}
