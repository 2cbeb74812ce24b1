//! Build settings.
//!
//! The defaults describe the classic layout of a site and need no file at
//! all:
//!
//! ```toml
//! source_extension = "md"      # Files that become pages
//! layout_file = "base.tmpl"    # Optional layout, looked up in the site root
//! date_key = "date"            # Front matter field pages are sorted by
//! output_mode = 0o600          # Permissions of written .html files (Unix)
//! ```
//!
//! A config file is only read when passed explicitly with `--config`. It is
//! sparse: keys it leaves out keep their stock value. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Extension (without the dot) of files that are rendered.
    pub source_extension: String,
    /// File name of the user layout, relative to the site root.
    pub layout_file: String,
    /// Front matter key used to order documents, newest first.
    pub date_key: String,
    /// Permission bits for newly created output files.
    pub output_mode: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_extension: "md".to_string(),
            layout_file: "base.tmpl".to_string(),
            date_key: "date".to_string(),
            output_mode: 0o600,
        }
    }
}

impl BuildConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_extension.is_empty() || self.source_extension.contains('.') {
            return Err(ConfigError::Validation(format!(
                "source_extension must be a bare extension like \"md\", got {:?}",
                self.source_extension
            )));
        }
        if self.layout_file.is_empty() || self.layout_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "layout_file must be a file name in the site root, got {:?}",
                self.layout_file
            )));
        }
        if self.date_key.is_empty() {
            return Err(ConfigError::Validation("date_key must not be empty".into()));
        }
        if self.output_mode > 0o777 {
            return Err(ConfigError::Validation(format!(
                "output_mode must be within 0o777, got {:#o}",
                self.output_mode
            )));
        }
        Ok(())
    }
}

/// Load a config file, layering it over the stock defaults.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate TOML config text.
pub fn parse_config(content: &str) -> Result<BuildConfig, ConfigError> {
    let config: BuildConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
