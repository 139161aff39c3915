// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tracing::{debug, warn};

use crate::ast::{Document, Value};
use crate::parser::{ParseOptions, Parser, STRING_SOURCE};
use crate::EnvError;

mod access;
mod validation;
mod conversion;
mod helpers;

/// A parsed `.env` document plus what is needed to report on it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    contents: Document,
    source: String,
    raw_content: String, // Store for error reporting
}

impl EnvConfig {
    /// Load and parse a `.env` file with default options.
    ///
    /// # Example
    /// ```no_run
    /// # use env_cfg::EnvConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = EnvConfig::from_file(".env")?;
    /// let port: u16 = config.get("PORT")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EnvError> {
        Self::from_file_with_options(path, ParseOptions::default())
    }

    /// Load and parse a `.env` file.
    ///
    /// A leading `~/` is expanded to the home directory. The path must be a
    /// readable regular file containing UTF-8 text.
    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self, EnvError> {
        let path = helpers::resolve_path(path.as_ref())?;
        let source = path.to_string_lossy().to_string();

        debug!(path = %source, "loading env file");
        let content = helpers::read_env_file(&path)?;

        let contents = Parser::new(&options).with_file(&source).parse(&content)?;

        Ok(Self {
            contents,
            source,
            raw_content: content,
        })
    }

    /// Load from the primary path; if it does not exist, load the fallback.
    ///
    /// Only a missing primary file triggers the fallback. Parse errors in
    /// the primary file are returned as is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, EnvError> {
        Self::from_file_with_fallback_and_options(primary, fallback, ParseOptions::default())
    }

    pub fn from_file_with_fallback_and_options<P: AsRef<Path>>(
        primary: P,
        fallback: P,
        options: ParseOptions,
    ) -> Result<Self, EnvError> {
        match Self::from_file_with_options(&primary, options.clone()) {
            Ok(config) => Ok(config),
            Err(EnvError::FileNotFound { .. }) => {
                warn!(
                    primary = %primary.as_ref().display(),
                    fallback = %fallback.as_ref().display(),
                    "primary env file not found, using fallback"
                );
                Self::from_file_with_options(&fallback, options).map_err(|e| match e {
                    EnvError::FileNotFound { code, .. } => EnvError::FileNotFound {
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the env files exists".into()),
                        code,
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Parse `.env` content from a string with default options.
    pub fn from_str(content: &str) -> Result<Self, EnvError> {
        Self::from_str_with_options(content, ParseOptions::default())
    }

    pub fn from_str_with_options(content: &str, options: ParseOptions) -> Result<Self, EnvError> {
        let contents = Parser::new(&options).parse(content)?;

        Ok(Self {
            contents,
            source: STRING_SOURCE.to_string(),
            raw_content: content.to_string(),
        })
    }

    pub fn contents(&self) -> &Document {
        &self.contents
    }

    pub fn into_contents(self) -> Document {
        self.contents
    }

    /// The file path, or `<string>` for in-memory content.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.contents.iter()
    }
}
