// Author: Dustin Pilgrim
// License: MIT

use tracing::{debug, trace};

use crate::ast::{Document, Value};
use crate::error::{EnvError, Location};
use crate::lexer::{Lexer, Line, RawLine};
use crate::resolver::SubstitutionContext;

pub mod key;
pub mod value;

use key::Key;

/// File identifier used for content that did not come from a file.
pub const STRING_SOURCE: &str = "<string>";

/// Options shared by every parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOptions {
    /// Return structured errors carrying file, raw text and line number.
    /// When false, parse errors collapse into [`EnvError::ParseFailed`].
    pub origin_exception: bool,
    /// Predefined keys visible to `${NAME}` before the first line.
    /// They are not validated as keys and are not part of the result.
    pub context: Document,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin_exception(mut self, enabled: bool) -> Self {
        self.origin_exception = enabled;
        self
    }

    pub fn with_context<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_context_map<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (k, v) in entries {
            self.context.insert(k.into(), v.into());
        }
        self
    }
}

pub struct Parser<'a> {
    options: &'a ParseOptions,
    file: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            file: STRING_SOURCE,
        }
    }

    /// Name the source in error reports.
    pub fn with_file(mut self, file: &'a str) -> Self {
        self.file = file;
        self
    }

    pub fn file(&self) -> &str {
        self.file
    }

    /// Parse content, honouring [`ParseOptions::origin_exception`].
    pub fn parse(&self, content: &str) -> Result<Document, EnvError> {
        self.parse_content(content).map_err(|e| {
            if self.options.origin_exception {
                e
            } else {
                e.into_opaque()
            }
        })
    }

    /// Parse content, always returning structured errors.
    pub fn parse_content(&self, content: &str) -> Result<Document, EnvError> {
        let mut document = Document::new();

        for (line, kind) in Lexer::new(content) {
            let loc = Location::new(self.file, line);

            let raw = match kind {
                Line::Blank | Line::Comment => continue,
                Line::Malformed(text) => return Err(EnvError::malformed_line(loc, text)),
                Line::Entry(raw) => raw,
            };

            let Some((key, value)) = self.parse_entry(raw, &document, loc)? else {
                continue;
            };

            trace!(line, key, kind = value.type_name(), "resolved entry");
            if document.insert(key.to_string(), value).is_some() {
                debug!(line, key, "key redeclared, overwriting previous value");
            }
        }

        debug!(file = self.file, entries = document.len(), "parsed env content");
        Ok(document)
    }

    /// Validate the key and resolve the value of one line against the
    /// entries above it. `None` for comment keys.
    fn parse_entry<'r>(
        &self,
        raw: RawLine<'r>,
        document: &Document,
        loc: Location<'_>,
    ) -> Result<Option<(&'r str, Value)>, EnvError> {
        let key = match key::parse_key(raw.key, loc)? {
            Key::Valid(key) => key,
            Key::Comment => return Ok(None),
        };

        let ctx = SubstitutionContext::new(document, &self.options.context);
        let value = value::parse_value(raw.value, &ctx, loc)?;

        Ok(Some((key, value)))
    }
}

#[cfg(test)]
mod tests;
