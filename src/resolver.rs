// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ast::{Document, Value};
use crate::error::{EnvError, Location};

static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(.*?)\}").expect("variable pattern is a valid regex"));

/// Whether the text being interpolated came from a quoted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Quoted,
    Unquoted,
}

/// Read-only view of the keys a `${NAME}` may refer to: the entries parsed
/// above the current line, then the seed map.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionContext<'a> {
    document: &'a Document,
    seed: &'a Document,
}

impl<'a> SubstitutionContext<'a> {
    pub fn new(document: &'a Document, seed: &'a Document) -> Self {
        Self { document, seed }
    }

    /// Entries from the document shadow seeded ones.
    pub fn lookup(&self, name: &str) -> Option<&'a Value> {
        self.document.get(name).or_else(|| self.seed.get(name))
    }
}

/// Expand every `${NAME}` in `text`.
///
/// An unquoted value made of a single reference is a clone and keeps the
/// referenced value's type. Anything else is rendered to a string.
pub fn interpolate(
    text: &str,
    quoting: Quoting,
    ctx: &SubstitutionContext<'_>,
    loc: Location<'_>,
) -> Result<Value, EnvError> {
    // Fast path: no reference at all
    if !text.contains("${") {
        return Ok(Value::String(text.to_string()));
    }

    let matches: Vec<Captures> = VARIABLE.captures_iter(text).collect();
    if matches.is_empty() {
        return Ok(Value::String(text.to_string()));
    }

    let mut referenced = Vec::with_capacity(matches.len());
    for caps in &matches {
        let name = &caps[1];
        let value = ctx
            .lookup(name)
            .ok_or_else(|| EnvError::undefined_variable(loc, name, text))?;
        referenced.push(value);
    }

    if is_clone(text, &matches, quoting) {
        return Ok(referenced[0].clone());
    }

    Ok(Value::String(substitute(text, &matches, &referenced)))
}

/// Exactly one reference, spanning the whole text, outside quotes.
fn is_clone(text: &str, matches: &[Captures], quoting: Quoting) -> bool {
    quoting == Quoting::Unquoted && matches.len() == 1 && matches[0][0].len() == text.len()
}

/// Replace each match by its value in a single left-to-right pass.
fn substitute(text: &str, matches: &[Captures], values: &[&Value]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (caps, value) in matches.iter().zip(values) {
        if let Some(whole) = caps.get(0) {
            out.push_str(&text[last..whole.start()]);
            out.push_str(&value.to_string());
            last = whole.end();
        }
    }
    out.push_str(&text[last..]);

    out
}

// -- Tests --
