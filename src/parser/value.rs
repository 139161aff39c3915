use once_cell::sync::Lazy;
use regex::Regex;

use super::*;
use crate::resolver::{interpolate, Quoting, SubstitutionContext};

// A backslash escapes whatever follows it, so `\"` and `\'` never close.
static DOUBLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(?:[^"\\]|\\.)*""#).expect("double quote pattern is a valid regex"));
static SINGLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'(?:[^'\\]|\\.)*'").expect("single quote pattern is a valid regex"));
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("number pattern is a valid regex")
});

const TRUE_VARIANTS: [&str; 2] = ["true", "yes"];
const FALSE_VARIANTS: [&str; 2] = ["false", "no"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Quoted,
    Bool,
    Number,
    Null,
    Unquoted,
}

struct Rule {
    kind: ValueKind,
    strips_comments: bool,
    matches: fn(&str) -> bool,
}

/// Checked in order; anything left over is an unquoted string.
const RULES: [Rule; 4] = [
    Rule { kind: ValueKind::Quoted, strips_comments: false, matches: is_quoted },
    Rule { kind: ValueKind::Bool, strips_comments: true, matches: is_bool },
    Rule { kind: ValueKind::Number, strips_comments: true, matches: is_number },
    Rule { kind: ValueKind::Null, strips_comments: true, matches: is_null },
];

/// Resolve the raw text right of `=` into a typed value.
pub fn parse_value(raw: &str, ctx: &SubstitutionContext<'_>, loc: Location<'_>) -> Result<Value, EnvError> {
    let value = raw.trim();

    if value.starts_with('#') {
        return Ok(Value::Null);
    }

    let (kind, text) = classify(value);
    match kind {
        ValueKind::Quoted => parse_quoted(text, ctx, loc),
        ValueKind::Bool => Ok(parse_bool(text)),
        ValueKind::Number => Ok(parse_number(text)),
        ValueKind::Null => Ok(Value::Null),
        ValueKind::Unquoted => parse_unquoted(text, ctx, loc),
    }
}

/// Pick the kind of a trimmed value and the text its parser should see.
pub fn classify(value: &str) -> (ValueKind, &str) {
    let stripped = strip_comments(value);

    for rule in &RULES {
        let text = if rule.strips_comments { stripped } else { value };
        if (rule.matches)(text) {
            return (rule.kind, text);
        }
    }

    (ValueKind::Unquoted, stripped)
}

pub fn is_quoted(value: &str) -> bool {
    value.starts_with('"') || value.starts_with('\'')
}

pub fn is_bool(value: &str) -> bool {
    TRUE_VARIANTS
        .iter()
        .chain(FALSE_VARIANTS.iter())
        .any(|v| v.eq_ignore_ascii_case(value))
}

pub fn is_number(value: &str) -> bool {
    NUMBER.is_match(value)
}

pub fn is_null(value: &str) -> bool {
    value == "null"
}

/// Cut at the first `#` not preceded by a backslash and trim.
pub fn strip_comments(value: &str) -> &str {
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '#' if !escaped => return value[..i].trim(),
            _ => escaped = false,
        }
    }
    value.trim()
}

fn parse_quoted(value: &str, ctx: &SubstitutionContext<'_>, loc: Location<'_>) -> Result<Value, EnvError> {
    let (quote, pattern) = if value.starts_with('\'') {
        ('\'', &SINGLE_QUOTED)
    } else {
        ('"', &DOUBLE_QUOTED)
    };

    let found = pattern
        .find(value)
        .ok_or_else(|| EnvError::unterminated_string(loc, quote, value))?;

    let trailing = value[found.end()..].trim();
    if !trailing.is_empty() {
        tracing::trace!(line = loc.line, trailing, "ignoring text after closing quote");
    }

    // Both delimiters are single-byte ASCII
    let quoted = found.as_str();
    let content = unescape(&quoted[1..quoted.len() - 1]);

    interpolate(&content, Quoting::Quoted, ctx, loc)
}

/// Replace `\n`, `\t`, `\"` and `\'`. Any other backslash is kept as is.
pub fn unescape(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            let replacement = match chars.peek() {
                Some('n') => Some('\n'),
                Some('t') => Some('\t'),
                Some('"') => Some('"'),
                Some('\'') => Some('\''),
                _ => None,
            };
            if let Some(r) = replacement {
                out.push(r);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    out
}

fn parse_bool(value: &str) -> Value {
    Value::Bool(TRUE_VARIANTS.iter().any(|v| v.eq_ignore_ascii_case(value)))
}

/// A `.` makes a float. Without one the value is an integer unless it
/// overflows `i64` or its exponent leaves a fraction.
fn parse_number(value: &str) -> Value {
    let has_dot = value.contains('.');

    if !has_dot {
        if let Ok(n) = value.parse::<i64>() {
            return Value::Integer(n);
        }
    }

    match value.parse::<f64>() {
        Ok(f) if !has_dot && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Value::Integer(f as i64)
        }
        Ok(f) => Value::Float(f),
        Err(_) => Value::String(value.to_string()),
    }
}

fn parse_unquoted(value: &str, ctx: &SubstitutionContext<'_>, loc: Location<'_>) -> Result<Value, EnvError> {
    if value.is_empty() {
        return Ok(Value::Null);
    }

    let text = value.replace("\\#", "#");
    interpolate(&text, Quoting::Unquoted, ctx, loc)
}
