// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// The main error type for `.env` loading, parsing and typed access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    #[error("[ENV] File Error: {path} is not a file or readable{}", suffix(.hint, .code))]
    FileNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ENV] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileUnreadable {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// A non-comment line without a `=` separator.
    #[error("[ENV] Syntax Error in {file} at line {line}: You must have a key = value ({raw:?}){}", suffix(.hint, .code))]
    MalformedLine {
        file: String,
        raw: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ENV] Syntax Error in {file} at line {line}: Key can only contain alphanumeric and underscores: {key}{}", suffix(.hint, .code))]
    InvalidKey {
        key: String,
        file: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised when a quoted value is not closed.
    #[error("[ENV] Syntax Error in {file} at line {line}: Missing end {quote} quote ({raw:?}){}", suffix(.hint, .code))]
    UnterminatedString {
        quote: char,
        file: String,
        raw: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised for `${NAME}` references to keys not declared above.
    #[error("[ENV] Syntax Error in {file} at line {line}: Variable has not been defined: {name} ({raw:?}){}", suffix(.hint, .code))]
    UndefinedVariable {
        name: String,
        file: String,
        raw: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// A parse failure with the origin details stripped.
    #[error("[ENV] Parse Error: {message}{}", suffix(&None, .code))]
    ParseFailed {
        message: String,
        code: Option<u32>,
    },

    #[error("[ENV] Key '{key}' not found{}", suffix(.hint, .code))]
    KeyNotFound {
        key: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ENV] Type Error{}: {message}{}", at_line(.line), suffix(.hint, .code))]
    TypeError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ENV] Validation Error{}: {message}{}", at_line(.line), suffix(.hint, .code))]
    ValidationError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

fn at_line(line: &usize) -> String {
    if *line > 0 {
        format!(" at line {}", line)
    } else {
        String::new()
    }
}

/// Where a parse step is looking: the file identifier and the 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: usize,
}

impl<'a> Location<'a> {
    pub fn new(file: &'a str, line: usize) -> Self {
        Self { file, line }
    }
}

impl EnvError {
    pub(crate) fn malformed_line(loc: Location<'_>, raw: &str) -> Self {
        EnvError::MalformedLine {
            file: loc.file.to_string(),
            raw: raw.to_string(),
            line: loc.line,
            hint: Some("Every non-comment line needs a KEY=VALUE pair".into()),
            code: Some(201),
        }
    }

    pub(crate) fn invalid_key(loc: Location<'_>, key: &str) -> Self {
        EnvError::InvalidKey {
            key: key.to_string(),
            file: loc.file.to_string(),
            line: loc.line,
            hint: Some("Use only letters, digits and '_' in keys".into()),
            code: Some(202),
        }
    }

    pub(crate) fn unterminated_string(loc: Location<'_>, quote: char, raw: &str) -> Self {
        EnvError::UnterminatedString {
            quote,
            file: loc.file.to_string(),
            raw: raw.to_string(),
            line: loc.line,
            hint: Some(format!("Close the value with a matching {} quote", quote)),
            code: Some(203),
        }
    }

    pub(crate) fn undefined_variable(loc: Location<'_>, name: &str, raw: &str) -> Self {
        EnvError::UndefinedVariable {
            name: name.to_string(),
            file: loc.file.to_string(),
            raw: raw.to_string(),
            line: loc.line,
            hint: Some("Variables can only reference keys declared on earlier lines".into()),
            code: Some(204),
        }
    }

    /// The bare message, without location, hint or code.
    pub fn message(&self) -> String {
        match self {
            EnvError::FileNotFound { path, .. } => format!("{} is not a file or readable", path),
            EnvError::FileUnreadable { message, .. } => message.clone(),
            EnvError::MalformedLine { .. } => "You must have a key = value".into(),
            EnvError::InvalidKey { key, .. } => {
                format!("Key can only contain alphanumeric and underscores: {}", key)
            }
            EnvError::UnterminatedString { quote, .. } => format!("Missing end {} quote", quote),
            EnvError::UndefinedVariable { name, .. } => {
                format!("Variable has not been defined: {}", name)
            }
            EnvError::ParseFailed { message, .. } => message.clone(),
            EnvError::KeyNotFound { key, .. } => format!("Key '{}' not found", key),
            EnvError::TypeError { message, .. } | EnvError::ValidationError { message, .. } => {
                message.clone()
            }
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            EnvError::FileNotFound { code, .. }
            | EnvError::FileUnreadable { code, .. }
            | EnvError::MalformedLine { code, .. }
            | EnvError::InvalidKey { code, .. }
            | EnvError::UnterminatedString { code, .. }
            | EnvError::UndefinedVariable { code, .. }
            | EnvError::ParseFailed { code, .. }
            | EnvError::KeyNotFound { code, .. }
            | EnvError::TypeError { code, .. }
            | EnvError::ValidationError { code, .. } => *code,
        }
    }

    /// 1-based line of the failure, when the error knows it.
    pub fn line(&self) -> Option<usize> {
        match self {
            EnvError::MalformedLine { line, .. }
            | EnvError::InvalidKey { line, .. }
            | EnvError::UnterminatedString { line, .. }
            | EnvError::UndefinedVariable { line, .. } => Some(*line),
            EnvError::TypeError { line, .. } | EnvError::ValidationError { line, .. } if *line > 0 => {
                Some(*line)
            }
            _ => None,
        }
    }

    /// The file the failure came from (`<string>` for in-memory content).
    pub fn file(&self) -> Option<&str> {
        match self {
            EnvError::FileNotFound { path, .. } | EnvError::FileUnreadable { path, .. } => Some(path),
            EnvError::MalformedLine { file, .. }
            | EnvError::InvalidKey { file, .. }
            | EnvError::UnterminatedString { file, .. }
            | EnvError::UndefinedVariable { file, .. } => Some(file),
            _ => None,
        }
    }

    /// The offending source text: the whole line, the key, or the value.
    pub fn raw(&self) -> Option<&str> {
        match self {
            EnvError::MalformedLine { raw, .. }
            | EnvError::UnterminatedString { raw, .. }
            | EnvError::UndefinedVariable { raw, .. } => Some(raw),
            EnvError::InvalidKey { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this is one of the grammar errors raised while parsing.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            EnvError::MalformedLine { .. }
                | EnvError::InvalidKey { .. }
                | EnvError::UnterminatedString { .. }
                | EnvError::UndefinedVariable { .. }
                | EnvError::ParseFailed { .. }
        )
    }

    /// Collapse a structured parse error into [`EnvError::ParseFailed`].
    /// Other errors pass through untouched.
    pub fn into_opaque(self) -> Self {
        match self {
            EnvError::MalformedLine { .. }
            | EnvError::InvalidKey { .. }
            | EnvError::UnterminatedString { .. }
            | EnvError::UndefinedVariable { .. } => EnvError::ParseFailed {
                message: self.message(),
                code: self.code(),
            },
            other => other,
        }
    }
}
