use super::*;

/// Outcome of validating a key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Valid(&'a str),
    /// The key starts with `#`; the whole line is a comment.
    Comment,
}

pub fn parse_key<'a>(raw: &'a str, loc: Location<'_>) -> Result<Key<'a>, EnvError> {
    let key = raw.trim();

    if key.starts_with('#') {
        return Ok(Key::Comment);
    }

    if !is_valid_key(key) {
        return Err(EnvError::invalid_key(loc, key));
    }

    Ok(Key::Valid(key))
}

/// ASCII letters and digits, with any number of underscores mixed in.
/// At least one letter or digit is required.
pub fn is_valid_key(key: &str) -> bool {
    let mut alnum = 0usize;
    for c in key.chars() {
        match c {
            '_' => {}
            c if c.is_ascii_alphanumeric() => alnum += 1,
            _ => return false,
        }
    }
    alnum > 0
}
