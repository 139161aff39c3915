// Author: Dustin Pilgrim
// License: MIT

//! Line splitting for `.env` content.
//!
//! The lexer walks physical lines and classifies each one. It never fails
//! itself; a line without `=` comes back as [`Line::Malformed`] and the
//! parser decides what to do with it.

mod scanner;

/// A `KEY=VALUE` line split at its first `=`. Neither side is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub line: usize,
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Entry(RawLine<'a>),
    /// Non-blank, non-comment text with no `=`.
    Malformed(&'a str),
}

pub struct Lexer<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            rest: scanner::strip_bom(input),
            line: 0,
        }
    }

    /// Number of the line most recently returned (1-based, 0 before the first).
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_line(&mut self) -> Option<(usize, Line<'a>)> {
        let text = scanner::next_physical_line(&mut self.rest)?;
        self.line += 1;
        Some((self.line, classify(text, self.line)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (usize, Line<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

/// Classify one physical line (without its terminator).
pub fn classify(text: &str, line: usize) -> Line<'_> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }

    if trimmed.starts_with('#') {
        return Line::Comment;
    }

    match text.split_once('=') {
        Some((key, value)) => Line::Entry(RawLine { line, key, value }),
        None => Line::Malformed(text),
    }
}
