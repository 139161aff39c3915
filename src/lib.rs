// Author: Dustin Pilgrim
// License: MIT

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod config;

use std::path::Path;

pub use ast::{Document, Value};
pub use error::EnvError;
pub use config::EnvConfig;
pub use parser::{ParseOptions, Parser};

/// Parse `.env` content held in memory with default options.
///
/// Errors are opaque (see [`ParseOptions::origin_exception`]).
pub fn parse_str(content: &str) -> Result<Document, EnvError> {
    Parser::new(&ParseOptions::default()).parse(content)
}

/// Load and parse a `.env` file.
///
/// With `origin_exception` set, parse failures carry the file path, the
/// offending text and the line number.
pub fn parse_file<P: AsRef<Path>>(path: P, origin_exception: bool) -> Result<Document, EnvError> {
    let options = ParseOptions::new().origin_exception(origin_exception);
    EnvConfig::from_file_with_options(path, options).map(EnvConfig::into_contents)
}
