use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::EnvError;
use crate::lexer::{Lexer, Line};

/// Expand a leading `~/` to the home directory.
pub(super) fn resolve_path(raw: &Path) -> Result<PathBuf, EnvError> {
    let Some(rest) = raw.to_str().and_then(|s| s.strip_prefix("~/")) else {
        return Ok(raw.to_path_buf());
    };

    let home = dirs::home_dir().ok_or_else(|| EnvError::FileNotFound {
        path: raw.to_string_lossy().to_string(),
        hint: Some("Could not determine home directory for ~ expansion; set HOME or use an absolute path".into()),
        code: Some(300),
    })?;

    Ok(home.join(rest))
}

/// Read a file that must exist, be a regular file and hold UTF-8 text.
pub(super) fn read_env_file(path: &Path) -> Result<String, EnvError> {
    let display = path.to_string_lossy().to_string();

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(EnvError::FileNotFound {
                path: display,
                hint: Some("Check that the file exists".into()),
                code: Some(301),
            });
        }
        Err(e) => return Err(unreadable(display, format!("Failed to stat file: {}", e))),
    };

    if metadata.is_dir() {
        return Err(unreadable(display, "Path is a directory".into()));
    }

    let bytes = fs::read(path).map_err(|e| unreadable(display.clone(), format!("Failed to read file: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| EnvError::FileUnreadable {
        path: display,
        message: format!("File is not valid UTF-8: {}", e),
        hint: Some("Save the file with UTF-8 encoding".into()),
        code: Some(303),
    })
}

fn unreadable(path: String, message: String) -> EnvError {
    EnvError::FileUnreadable {
        path,
        message,
        hint: Some("Check that the path is a readable file".into()),
        code: Some(302),
    }
}

/// Line number and trimmed text of the declaration that set `key`.
///
/// A redeclared key reports its last declaration. `(0, "<key not found>")`
/// when no line declares it.
pub(super) fn find_config_line(key: &str, raw_content: &str) -> (usize, String) {
    let mut found = (0, "<key not found>".to_string());

    for (line, kind) in Lexer::new(raw_content) {
        if let Line::Entry(raw) = kind {
            if raw.key.trim() == key {
                found = (line, format!("{}={}", raw.key, raw.value).trim().to_string());
            }
        }
    }

    found
}
