//! Symbol list source.
//!
//! Reads the input file line by line, in file order. Empty lines are
//! preserved as empty strings; downstream they become explicit skip
//! markers, not dropped rows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Fatal input-file failure; the run produces no report when this fires.
#[derive(Debug, Error)]
pub enum FileAccessError {
    #[error("input file not found: {path}")]
    NotFound { path: String },

    #[error("input path is not a regular file: {path}")]
    NotAFile { path: String },

    #[error("cannot read input file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read the ordered symbol lines from `path`.
///
/// Line-ending agnostic: a trailing `\r` is stripped so CRLF input parses
/// the same as LF. The file handle is closed before this returns, so the
/// fetch pipeline never holds it open across lookups.
pub fn read_symbol_lines(path: &Path) -> Result<Vec<String>, FileAccessError> {
    let display = path.display().to_string();

    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FileAccessError::NotFound {
                path: display.clone(),
            }
        } else {
            FileAccessError::Unreadable {
                path: display.clone(),
                source,
            }
        }
    })?;
    if !metadata.is_file() {
        return Err(FileAccessError::NotAFile { path: display });
    }

    let file = File::open(path).map_err(|source| FileAccessError::Unreadable {
        path: display.clone(),
        source,
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let mut line = line.map_err(|source| FileAccessError::Unreadable {
            path: display.clone(),
            source,
        })?;
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }

    Ok(lines)
}
