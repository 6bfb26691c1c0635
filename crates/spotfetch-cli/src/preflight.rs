//! Output path checks performed before any fetch is attempted.
//!
//! The input side is checked by the symbol source itself when it opens the
//! file; both checks run before the output file is truncated, so a fatal
//! error never leaves a partial report behind.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::CliError;

/// Verify the report path can be written without truncating anything yet.
///
/// An existing path must be a regular, writable file; a fresh path needs an
/// existing parent directory.
pub fn check_output_path(path: &Path) -> Result<(), CliError> {
    let display = path.display().to_string();

    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(CliError::OutputUnwritable {
                    path: display,
                    reason: String::from("not a regular file"),
                });
            }
            // Probe writability without truncating the current contents.
            OpenOptions::new()
                .write(true)
                .open(path)
                .map_err(|e| CliError::OutputUnwritable {
                    path: display,
                    reason: e.to_string(),
                })?;
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            match std::fs::metadata(parent) {
                Ok(metadata) if metadata.is_dir() => Ok(()),
                Ok(_) => Err(CliError::OutputUnwritable {
                    path: display,
                    reason: format!("parent {} is not a directory", parent.display()),
                }),
                Err(e) => Err(CliError::OutputUnwritable {
                    path: display,
                    reason: format!("parent {}: {e}", parent.display()),
                }),
            }
        }
        Err(e) => Err(CliError::OutputUnwritable {
            path: display,
            reason: e.to_string(),
        }),
    }
}
