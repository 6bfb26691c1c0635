use thiserror::Error;

use spotfetch_core::{FileAccessError, ReportError};

/// CLI-level error categories mapped to exit codes.
///
/// Only run-aborting failures pass through here; a single symbol's lookup
/// failure is recorded in the report and never becomes a `CliError`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    FileAccess(#[from] FileAccessError),

    #[error("cannot write output file {path}: {reason}")]
    OutputUnwritable { path: String, reason: String },

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::FileAccess(_) => 2,
            Self::OutputUnwritable { .. } => 2,
            Self::Report(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
