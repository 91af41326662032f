use std::io;

use procfs::ProcError;
use thiserror::Error;

/// Failure of the process table collaborator to produce a snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("cannot list processes: {0}")]
    Procfs(#[from] ProcError),

    #[error("process table reported {count} entries for a buffer of {capacity}")]
    Overrun { count: usize, capacity: usize },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("ps takes no arguments")]
    Usage,

    #[error("failed to read process table: {0}")]
    Fetch(#[from] FetchError),

    #[error("process {pid} has invalid state code {code}")]
    InvalidState { pid: u32, code: u8 },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl ReportError {
    /// Process exit status for this error. Usage errors are kept apart from
    /// runtime failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::Usage => 2,
            ReportError::Fetch(_) | ReportError::InvalidState { .. } | ReportError::Output(_) => 1,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number between 1 and {max}, got {value:?}")]
    InvalidCapacity {
        var: &'static str,
        value: String,
        max: usize,
    },
}
