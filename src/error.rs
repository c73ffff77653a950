//! Errors that stop the tool before any commit group is attempted.
//!
//! Once the run has started nothing is an error: every group ends in an
//! [`Outcome`](crate::orchestrator::Outcome).

use std::path::PathBuf;
use thiserror::Error;

/// Startup failures for `batch-commit`.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("batch file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read batch file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse batch from {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid arguments: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, BatchError>;
