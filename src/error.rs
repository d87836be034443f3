// ABOUTME: Error taxonomy for the job status pipeline
// ABOUTME: Classifies failures as fatal (abort early) or recoverable (reported, exit 2)

use thiserror::Error;

/// Process exit status for a fully successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Identity, configuration or other fatal failure.
pub const EXIT_FATAL: i32 = 1;
/// At least one selection query or summary chunk failed.
pub const EXIT_REMOTE_FAILURE: i32 = 2;
/// A job identifier could not be read as an integer.
pub const EXIT_INVALID_JOB_ID: i32 = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobstatError {
    #[error("Could not resolve the current user: {0}")]
    IdentityResolution(String),

    #[error("Job selection failed: {0}")]
    RemoteQuery(String),

    #[error("Expected integer for jobID, got {0}")]
    InvalidJobIdentifier(String),

    #[error("Summary request for chunk {chunk} ({size} jobs) failed: {message}")]
    BatchFetch {
        chunk: usize,
        size: usize,
        message: String,
    },

    #[error("Unknown display format '{0}' (expected pretty, csv or json)")]
    UnknownFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JobstatError {
    /// Recoverable errors are reported and the run continues with partial data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            JobstatError::RemoteQuery(_) | JobstatError::BatchFetch { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            JobstatError::RemoteQuery(_) | JobstatError::BatchFetch { .. } => EXIT_REMOTE_FAILURE,
            JobstatError::InvalidJobIdentifier(_) => EXIT_INVALID_JOB_ID,
            JobstatError::IdentityResolution(_)
            | JobstatError::UnknownFormat(_)
            | JobstatError::Config(_) => EXIT_FATAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, JobstatError>;
