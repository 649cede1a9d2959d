//! Structured error handling and exit codes.

use serde::Serialize;

use crate::materialize::MaterializeError;
use crate::output::Verdict;
use crate::project::ProjectError;
use crate::scanner::ScanError;

/// Exit codes for the jarclash application.
///
/// - 0: Success (no conflicts, or nothing to check)
/// - 1: General error (unexpected failure)
/// - 2: Conflicts found (the build should fail)
/// - 3: Configuration error (preconditions for the check are not met)
/// - 4: Archive read error (an archive could not be opened or enumerated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Check completed without conflicts or was skipped.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Conflicts found: At least one class is packaged in two or more jars.
    ConflictsFound = 2,
    /// Configuration error: The project or directory cannot be checked.
    ConfigurationError = 3,
    /// Archive read error: The scan was aborted on an unreadable archive.
    ArchiveReadError = 4,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "JC000",
            Self::GeneralError => "JC001",
            Self::ConflictsFound => "JC002",
            Self::ConfigurationError => "JC003",
            Self::ArchiveReadError => "JC004",
        }
    }

    /// Exit code for a completed check.
    #[must_use]
    pub fn from_verdict(verdict: &Verdict) -> Self {
        if verdict.is_failure() {
            Self::ConflictsFound
        } else {
            Self::Success
        }
    }

    /// Exit code for an error returned by [`crate::run_app`].
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CheckError>() {
            Some(CheckError::ArchiveRead { .. }) => Self::ArchiveReadError,
            Some(_) => Self::ConfigurationError,
            None => Self::GeneralError,
        }
    }
}

/// Errors that stop a check before it produces a verdict.
#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    /// A precondition of the check is not met.
    #[error("{0}")]
    Configuration(String),

    /// The project descriptor could not be read.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// The dependency copy step failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    /// An archive could not be read; the scan was aborted.
    #[error("Failed to check jar duplicates for {subject}: {source}")]
    ArchiveRead {
        /// Name of the checked artifact
        subject: String,
        /// The scan failure
        #[source]
        source: ScanError,
    },
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "JC001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
