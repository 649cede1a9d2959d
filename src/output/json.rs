//! JSON output formatter for conflict check results.
//!
//! Provides machine-readable JSON output for CI pipelines and scripting.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "verdict": "conflicts_found",
//!   "conflicts": [
//!     {
//!       "entry": "com/x/Foo.class",
//!       "class_name": "com.x.Foo",
//!       "archives": ["lib-a.jar", "lib-b.jar"]
//!     }
//!   ],
//!   "archives": ["lib-a.jar", "lib-b.jar"],
//!   "summary": {
//!     "archives_scanned": 2,
//!     "class_entries": 4,
//!     "unique_entries": 3,
//!     "conflicting_entries": 1,
//!     "implicated_archives": 2,
//!     "scan_duration_ms": 3
//!   },
//!   "exit_code": 2,
//!   "exit_code_name": "JC002"
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{CheckResult, CheckSummary};
use crate::error::ExitCode;
use crate::output::class_display_name;

/// A single conflicting entry in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonConflict {
    /// Archive-internal entry path
    pub entry: String,
    /// Dotted class name
    pub class_name: String,
    /// Archives containing the entry, sorted
    pub archives: Vec<String>,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Verdict name (`no_archives`, `clean` or `conflicts_found`)
    pub verdict: &'static str,
    /// Conflicting entries in entry path order
    pub conflicts: Vec<JsonConflict>,
    /// Every implicated archive, deduplicated and sorted
    pub archives: Vec<String>,
    /// Scan statistics
    pub summary: CheckSummary,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "JC002")
    pub exit_code_name: &'static str,
}

impl JsonOutput {
    /// Create the JSON view of a check result.
    ///
    /// # Example
    ///
    /// ```
    /// use jarclash::duplicates::ConflictChecker;
    /// use jarclash::error::ExitCode;
    /// use jarclash::output::JsonOutput;
    ///
    /// let result = ConflictChecker::with_defaults().check(&[]).unwrap();
    /// let output = JsonOutput::new(&result, ExitCode::Success);
    /// assert_eq!(output.verdict, "no_archives");
    /// assert!(output.conflicts.is_empty());
    /// ```
    #[must_use]
    pub fn new(result: &CheckResult, exit_code: ExitCode) -> Self {
        let (conflicts, archives) = match result.report.verdict.groups() {
            Some(groups) => (
                groups
                    .iter()
                    .map(|(entry, archives)| JsonConflict {
                        entry: entry.to_string(),
                        class_name: class_display_name(entry),
                        archives: archives.iter().cloned().collect(),
                    })
                    .collect(),
                groups
                    .implicated_archives()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        Self {
            verdict: result.report.verdict.name(),
            conflicts,
            archives,
            summary: result.summary.clone(),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
