//! Output formatters for conflict check results.
//!
//! This module provides:
//! - The text report and the check [`Verdict`]
//! - JSON for CI pipelines and scripting
//!
//! # Example
//!
//! ```no_run
//! use jarclash::duplicates::ConflictChecker;
//! use jarclash::error::ExitCode;
//! use jarclash::output::JsonOutput;
//! use jarclash::scanner::list_archives;
//! use std::path::Path;
//!
//! let archives = list_archives(Path::new("target/dependency"), "jar").unwrap();
//! let result = ConflictChecker::with_defaults().check(&archives).unwrap();
//!
//! // Text report through the log facade
//! result.report.log();
//!
//! // JSON to stdout
//! let output = JsonOutput::new(&result, ExitCode::from_verdict(&result.report.verdict));
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod report;

// Re-export main types
pub use json::JsonOutput;
pub use report::{class_display_name, DetailLevel, Report, Verdict};
