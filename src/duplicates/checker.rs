//! Conflict check driver.
//!
//! # Overview
//!
//! [`ConflictChecker`] runs one complete check over an ordered archive list:
//!
//! 1. **Idle**: an empty list short-circuits to [`Verdict::NoArchives`]
//!    without touching the filesystem.
//! 2. **Scanning**: every class entry is fed from an [`ArchiveScanner`] into a
//!    fresh [`ConflictDetector`].
//! 3. **Reporting**: the frozen groups are rendered into a [`Report`].
//!
//! The first unreadable archive ends the run with a [`ScanError`]; no report
//! is produced from a partial scan.
//!
//! # Example
//!
//! ```no_run
//! use jarclash::duplicates::{CheckerConfig, ConflictChecker};
//! use jarclash::output::Verdict;
//! use jarclash::scanner::list_archives;
//! use std::path::Path;
//!
//! let archives = list_archives(Path::new("target/app/WEB-INF/lib"), "jar").unwrap();
//! let checker = ConflictChecker::new(CheckerConfig::default().with_subject("app"));
//! let result = checker.check(&archives).unwrap();
//!
//! if let Verdict::ConflictsFound(groups) = &result.report.verdict {
//!     println!("{} conflicting classes", groups.len());
//! }
//! ```
//!
//! [`Verdict::NoArchives`]: crate::output::Verdict::NoArchives

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::duplicates::ConflictDetector;
use crate::output::{DetailLevel, Report};
use crate::progress::ProgressCallback;
use crate::scanner::{ArchiveScanner, ScanError};

/// Name of the scan phase reported to progress callbacks.
pub const SCAN_PHASE: &str = "scan";

/// Configuration for a conflict check.
#[derive(Clone, Default)]
pub struct CheckerConfig {
    /// Whether the report lists every conflicting class.
    pub detail: DetailLevel,
    /// Name of the checked artifact used in report banners.
    pub subject: Option<String>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for CheckerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerConfig")
            .field("detail", &self.detail)
            .field("subject", &self.subject)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl CheckerConfig {
    /// Set the report detail level.
    #[must_use]
    pub fn with_detail(mut self, detail: DetailLevel) -> Self {
        self.detail = detail;
        self
    }

    /// Set the artifact name shown in report banners.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("artifact")
    }
}

/// Statistics for one check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Number of archives opened
    pub archives_scanned: usize,
    /// Number of class entries observed, repeats included
    pub class_entries: usize,
    /// Number of distinct class entry paths
    pub unique_entries: usize,
    /// Number of entry paths found in two or more archives
    pub conflicting_entries: usize,
    /// Number of archives involved in at least one conflict
    pub implicated_archives: usize,
    /// Duration of the scan
    #[serde(rename = "scan_duration_ms", serialize_with = "serialize_millis")]
    pub scan_duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Outcome of a completed check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Rendered report and its verdict
    pub report: Report,
    /// Scan statistics
    pub summary: CheckSummary,
}

/// Runs conflict checks over archive lists.
#[derive(Debug, Clone, Default)]
pub struct ConflictChecker {
    config: CheckerConfig,
}

impl ConflictChecker {
    /// Create a checker with the given configuration.
    #[must_use]
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Create a checker with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The checker's configuration.
    #[must_use]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check `archives` for entries present in more than one of them.
    ///
    /// Archives are scanned in the given order; see
    /// [`ConflictDetector`] for how that order affects owner attribution.
    ///
    /// # Errors
    ///
    /// Returns the [`ScanError`] of the first archive that cannot be read.
    pub fn check(&self, archives: &[PathBuf]) -> Result<CheckResult, ScanError> {
        let subject = self.config.subject();

        if archives.is_empty() {
            log::debug!("No archives to check for {}", subject);
            return Ok(CheckResult {
                report: Report::no_archives(subject),
                summary: CheckSummary::default(),
            });
        }

        let start = Instant::now();
        let progress = self.config.progress_callback.as_deref();
        if let Some(cb) = progress {
            cb.on_phase_start(SCAN_PHASE, archives.len());
        }

        log::info!("Scanning {} archive(s) for {}", archives.len(), subject);

        let mut detector = ConflictDetector::new();
        let mut scanner = ArchiveScanner::new(archives.iter().cloned());
        let mut reported = 0;

        while let Some(record) = scanner.next() {
            let record = record?;
            if let Some(cb) = progress {
                if scanner.archives_opened() != reported {
                    reported = scanner.archives_opened();
                    cb.on_progress(reported, &record.archive_name);
                }
            }
            detector.observe(record);
        }

        if let Some(cb) = progress {
            cb.on_progress(scanner.archives_opened(), "");
            cb.on_phase_end(SCAN_PHASE);
        }

        let class_entries = detector.observations();
        let unique_entries = detector.index().len();
        let groups = detector.finish();

        let summary = CheckSummary {
            archives_scanned: scanner.archives_opened(),
            class_entries,
            unique_entries,
            conflicting_entries: groups.len(),
            implicated_archives: groups.implicated_archives().len(),
            scan_duration: start.elapsed(),
        };

        log::info!(
            "Scan complete: {} archives, {} class entries, {} conflicts",
            summary.archives_scanned,
            summary.class_entries,
            summary.conflicting_entries
        );

        Ok(CheckResult {
            report: Report::render(groups, self.config.detail, subject),
            summary,
        })
    }
}
