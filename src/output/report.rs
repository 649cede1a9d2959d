//! Human-readable conflict report and check verdict.
//!
//! # Layout
//!
//! A clean check renders a banner:
//!
//! ```text
//! #################################################
//! #################################################
//!
//! my-webapp has no class conflicts
//!
//! #################################################
//! #################################################
//! ```
//!
//! A failed check renders, in [`DetailLevel::Detailed`] mode, one block per
//! conflicting class followed by the jars involved:
//!
//! ```text
//! ==================================
//! duplicate class file list:
//! com.x.Foo
//!     lib-a.jar
//!     lib-b.jar
//!
//! Jar files related:
//!     lib-a.jar
//!     lib-b.jar
//! ==================================
//! ```
//!
//! (archive names are indented with a tab). [`DetailLevel::Summary`] keeps only
//! the `Jar files related:` section.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::duplicates::DuplicateGroups;
use crate::scanner::CLASS_SUFFIX;

const CLEAN_RULE: &str = "#################################################";
const CONFLICT_RULE: &str = "==================================";

/// How much of the conflict breakdown the report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Only the flattened list of implicated jars.
    #[default]
    Summary,
    /// Every conflicting class with its jars, then the flattened list.
    Detailed,
}

impl DetailLevel {
    /// Map a `details` switch to a level.
    #[must_use]
    pub fn from_details(details: bool) -> Self {
        if details {
            Self::Detailed
        } else {
            Self::Summary
        }
    }
}

/// Terminal outcome of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The archive list was empty; nothing was scanned.
    NoArchives,
    /// Every archive was scanned and no entry appears in two of them.
    Clean,
    /// At least one entry appears in two or more archives.
    ConflictsFound(DuplicateGroups),
}

impl Verdict {
    /// Whether the calling build should fail.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ConflictsFound(_))
    }

    /// Machine-readable verdict name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoArchives => "no_archives",
            Self::Clean => "clean",
            Self::ConflictsFound(_) => "conflicts_found",
        }
    }

    /// The conflicting groups, if any.
    #[must_use]
    pub fn groups(&self) -> Option<&DuplicateGroups> {
        match self {
            Self::ConflictsFound(groups) => Some(groups),
            _ => None,
        }
    }
}

/// Rendered report text bound to its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Outcome of the check
    pub verdict: Verdict,
    /// Report text, one line per log record
    pub text: String,
}

impl Report {
    /// Report for a run that had no archives to scan.
    #[must_use]
    pub fn no_archives(subject: &str) -> Self {
        Self {
            verdict: Verdict::NoArchives,
            text: format!("no dependencies for {subject}"),
        }
    }

    /// Render the final duplicate groups of a completed scan.
    ///
    /// Empty groups produce the clean banner and [`Verdict::Clean`];
    /// anything else produces [`Verdict::ConflictsFound`] carrying the groups.
    #[must_use]
    pub fn render(groups: DuplicateGroups, detail: DetailLevel, subject: &str) -> Self {
        if groups.is_empty() {
            return Self {
                verdict: Verdict::Clean,
                text: render_clean(subject),
            };
        }

        Self {
            text: render_conflicts(&groups, detail),
            verdict: Verdict::ConflictsFound(groups),
        }
    }

    /// Report lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Level the report is logged at: info when clean, warn otherwise.
    #[must_use]
    pub fn level(&self) -> log::Level {
        match self.verdict {
            Verdict::Clean => log::Level::Info,
            Verdict::NoArchives | Verdict::ConflictsFound(_) => log::Level::Warn,
        }
    }

    /// Emit the report through the log facade at [`Report::level`].
    pub fn log(&self) {
        self.log_at(self.level());
    }

    /// Emit the report through the log facade at `level`.
    ///
    /// Used under `--quiet`, where only error records are shown, so that a
    /// failing check still names its conflicts.
    pub fn log_at(&self, level: log::Level) {
        for line in self.lines() {
            log::log!(target: crate::logging::REPORT_TARGET, level, "{}", line);
        }
    }
}

/// Convert an archive-internal class path to its dotted class name.
///
/// ```
/// use jarclash::output::class_display_name;
///
/// assert_eq!(class_display_name("com/x/Foo.class"), "com.x.Foo");
/// assert_eq!(class_display_name("com/x/Foo$Inner.class"), "com.x.Foo$Inner");
/// ```
#[must_use]
pub fn class_display_name(entry_path: &str) -> String {
    entry_path
        .strip_suffix(CLASS_SUFFIX)
        .unwrap_or(entry_path)
        .replace('/', ".")
}

fn render_clean(subject: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CLEAN_RULE}");
    let _ = writeln!(out, "{CLEAN_RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{subject} has no class conflicts");
    let _ = writeln!(out);
    let _ = writeln!(out, "{CLEAN_RULE}");
    let _ = write!(out, "{CLEAN_RULE}");
    out
}

fn render_conflicts(groups: &DuplicateGroups, detail: DetailLevel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CONFLICT_RULE}");

    if detail == DetailLevel::Detailed {
        let _ = writeln!(out, "duplicate class file list:");
        for (entry_path, archives) in groups.iter() {
            let _ = writeln!(out, "{}", class_display_name(entry_path));
            for archive in archives {
                let _ = writeln!(out, "\t{archive}");
            }
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out, "Jar files related:");
    for archive in groups.implicated_archives() {
        let _ = writeln!(out, "\t{archive}");
    }
    let _ = write!(out, "{CONFLICT_RULE}");
    out
}
