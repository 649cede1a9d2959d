//! Duplicate class detection module.
//!
//! This module provides functionality for:
//! - Indexing class entries by path (first-seen owner)
//! - Grouping entry paths claimed by two or more archives
//! - Driving a complete check run over an archive list

pub mod checker;
pub mod detector;

pub use checker::{CheckResult, CheckSummary, CheckerConfig, ConflictChecker, SCAN_PHASE};
pub use detector::{ConflictDetector, DuplicateGroups, EntryIndex};
