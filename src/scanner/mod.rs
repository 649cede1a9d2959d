//! Scanner module for archive discovery and entry enumeration.
//!
//! This module provides functionality for:
//! - Listing the archives of a dependency directory
//! - Enumerating the class entries of each archive, one archive at a time
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`listing`]: Archive discovery in a flat directory
//! - [`archive`]: Lazy, sequential enumeration of archive entries
//!
//! # Example
//!
//! ```no_run
//! use jarclash::scanner::{list_archives, ArchiveScanner};
//! use std::path::Path;
//!
//! let archives = list_archives(Path::new("target/app/WEB-INF/lib"), "jar").unwrap();
//! for record in ArchiveScanner::new(archives) {
//!     match record {
//!         Ok(record) => println!("{} -> {}", record.archive_name, record.entry_path),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod archive;
pub mod listing;

use std::path::PathBuf;

use serde::Serialize;

// Re-export main types
pub use archive::{ArchiveScanner, CLASS_SUFFIX};
pub use listing::list_archives;

/// One occurrence of a named entry inside one archive.
///
/// Two records are equal when both the archive name and the entry path match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryRecord {
    /// File name of the archive that contains the entry
    pub archive_name: String,
    /// Archive-internal path of the entry (e.g. `com/x/Foo.class`)
    pub entry_path: String,
}

impl EntryRecord {
    /// Create a new EntryRecord.
    #[must_use]
    pub fn new(archive_name: impl Into<String>, entry_path: impl Into<String>) -> Self {
        Self {
            archive_name: archive_name.into(),
            entry_path: entry_path.into(),
        }
    }
}

/// Errors that can occur while reading an archive.
///
/// Any of these aborts the whole check run.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The archive or directory was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when opening the archive or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The listed path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing the archive.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file could be opened but is not a readable archive.
    #[error("Invalid archive {path}: {source}")]
    InvalidArchive {
        /// Path of the archive
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },
}

impl ScanError {
    /// Map an I/O error on `path` to the matching variant.
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}
