//! Sequential enumeration of class entries across a list of archives.
//!
//! # Overview
//!
//! [`ArchiveScanner`] is a lazy iterator over `(archive, entry)` observations.
//! Archives are visited in the order they were supplied and each archive's
//! entries in the archive's own central-directory order, which is not sorted.
//!
//! Only compiled classes are yielded: directory entries and any entry whose
//! name does not end with [`CLASS_SUFFIX`] are skipped.
//!
//! # Resource handling
//!
//! At most one archive handle is open at any time. The handle is dropped as
//! soon as its last entry has been read, before the next archive is opened,
//! and immediately when an error is reported.
//!
//! # Failure
//!
//! The first archive that cannot be opened or enumerated produces a single
//! [`ScanError`], after which the iterator is exhausted. Scanning cannot be
//! resumed; create a new scanner over the whole list instead.

use std::fs::File;
use std::io::BufReader;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use super::{EntryRecord, ScanError};

/// Name suffix of the entries that take part in conflict detection.
pub const CLASS_SUFFIX: &str = ".class";

/// An archive whose entries are currently being enumerated.
struct OpenArchive {
    path: PathBuf,
    name: String,
    zip: ZipArchive<BufReader<File>>,
    next: usize,
}

impl OpenArchive {
    fn open(path: &Path) -> Result<Self, ScanError> {
        let file = File::open(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;
        let zip = ZipArchive::new(BufReader::new(file)).map_err(|source| match source {
            ZipError::Io(e) => ScanError::from_io(path.to_path_buf(), e),
            source => ScanError::InvalidArchive {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("Opened {} ({} entries)", path.display(), zip.len());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            zip,
            next: 0,
        })
    }

    /// Advance to the next class entry of this archive.
    fn next_class_entry(&mut self) -> Option<Result<EntryRecord, ScanError>> {
        while self.next < self.zip.len() {
            let index = self.next;
            self.next += 1;

            let entry = match self.zip.by_index_raw(index) {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(ScanError::InvalidArchive {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };

            if entry.is_dir() || !entry.name().ends_with(CLASS_SUFFIX) {
                continue;
            }

            return Some(Ok(EntryRecord::new(self.name.as_str(), entry.name())));
        }
        None
    }
}

/// Lazy scanner over the class entries of an ordered list of archives.
///
/// # Example
///
/// ```no_run
/// use jarclash::scanner::ArchiveScanner;
/// use std::path::PathBuf;
///
/// let scanner = ArchiveScanner::new(vec![PathBuf::from("lib-a.jar"), PathBuf::from("lib-b.jar")]);
/// let records: Result<Vec<_>, _> = scanner.collect();
/// ```
pub struct ArchiveScanner {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<OpenArchive>,
    archives_opened: usize,
    failed: bool,
}

impl ArchiveScanner {
    /// Create a scanner over `archives`, visited in iteration order.
    #[must_use]
    pub fn new(archives: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: archives.into_iter().collect::<Vec<_>>().into_iter(),
            current: None,
            archives_opened: 0,
            failed: false,
        }
    }

    /// Number of archives opened so far.
    #[must_use]
    pub fn archives_opened(&self) -> usize {
        self.archives_opened
    }

    /// File name of the archive currently being enumerated.
    #[must_use]
    pub fn current_archive(&self) -> Option<&str> {
        self.current.as_ref().map(|open| open.name.as_str())
    }

    /// Whether the scan stopped on an unreadable archive.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    fn fail(&mut self, error: ScanError) -> ScanError {
        log::error!("Aborting scan: {}", error);
        self.failed = true;
        self.current = None;
        self.pending = Vec::new().into_iter();
        error
    }
}

impl Iterator for ArchiveScanner {
    type Item = Result<EntryRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(open) = self.current.as_mut() {
                match open.next_class_entry() {
                    Some(Ok(record)) => return Some(Ok(record)),
                    Some(Err(e)) => return Some(Err(self.fail(e))),
                    None => {
                        log::trace!("Finished {}", open.name);
                        // Close before the next archive is opened
                        self.current = None;
                    }
                }
            }

            let path = self.pending.next()?;
            match OpenArchive::open(&path) {
                Ok(open) => {
                    self.archives_opened += 1;
                    self.current = Some(open);
                }
                Err(e) => return Some(Err(self.fail(e))),
            }
        }
    }
}

impl FusedIterator for ArchiveScanner {}
