//! Entry index and duplicate collection.
//!
//! # Overview
//!
//! [`ConflictDetector`] consumes `(archive, entry)` observations one at a time
//! and keeps two structures:
//!
//! - the [`EntryIndex`], which records the first archive seen for every entry
//!   path (its *owner*);
//! - the [`DuplicateGroups`], which maps every entry path claimed by two or
//!   more distinct archives to the complete set of those archives.
//!
//! Both are populated in a single forward pass and never shrink. Calling
//! [`ConflictDetector::finish`] freezes the detector and hands back the groups.
//!
//! # Owner selection
//!
//! The owner of a path is whichever archive was observed first, so it depends
//! entirely on the order of the input archive list. It carries no meaning
//! beyond that and is not deterministic unless the caller sorts the list.
//! The groups themselves do not depend on scan order.
//!
//! # Example
//!
//! ```
//! use jarclash::duplicates::ConflictDetector;
//! use jarclash::scanner::EntryRecord;
//!
//! let mut detector = ConflictDetector::new();
//! detector.observe(EntryRecord::new("lib-a.jar", "com/x/Foo.class"));
//! detector.observe(EntryRecord::new("lib-a.jar", "com/x/Bar.class"));
//! detector.observe(EntryRecord::new("lib-b.jar", "com/x/Foo.class"));
//! detector.observe(EntryRecord::new("lib-b.jar", "com/x/Baz.class"));
//!
//! let groups = detector.finish();
//! assert_eq!(groups.len(), 1);
//! assert!(groups.archives("com/x/Foo.class").unwrap().contains("lib-b.jar"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::scanner::EntryRecord;

/// First-seen owner per entry path, ordered by path.
pub type EntryIndex = BTreeMap<String, EntryRecord>;

/// Entry paths found in two or more distinct archives.
///
/// Keys iterate in lexicographic order. Each value is the set of distinct
/// archive names that contain the path, the owner included; an archive that
/// contains the same path several times is listed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateGroups {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl DuplicateGroups {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conflicting entry paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no conflict was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Archives containing `entry_path`, if it is in conflict.
    #[must_use]
    pub fn archives(&self, entry_path: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(entry_path)
    }

    /// Whether `entry_path` is in conflict.
    #[must_use]
    pub fn contains(&self, entry_path: &str) -> bool {
        self.groups.contains_key(entry_path)
    }

    /// Iterate over `(entry_path, archives)` in entry path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.groups.iter().map(|(path, archives)| (path.as_str(), archives))
    }

    /// Every archive implicated in at least one conflict, deduplicated and sorted.
    #[must_use]
    pub fn implicated_archives(&self) -> BTreeSet<&str> {
        self.groups
            .values()
            .flat_map(|archives| archives.iter().map(String::as_str))
            .collect()
    }

    /// Union `archives` into the group for `entry_path`.
    fn extend<'a>(&mut self, entry_path: &str, archives: impl IntoIterator<Item = &'a str>) {
        let group = self.groups.entry(entry_path.to_string()).or_default();
        for archive in archives {
            if !group.contains(archive) {
                group.insert(archive.to_string());
            }
        }
    }
}

impl<'a> IntoIterator for &'a DuplicateGroups {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Accumulates observations for a single check run.
///
/// A detector is created fresh for every run and is the only writer of its
/// index and groups.
#[derive(Debug, Default)]
pub struct ConflictDetector {
    index: EntryIndex,
    groups: DuplicateGroups,
    observations: usize,
}

impl ConflictDetector {
    /// Create an empty detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of an entry inside an archive.
    ///
    /// The first record for a path becomes its owner. A later record from a
    /// different archive puts both the owner's archive and the new archive in
    /// the path's group. A later record from the owner's own archive leaves an
    /// absent group absent.
    pub fn observe(&mut self, record: EntryRecord) {
        self.observations += 1;

        match self.index.get(&record.entry_path) {
            None => {
                log::trace!("{} owned by {}", record.entry_path, record.archive_name);
                self.index.insert(record.entry_path.clone(), record);
            }
            Some(owner) => {
                if owner.archive_name == record.archive_name
                    && !self.groups.contains(&record.entry_path)
                {
                    log::debug!(
                        "{} repeated inside {}",
                        record.entry_path,
                        record.archive_name
                    );
                    return;
                }

                log::debug!(
                    "Duplicate class {} in {} (first seen in {})",
                    record.entry_path,
                    record.archive_name,
                    owner.archive_name
                );
                self.groups.extend(
                    &record.entry_path,
                    [owner.archive_name.as_str(), record.archive_name.as_str()],
                );
            }
        }
    }

    /// Owner record for `entry_path`, if it has been observed.
    #[must_use]
    pub fn owner(&self, entry_path: &str) -> Option<&EntryRecord> {
        self.index.get(entry_path)
    }

    /// The entry index built so far.
    #[must_use]
    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    /// The duplicate groups collected so far.
    #[must_use]
    pub fn groups(&self) -> &DuplicateGroups {
        &self.groups
    }

    /// Total number of records observed, repeats included.
    #[must_use]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Freeze the detector and return its duplicate groups.
    #[must_use]
    pub fn finish(self) -> DuplicateGroups {
        log::debug!(
            "Detector finished: {} observations, {} unique entries, {} conflicts",
            self.observations,
            self.index.len(),
            self.groups.len()
        );
        self.groups
    }
}
