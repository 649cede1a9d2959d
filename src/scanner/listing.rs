//! Archive discovery in a dependency directory.
//!
//! The directory is listed flat (no recursion) and every regular file whose
//! name ends with the archive extension is kept. Links to regular files count
//! as files; links to directories and broken links do not. Matching ignores case and
//! surrounding whitespace, so `Foo.JAR` qualifies as a jar.
//!
//! The result is sorted by file name. Directory listing order is
//! platform-dependent, and the archive visited first for an entry becomes its
//! recorded owner, so sorting keeps owner attribution stable between runs.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// List the archives directly inside `dir` whose name ends with `.{extension}`.
///
/// # Errors
///
/// Returns [`ScanError::NotFound`] if `dir` does not exist,
/// [`ScanError::NotADirectory`] if it is not a directory, and an I/O variant
/// if it cannot be read.
///
/// # Example
///
/// ```no_run
/// use jarclash::scanner::list_archives;
/// use std::path::Path;
///
/// let jars = list_archives(Path::new("target/dependency"), "jar").unwrap();
/// println!("{} archives", jars.len());
/// ```
pub fn list_archives(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    let metadata =
        std::fs::metadata(dir).map_err(|e| ScanError::from_io(dir.to_path_buf(), e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let suffix = format!(".{}", extension.trim().trim_start_matches('.').to_lowercase());
    let mut archives = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => ScanError::from_io(path, io),
                None => ScanError::NotFound(path),
            }
        })?;

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("Skipping broken link {}: {}", entry.path().display(), e);
                    continue;
                }
            }
        } else if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().trim().to_lowercase();
        if name.ends_with(&suffix) {
            archives.push(entry.into_path());
        } else {
            log::trace!("Ignoring non-archive file: {}", entry.path().display());
        }
    }

    archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("Found {} archive(s) in {}", archives.len(), dir.display());
    Ok(archives)
}
