//! Markdown discovery and in-place rewriting.

use crate::cleaner::clean_content;
use crate::patterns::{is_excluded, is_markdown};

use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Options controlling scan behavior (runtime flags)
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanOptions {
    /// Report files that would change without writing them
    pub dry_run: bool,
}

/// What happened to a single markdown file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Cleaned content equals the original; the file was not touched
    Unchanged,
    /// Cleaned content differs; the file was rewritten (or would be, in dry-run mode)
    Modified,
}

/// Failure to process a single file
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result of walking a tree
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Files rewritten, in the order they were processed
    pub modified: Vec<PathBuf>,
    /// Files that could not be read and were skipped
    pub unreadable: usize,
    /// Files whose cleaned content could not be written back
    pub failed: usize,
}

impl ScanReport {
    pub fn modified_count(&self) -> usize {
        self.modified.len()
    }
}

/// Clean one markdown file in place.
///
/// The file is decoded as UTF-8, with invalid sequences replaced by U+FFFD.
/// It is written back only when the cleaned text differs from the decoded
/// original, so unchanged files keep their modification time.
pub fn clean_file(path: &Path, options: ScanOptions) -> Result<FileOutcome, CleanError> {
    let bytes = fs::read(path).map_err(|source| CleanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let original = String::from_utf8_lossy(&bytes);
    let cleaned = clean_content(&original);

    if cleaned == original {
        return Ok(FileOutcome::Unchanged);
    }

    if options.dry_run {
        debug!("Would rewrite {}", path.display());
        return Ok(FileOutcome::Modified);
    }

    fs::write(path, cleaned).map_err(|source| CleanError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Rewrote {}", path.display());

    Ok(FileOutcome::Modified)
}

/// Walk `root` and clean every markdown file that is not under an excluded directory.
///
/// `exclude` adds directory names to the built-in exclusion set. `on_modified`
/// is called with each rewritten path as soon as the write succeeds.
pub fn scan_tree<F>(
    root: &Path,
    exclude: &[String],
    options: ScanOptions,
    mut on_modified: F,
) -> ScanReport
where
    F: FnMut(&Path),
{
    let mut report = ScanReport::default();

    debug!("Scanning {}", root.display());

    let root_buf = root.to_path_buf();
    let exclude_clone = exclude.to_vec();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        // Markdown under ignored paths is still cleaned; only the exclusion set prunes
        .git_ignore(false)
        .ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let relative = entry.path().strip_prefix(&root_buf).unwrap_or(entry.path());
            if is_excluded(relative, &exclude_clone) {
                debug!("Skipping excluded path: {}", entry.path().display());
                return false;
            }
            true
        })
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to access entry: {}", err);
                continue;
            }
        };

        let path = entry.path();
        if !is_markdown(path) {
            continue;
        }

        // Symlinked files are cleaned through the link; symlinked directories are not descended
        let is_file = entry
            .file_type()
            .is_some_and(|ft| ft.is_file() || (ft.is_symlink() && path.is_file()));
        if !is_file {
            continue;
        }

        match clean_file(path, options) {
            Ok(FileOutcome::Modified) => {
                on_modified(path);
                report.modified.push(path.to_path_buf());
            }
            Ok(FileOutcome::Unchanged) => {}
            Err(err @ CleanError::Read { .. }) => {
                debug!("{}: {}", err, source_of(&err));
                report.unreadable += 1;
            }
            Err(err @ CleanError::Write { .. }) => {
                warn!("{}: {}", err, source_of(&err));
                report.failed += 1;
            }
        }
    }

    report
}

fn source_of(err: &CleanError) -> &io::Error {
    match err {
        CleanError::Read { source, .. } | CleanError::Write { source, .. } => source,
    }
}

/// The directory one level above the directory holding `executable`.
///
/// Returns `None` only when `executable` has no parent at all.
pub fn root_for_executable(executable: &Path) -> Option<PathBuf> {
    let dir = executable.parent()?;
    Some(dir.parent().unwrap_or(dir).to_path_buf())
}
