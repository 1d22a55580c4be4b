use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::WalkDir;

use super::FileFilter;
use crate::error::{GuardError, Result};

/// Directory names never descended into.
pub const PRUNED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    ".next",
    "coverage",
    "target",
    ".turbo",
    "out",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A well-known build or dependency directory.
    Pruned,
    /// Matched an `exclude` glob.
    Excluded,
    /// Walk error: permission denied, symlink loop, vanished entry.
    Unreadable(String),
}

/// A path the walk did not yield, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
    exclude: GlobSet,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub fn new(filter: F) -> Self {
        Self::with_exclude(filter, GlobSet::empty())
    }

    /// Scanner that also skips paths matching `exclude`, relative to the root.
    #[must_use]
    pub const fn with_exclude(filter: F, exclude: GlobSet) -> Self {
        Self { filter, exclude }
    }

    /// Start a fresh, lazy walk of `root`.
    ///
    /// Entries come in file-name order at every level. Each call restarts
    /// enumeration from the beginning.
    ///
    /// # Errors
    /// Returns `RootUnreadable` if `root` does not exist, cannot be resolved,
    /// or is a directory whose entries cannot be listed.
    pub fn iter(&self, root: &Path) -> Result<ScanIter<'_, F>> {
        let unreadable = |source| GuardError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        };
        let canonical = dunce::canonicalize(root).map_err(unreadable)?;
        if canonical.is_dir() {
            std::fs::read_dir(&canonical).map_err(unreadable)?;
        }
        let walker = WalkDir::new(&canonical)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        Ok(ScanIter {
            scanner: self,
            root: canonical,
            walker,
            skipped: Vec::new(),
        })
    }

    /// Collect every matching file under `root`.
    ///
    /// # Errors
    /// Returns `RootUnreadable` if `root` does not exist or cannot be resolved.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.iter(root)?.collect())
    }
}

/// Lazy walk over the files a [`DirectoryScanner`] selects.
pub struct ScanIter<'a, F: FileFilter> {
    scanner: &'a DirectoryScanner<F>,
    root: PathBuf,
    walker: walkdir::IntoIter,
    skipped: Vec<Skipped>,
}

impl<F: FileFilter> ScanIter<'_, F> {
    /// The canonical root being walked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths skipped so far.
    #[must_use]
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    fn skip(&mut self, path: &Path, reason: SkipReason) {
        self.skipped.push(Skipped {
            path: path.to_path_buf(),
            reason,
        });
    }
}

impl<F: FileFilter> Iterator for ScanIter<'_, F> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                    self.skip(&path, SkipReason::Unreadable(err.to_string()));
                    continue;
                }
            };

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf();

            if entry.file_type().is_dir() {
                if entry.depth() == 0 {
                    continue;
                }
                let pruned = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| PRUNED_DIRS.contains(&name));
                if pruned || self.scanner.exclude.is_match(&relative) {
                    let reason = if pruned {
                        SkipReason::Pruned
                    } else {
                        SkipReason::Excluded
                    };
                    self.walker.skip_current_dir();
                    self.skip(entry.path(), reason);
                }
                continue;
            }

            if !relative.as_os_str().is_empty() && self.scanner.exclude.is_match(&relative) {
                self.skip(entry.path(), SkipReason::Excluded);
                continue;
            }
            if self.scanner.filter.should_include(entry.path()) {
                return Some(entry.into_path());
            }
        }
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
