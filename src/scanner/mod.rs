//! Target file selection.

mod directory;
mod filter;

pub use directory::{DirectoryScanner, PRUNED_DIRS, ScanIter, SkipReason, Skipped};
pub use filter::{CategoryFilter, FileFilter, build_glob_set, category_extensions};
