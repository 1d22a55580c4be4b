use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{ConfigLoader, ProjectConfig};
use crate::error::GuardError;
use crate::output::{ColorMode, ErrorOutput};
use crate::scanner::{FileFilter, ScanIter, SkipReason};

/// Stderr diagnostics gated by `--verbose` and `--quiet`.
pub struct Diagnostics {
    out: ErrorOutput,
    verbose: u8,
    quiet: bool,
}

impl Diagnostics {
    #[must_use]
    pub fn new(color: ColorMode, verbose: u8, quiet: bool) -> Self {
        Self {
            out: ErrorOutput::new(color),
            verbose,
            quiet,
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.color, cli.verbose, cli.quiet)
    }

    /// Fatal errors are printed even in quiet mode.
    pub fn error(&self, error: &GuardError) {
        self.out.print_error(error);
    }

    pub fn warn(&self, message: &str, detail: Option<&str>) {
        if !self.quiet {
            self.out.print_warning(message, detail);
        }
    }

    /// Print `message` when verbosity is at least `level`.
    pub fn note(&self, level: u8, message: &str) {
        if !self.quiet && self.verbose >= level {
            self.out.print_note(message);
        }
    }

    /// Report what a finished walk left out: unreadable entries always,
    /// pruned and excluded paths at `-vv`.
    pub fn report_skipped<F: FileFilter>(&self, walk: &ScanIter<'_, F>) {
        for skipped in walk.skipped() {
            let path = skipped.path.display();
            match &skipped.reason {
                SkipReason::Unreadable(reason) => {
                    self.warn(&format!("skipped {path}"), Some(reason));
                }
                SkipReason::Pruned => self.note(2, &format!("pruned {path}")),
                SkipReason::Excluded => self.note(2, &format!("excluded {path}")),
            }
        }
    }
}

/// Load the project config: the explicit `--config` path when given (it
/// must exist), otherwise `.convention-guard.toml` in the working directory
/// or defaults.
///
/// # Errors
/// Returns an error if the config cannot be read, parsed or validated.
pub fn load_config<L: ConfigLoader>(
    loader: &L,
    explicit: Option<&Path>,
) -> crate::Result<ProjectConfig> {
    match explicit {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

/// Canonical working directory, used to shorten displayed paths.
#[must_use]
pub fn project_root() -> Option<PathBuf> {
    dunce::canonicalize(".").ok()
}

/// Write report output to a file, or to stdout unless quiet.
///
/// # Errors
/// Returns an error if the output file cannot be written.
pub fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
