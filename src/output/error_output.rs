//! Diagnostics on stderr.
//!
//! Format: `✖ Type: message` / `  × detail` / `  help: suggestion`. Warnings
//! use `⚠ Warning:` and notes `· note:` with the same trailing lines.

use std::io::{IsTerminal, Write};

use crate::error::GuardError;

use super::{ColorMode, ansi};

/// Error output formatter with color support.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.resolve(std::io::stderr().is_terminal()),
        }
    }

    /// Prints a fatal error with its detail and suggestion.
    pub fn print_error(&self, error: &GuardError) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, error);
    }

    pub fn print_warning(&self, message: &str, detail: Option<&str>) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, detail);
    }

    /// Prints an informational line (verbose mode).
    pub fn print_note(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_note(&mut stderr, message);
    }

    pub fn write_error<W: Write>(&self, w: &mut W, error: &GuardError) {
        let heading = format!("✖ {}:", error.error_type());
        self.write_heading(w, &heading, ansi::RED, &error.to_string());
        self.write_trailer(w, error.detail().as_deref(), error.suggestion());
    }

    pub fn write_warning<W: Write>(&self, w: &mut W, message: &str, detail: Option<&str>) {
        self.write_heading(w, "⚠ Warning:", ansi::YELLOW, message);
        self.write_trailer(w, detail, None);
    }

    pub fn write_note<W: Write>(&self, w: &mut W, message: &str) {
        self.write_heading(w, "· note:", ansi::CYAN, message);
    }

    // Write failures on stderr are dropped: there is nowhere left to report them.
    fn write_heading<W: Write>(&self, w: &mut W, heading: &str, color: &str, message: &str) {
        if self.use_colors {
            let _ = writeln!(w, "{}{color}{heading}{} {message}", ansi::BOLD, ansi::RESET);
        } else {
            let _ = writeln!(w, "{heading} {message}");
        }
    }

    fn write_trailer<W: Write>(&self, w: &mut W, detail: Option<&str>, suggestion: Option<&str>) {
        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
