mod error_output;
mod i18n;
mod json;
mod path;
mod text;

pub use error_output::ErrorOutput;
pub use i18n::{I18nJsonFormatter, I18nTextFormatter};
pub use json::JsonFormatter;
pub use path::display_path;
pub use text::TextFormatter;

use crate::error::Result;
use crate::gate::GateOutcome;
use crate::i18n::I18nReport;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Use colors if the stream is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve the mode against a concrete stream.
    #[must_use]
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            // https://no-color.org/: presence of the variable disables color
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && is_terminal,
        }
    }
}

/// ANSI color codes
pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// Trait for formatting a gated check run.
pub trait OutputFormatter {
    /// Format the gate outcome into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, outcome: &GateOutcome) -> Result<String>;
}

/// Trait for formatting a localization consistency run.
pub trait I18nFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &I18nReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
