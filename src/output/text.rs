use std::fmt::Write;
use std::path::PathBuf;

use crate::checker::{CheckResult, FileReport, Violation};
use crate::error::Result;
use crate::gate::GateOutcome;

use super::path::display_path;
use super::{ColorMode, OutputFormatter, ansi};

pub struct TextFormatter {
    use_colors: bool,
    project_root: Option<PathBuf>,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.resolve(std::io::IsTerminal::is_terminal(&std::io::stdout())),
            project_root: None,
        }
    }

    /// Display paths relative to `root` when they live under it.
    #[must_use]
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn display(&self, report: &FileReport) -> String {
        display_path(&report.path, self.project_root.as_deref())
    }

    fn format_report(&self, report: &FileReport, output: &mut String) {
        let path = self.display(report);
        let heading = if self.use_colors {
            format!("{}{path}{}", ansi::BOLD, ansi::RESET)
        } else {
            path.clone()
        };
        writeln!(output, "{heading}").ok();

        for check in &report.checks {
            self.format_check(check, &path, output);
        }
    }

    fn format_check(&self, check: &CheckResult, path: &str, output: &mut String) {
        if check.passed() {
            writeln!(output, "  {} {}", self.paint("✓", ansi::GREEN), check.name).ok();
            return;
        }

        writeln!(output, "  {} {}", self.paint("✗", ansi::RED), check.name).ok();
        for violation in &check.violations {
            writeln!(output, "    {}", Self::location(path, violation)).ok();
            if let Some(help) = &violation.suggestion {
                writeln!(output, "      {} {help}", self.paint("help:", ansi::CYAN)).ok();
            }
        }
    }

    fn location(path: &str, violation: &Violation) -> String {
        if violation.has_location() {
            format!("{path}:{}: {}", violation.line, violation.message)
        } else {
            format!("{path}: {}", violation.message)
        }
    }

    fn terminal_line(&self, outcome: &GateOutcome) -> String {
        let files = plural(outcome.files_checked, "file");
        match &outcome.first_failure {
            None => format!(
                "{} ({files} checked)",
                self.paint("✓ All checks passed", ansi::GREEN)
            ),
            Some(failure) => {
                let path = display_path(&failure.path, self.project_root.as_deref());
                format!(
                    "{} {} in {path} ({} in {}, {files} checked)",
                    self.paint("✗ Check failed:", ansi::RED),
                    failure.check,
                    plural(outcome.violation_count(), "violation"),
                    plural(outcome.failed_files(), "file"),
                )
            }
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &GateOutcome) -> Result<String> {
        let mut output = String::new();

        for report in &outcome.reports {
            self.format_report(report, &mut output);
            output.push('\n');
        }

        writeln!(output, "{}", self.terminal_line(outcome)).ok();
        Ok(output)
    }
}

#[cfg(test)]
impl TextFormatter {
    pub const fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            project_root: None,
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
