use std::path::PathBuf;

use serde::Serialize;

use crate::checker::{CheckResult, FileReport};
use crate::error::Result;
use crate::gate::{GateOutcome, GatePolicy};

use super::OutputFormatter;
use super::path::display_path;

#[derive(Default)]
pub struct JsonFormatter {
    project_root: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary<'a>,
    files: Vec<FileResult<'a>>,
}

#[derive(Serialize)]
struct Summary<'a> {
    passed: bool,
    gate: GatePolicy,
    files_checked: usize,
    failed_files: usize,
    violations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_failure: Option<FirstFailure<'a>>,
}

#[derive(Serialize)]
struct FirstFailure<'a> {
    path: String,
    check: &'a str,
}

#[derive(Serialize)]
struct FileResult<'a> {
    path: String,
    passed: bool,
    checks: &'a [CheckResult],
}

impl JsonFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { project_root: None }
    }

    #[must_use]
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    fn convert<'a>(&self, report: &'a FileReport) -> FileResult<'a> {
        FileResult {
            path: display_path(&report.path, self.project_root.as_deref()),
            passed: report.passed(),
            checks: &report.checks,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &GateOutcome) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                passed: outcome.passed,
                gate: outcome.policy,
                files_checked: outcome.files_checked,
                failed_files: outcome.failed_files(),
                violations: outcome.violation_count(),
                first_failure: outcome.first_failure.as_ref().map(|f| FirstFailure {
                    path: display_path(&f.path, self.project_root.as_deref()),
                    check: f.check,
                }),
            },
            files: outcome.reports.iter().map(|r| self.convert(r)).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
