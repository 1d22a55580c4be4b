//! Gate policy: decides how much of a run is reported and whether it passed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::checker::FileReport;

/// How the gate treats the first failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GatePolicy {
    /// Stop at the first failing check of the first failing file.
    #[default]
    FailFast,
    /// Report every file and every check.
    CollectAll,
}

impl std::fmt::Display for GatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailFast => f.write_str("fail-fast"),
            Self::CollectAll => f.write_str("collect-all"),
        }
    }
}

/// The first failing check of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstFailure {
    pub path: PathBuf,
    pub check: &'static str,
}

/// What the gate lets through, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateOutcome {
    pub policy: GatePolicy,
    pub reports: Vec<FileReport>,
    pub files_checked: usize,
    pub first_failure: Option<FirstFailure>,
    pub passed: bool,
}

impl GateOutcome {
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(FileReport::violation_count).sum()
    }

    #[must_use]
    pub fn failed_files(&self) -> usize {
        self.reports.iter().filter(|r| !r.passed()).count()
    }
}

pub struct Gate;

impl Gate {
    /// Replay per-file reports in enumeration order under `policy`.
    ///
    /// Under [`GatePolicy::FailFast`] the failing file keeps its checks up to
    /// and including the first failing one, and no later file is reported.
    #[must_use]
    pub fn apply(policy: GatePolicy, reports: Vec<FileReport>) -> GateOutcome {
        let mut kept = Vec::with_capacity(reports.len());
        let mut first_failure = None;

        for mut report in reports {
            let failing = report.first_failure();
            if first_failure.is_none()
                && let Some(idx) = failing
            {
                first_failure = Some(FirstFailure {
                    path: report.path.clone(),
                    check: report.checks[idx].name,
                });
                if policy == GatePolicy::FailFast {
                    report.checks.truncate(idx + 1);
                    kept.push(report);
                    break;
                }
            }
            kept.push(report);
        }

        GateOutcome {
            policy,
            files_checked: kept.len(),
            passed: first_failure.is_none(),
            first_failure,
            reports: kept,
        }
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
