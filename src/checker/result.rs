use std::path::{Path, PathBuf};

use serde::Serialize;

/// One concrete instance of non-compliance.
///
/// `line` is 1-based; `0` means the location is unknown (for example a
/// required import that is missing from the whole file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub line: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    #[must_use]
    pub fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            suggestion: None,
        }
    }

    /// A violation without a specific location.
    #[must_use]
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self::at(0, message)
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub const fn has_location(&self) -> bool {
        self.line > 0
    }
}

/// Outcome of one named check against one file.
///
/// There is no separate `passed` flag: a result passes exactly when it holds
/// no violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub violations: Vec<Violation>,
}

impl CheckResult {
    #[must_use]
    pub const fn new(name: &'static str, violations: Vec<Violation>) -> Self {
        Self { name, violations }
    }

    #[must_use]
    pub const fn pass(name: &'static str) -> Self {
        Self::new(name, Vec::new())
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

impl Serialize for CheckResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CheckResult", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("violations", &self.violations)?;
        state.end()
    }
}

/// All check results for one file, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub checks: Vec<CheckResult>,
}

impl FileReport {
    #[must_use]
    pub const fn new(path: PathBuf, checks: Vec<CheckResult>) -> Self {
        Self { path, checks }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }

    /// Index of the first failing check in check order.
    #[must_use]
    pub fn first_failure(&self) -> Option<usize> {
        self.checks.iter().position(|c| !c.passed())
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.checks.iter().map(|c| c.violations.len()).sum()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
