//! Localization consistency: parallel locale bundles, key usage in source,
//! and backfilling of missing keys.

mod backfill;
mod bundle;
mod consistency;
mod script;
mod usage;

pub use backfill::{BackfillPlan, InsertOutcome, LocaleWriter, plan_backfill};
pub use bundle::{KeyedBundle, LocaleDocument, ROOT_MODULE, full_key};
pub use consistency::{
    ConsistencyChecker, ConsistencyIssue, IssueKind, empty_or_placeholder_in, extra_in,
    missing_in, mixed_language_in, non_camel_interpolation_in,
};
pub use script::{Script, allowed_scripts};
pub use usage::{KeyReference, UsageFinding, UsageKind, UsageScan, UsageScanner, usage_findings};

use serde::{Deserialize, Serialize};

/// Whether a finding affects the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocking,
    Advisory,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blocking => f.write_str("blocking"),
            Self::Advisory => f.write_str("advisory"),
        }
    }
}

/// Severity of each finding kind, configurable under `[i18n.severity]`.
///
/// Unused keys are always advisory and have no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityPolicy {
    #[serde(default = "blocking")]
    pub key_mismatch: Severity,
    #[serde(default = "blocking")]
    pub mixed_language: Severity,
    #[serde(default = "advisory")]
    pub empty_value: Severity,
    #[serde(default = "advisory")]
    pub naming_convention: Severity,
    #[serde(default = "blocking")]
    pub undefined_key: Severity,
}

const fn blocking() -> Severity {
    Severity::Blocking
}

const fn advisory() -> Severity {
    Severity::Advisory
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            key_mismatch: Severity::Blocking,
            mixed_language: Severity::Blocking,
            empty_value: Severity::Advisory,
            naming_convention: Severity::Advisory,
            undefined_key: Severity::Blocking,
        }
    }
}

impl SeverityPolicy {
    #[must_use]
    pub const fn for_issue(&self, kind: IssueKind) -> Severity {
        match kind {
            IssueKind::KeyMismatch => self.key_mismatch,
            IssueKind::MixedLanguage => self.mixed_language,
            IssueKind::EmptyValue => self.empty_value,
            IssueKind::NamingConvention => self.naming_convention,
        }
    }

    #[must_use]
    pub const fn for_usage(&self, kind: UsageKind) -> Severity {
        match kind {
            UsageKind::Undefined => self.undefined_key,
            UsageKind::Unused => Severity::Advisory,
        }
    }
}

/// Everything one `i18n` run found, with severities resolved.
#[derive(Debug, Clone, Serialize)]
pub struct I18nReport {
    pub reference: String,
    pub locales: Vec<String>,
    /// Locales whose data file does not exist.
    pub missing_files: Vec<String>,
    pub issues: Vec<ConsistencyIssue>,
    pub usage: Vec<UsageFinding>,
    #[serde(skip)]
    pub policy: SeverityPolicy,
}

impl I18nReport {
    #[must_use]
    pub fn issue_severity(&self, issue: &ConsistencyIssue) -> Severity {
        self.policy.for_issue(issue.kind)
    }

    #[must_use]
    pub fn usage_severity(&self, finding: &UsageFinding) -> Severity {
        self.policy.for_usage(finding.kind)
    }

    #[must_use]
    pub fn blocking_count(&self) -> usize {
        self.count(Severity::Blocking)
    }

    #[must_use]
    pub fn advisory_count(&self) -> usize {
        self.count(Severity::Advisory)
    }

    fn count(&self, severity: Severity) -> usize {
        let issues = self
            .issues
            .iter()
            .filter(|i| self.issue_severity(i) == severity)
            .count();
        let usage = self
            .usage
            .iter()
            .filter(|u| self.usage_severity(u) == severity)
            .count();
        issues + usage
    }

    /// The run passes when no finding is blocking.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.blocking_count() == 0
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
