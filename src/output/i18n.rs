//! Rendering of localization consistency reports.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::i18n::{
    ConsistencyIssue, I18nReport, ROOT_MODULE, Severity, UsageFinding, UsageKind, full_key,
};

use super::path::display_path;
use super::{ColorMode, I18nFormatter, ansi};

pub struct I18nTextFormatter {
    use_colors: bool,
    project_root: Option<PathBuf>,
}

impl I18nTextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.resolve(std::io::IsTerminal::is_terminal(&std::io::stdout())),
            project_root: None,
        }
    }

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

    fn mark(&self, severity: Severity) -> String {
        match severity {
            Severity::Blocking => self.paint("✗", ansi::RED),
            Severity::Advisory => self.paint("⚠", ansi::YELLOW),
        }
    }

    fn location(&self, path: &Path, line: usize) -> String {
        let path = display_path(path, self.project_root.as_deref());
        if line > 0 {
            format!("{path}:{line}")
        } else {
            path
        }
    }

    fn format_header(report: &I18nReport, output: &mut String) {
        let locales: Vec<String> = report
            .locales
            .iter()
            .map(|l| {
                if *l == report.reference {
                    format!("{l} (reference)")
                } else if report.missing_files.contains(l) {
                    format!("{l} (no file)")
                } else {
                    l.clone()
                }
            })
            .collect();
        writeln!(output, "Locales: {}", locales.join(", ")).ok();
    }

    fn format_issues(&self, report: &I18nReport, output: &mut String) {
        let mut groups: IndexMap<&str, IndexMap<&str, Vec<&ConsistencyIssue>>> = IndexMap::new();
        for issue in &report.issues {
            groups
                .entry(issue.module.as_str())
                .or_default()
                .entry(issue.locale.as_str())
                .or_default()
                .push(issue);
        }

        for (module, locales) in groups {
            let name = if module == ROOT_MODULE { "(root)" } else { module };
            output.push('\n');
            writeln!(output, "{}", self.paint(name, ansi::BOLD)).ok();
            for (locale, mut issues) in locales {
                writeln!(output, "  {locale}").ok();
                // stable: blocking first, input order within each severity
                issues.sort_by_key(|i| report.issue_severity(i) == Severity::Advisory);
                for issue in issues {
                    writeln!(
                        output,
                        "    {} {}: [{}] {}: {}",
                        self.mark(report.issue_severity(issue)),
                        self.location(&issue.path, issue.line),
                        issue.kind,
                        full_key(&issue.module, &issue.key),
                        issue.detail
                    )
                    .ok();
                }
            }
        }
    }

    fn format_usage(&self, report: &I18nReport, output: &mut String) {
        if report.usage.is_empty() {
            return;
        }
        output.push('\n');
        writeln!(output, "{}", self.paint("usage", ansi::BOLD)).ok();

        let mut findings: Vec<&UsageFinding> = report.usage.iter().collect();
        findings.sort_by_key(|f| report.usage_severity(f) == Severity::Advisory);
        for finding in findings {
            let what = match finding.kind {
                UsageKind::Undefined => "undefined key",
                UsageKind::Unused => "unused key",
            };
            writeln!(
                output,
                "  {} {}: {what} '{}'",
                self.mark(report.usage_severity(finding)),
                self.location(&finding.file, finding.line),
                finding.key
            )
            .ok();
        }
    }

    fn summary(&self, report: &I18nReport) -> String {
        let blocking = report.blocking_count();
        let advisory = report.advisory_count();
        if report.passed() {
            let head = self.paint("✓ Locales consistent", ansi::GREEN);
            if advisory == 0 {
                head
            } else {
                format!("{head} ({advisory} advisory)")
            }
        } else {
            format!(
                "{} {blocking} blocking, {advisory} advisory",
                self.paint("✗ Consistency check failed:", ansi::RED)
            )
        }
    }
}

impl I18nFormatter for I18nTextFormatter {
    fn format(&self, report: &I18nReport) -> Result<String> {
        let mut output = String::new();
        Self::format_header(report, &mut output);
        self.format_issues(report, &mut output);
        self.format_usage(report, &mut output);
        output.push('\n');
        writeln!(output, "{}", self.summary(report)).ok();
        Ok(output)
    }
}

#[derive(Default)]
pub struct I18nJsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary<'a>,
    issues: Vec<JsonIssue<'a>>,
    usage: Vec<JsonUsage<'a>>,
}

#[derive(Serialize)]
struct Summary<'a> {
    passed: bool,
    reference: &'a str,
    locales: &'a [String],
    missing_files: &'a [String],
    blocking: usize,
    advisory: usize,
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    #[serde(flatten)]
    issue: &'a ConsistencyIssue,
    severity: Severity,
}

#[derive(Serialize)]
struct JsonUsage<'a> {
    #[serde(flatten)]
    finding: &'a UsageFinding,
    severity: Severity,
}

impl I18nFormatter for I18nJsonFormatter {
    fn format(&self, report: &I18nReport) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                passed: report.passed(),
                reference: &report.reference,
                locales: &report.locales,
                missing_files: &report.missing_files,
                blocking: report.blocking_count(),
                advisory: report.advisory_count(),
            },
            issues: report
                .issues
                .iter()
                .map(|issue| JsonIssue {
                    issue,
                    severity: report.issue_severity(issue),
                })
                .collect(),
            usage: report
                .usage
                .iter()
                .map(|finding| JsonUsage {
                    finding,
                    severity: report.usage_severity(finding),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
impl I18nTextFormatter {
    pub const fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            project_root: None,
        }
    }
}

#[cfg(test)]
#[path = "i18n_tests.rs"]
mod tests;
