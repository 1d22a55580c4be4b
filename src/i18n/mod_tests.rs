use std::path::PathBuf;

use super::*;

fn issue(kind: IssueKind) -> ConsistencyIssue {
    ConsistencyIssue {
        module: "member".to_string(),
        locale: "zh".to_string(),
        kind,
        key: "title".to_string(),
        detail: String::new(),
        path: PathBuf::from("zh.json"),
        line: 0,
    }
}

fn finding(kind: UsageKind) -> UsageFinding {
    UsageFinding {
        key: "member.title".to_string(),
        kind,
        file: PathBuf::from("src/App.tsx"),
        line: 3,
    }
}

fn report(issues: Vec<ConsistencyIssue>, usage: Vec<UsageFinding>) -> I18nReport {
    I18nReport {
        reference: "ko".to_string(),
        locales: vec!["ko".to_string(), "zh".to_string()],
        missing_files: Vec::new(),
        issues,
        usage,
        policy: SeverityPolicy::default(),
    }
}

#[test]
fn default_policy_blocks_mismatch_and_undefined() {
    let policy = SeverityPolicy::default();
    assert_eq!(policy.for_issue(IssueKind::KeyMismatch), Severity::Blocking);
    assert_eq!(policy.for_issue(IssueKind::MixedLanguage), Severity::Blocking);
    assert_eq!(policy.for_issue(IssueKind::EmptyValue), Severity::Advisory);
    assert_eq!(policy.for_issue(IssueKind::NamingConvention), Severity::Advisory);
    assert_eq!(policy.for_usage(UsageKind::Undefined), Severity::Blocking);
    assert_eq!(policy.for_usage(UsageKind::Unused), Severity::Advisory);
}

#[test]
fn policy_fields_default_individually() {
    let policy: SeverityPolicy = toml::from_str(
        r#"
mixed_language = "advisory"
naming_convention = "blocking"
"#,
    )
    .unwrap();

    assert_eq!(policy.mixed_language, Severity::Advisory);
    assert_eq!(policy.naming_convention, Severity::Blocking);
    assert_eq!(policy.key_mismatch, Severity::Blocking);
    assert_eq!(policy.empty_value, Severity::Advisory);
}

#[test]
fn unused_stays_advisory_whatever_the_policy() {
    let policy = SeverityPolicy {
        undefined_key: Severity::Advisory,
        ..SeverityPolicy::default()
    };
    assert_eq!(policy.for_usage(UsageKind::Unused), Severity::Advisory);
    assert_eq!(policy.for_usage(UsageKind::Undefined), Severity::Advisory);
}

#[test]
fn one_missing_key_fails_the_report() {
    let report = report(vec![issue(IssueKind::KeyMismatch)], Vec::new());
    assert_eq!(report.blocking_count(), 1);
    assert!(!report.passed());
}

#[test]
fn advisory_findings_alone_pass() {
    let report = report(
        vec![issue(IssueKind::EmptyValue), issue(IssueKind::NamingConvention)],
        vec![finding(UsageKind::Unused)],
    );
    assert_eq!(report.blocking_count(), 0);
    assert_eq!(report.advisory_count(), 3);
    assert!(report.passed());
}

#[test]
fn undefined_usage_counts_as_blocking() {
    let report = report(Vec::new(), vec![finding(UsageKind::Undefined)]);
    assert!(!report.passed());
}

#[test]
fn policy_overrides_flip_outcome() {
    let mut report = report(vec![issue(IssueKind::MixedLanguage)], Vec::new());
    assert!(!report.passed());

    report.policy.mixed_language = Severity::Advisory;
    assert!(report.passed());
}

#[test]
fn severity_displays_lowercase() {
    assert_eq!(Severity::Blocking.to_string(), "blocking");
    assert_eq!(Severity::Advisory.to_string(), "advisory");
}
