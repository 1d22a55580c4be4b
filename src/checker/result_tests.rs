use std::path::PathBuf;

use super::*;

#[test]
fn check_result_passes_only_without_violations() {
    assert!(CheckResult::pass("naming").passed());
    let failed = CheckResult::new("naming", vec![Violation::at(3, "bad name")]);
    assert!(!failed.passed());
}

#[test]
fn unlocated_violation_uses_line_zero() {
    let v = Violation::unlocated("missing import");
    assert_eq!(v.line, 0);
    assert!(!v.has_location());
    assert!(Violation::at(1, "x").has_location());
}

#[test]
fn violation_with_suggestion() {
    let v = Violation::at(2, "arrow export").with_suggestion("use `export function`");
    assert_eq!(v.suggestion.as_deref(), Some("use `export function`"));
}

#[test]
fn file_report_first_failure_follows_check_order() {
    let report = FileReport::new(
        PathBuf::from("useCart.ts"),
        vec![
            CheckResult::pass("required-imports"),
            CheckResult::new("naming", vec![Violation::at(1, "a")]),
            CheckResult::new("forbidden-patterns", vec![Violation::at(2, "b")]),
        ],
    );
    assert!(!report.passed());
    assert_eq!(report.first_failure(), Some(1));
    assert_eq!(report.violation_count(), 2);
}

#[test]
fn empty_report_passes() {
    let report = FileReport::new(PathBuf::from("a.ts"), Vec::new());
    assert!(report.passed());
    assert_eq!(report.first_failure(), None);
}

#[test]
fn check_result_serializes_passed_flag() {
    let json = serde_json::to_value(CheckResult::new(
        "naming",
        vec![Violation::at(4, "fetchData lacks prefix")],
    ))
    .unwrap();
    assert_eq!(json["name"], "naming");
    assert_eq!(json["passed"], false);
    assert_eq!(json["violations"][0]["line"], 4);
    assert!(json["violations"][0].get("suggestion").is_none());
}
