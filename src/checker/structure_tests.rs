use super::*;
use crate::config::{Category, StructureRules};
use crate::error::GuardError;

fn structure(rules: StructureRules) -> RuleTemplate {
    RuleTemplate {
        structure: Some(rules),
        ..RuleTemplate::default()
    }
}

fn wrapper_rules() -> StructureRules {
    StructureRules {
        must_use_wrapper: Some(true),
        wrapper_marker: Some("devtools(".to_string()),
        must_have_name_tag: Some(true),
        ..StructureRules::default()
    }
}

fn store(text: &str) -> SourceFile {
    SourceFile::new("src/stores/member.ts", Category::Store, text)
}

#[test]
fn wrapped_and_tagged_store_passes() {
    let source = store(
        "export const useMemberStore = create<S>()(\n  devtools(\n    (set) => ({ count: 0 }),\n    { name: 'member' },\n  ),\n);\n",
    );
    let result = WrapperCheck.evaluate(&structure(wrapper_rules()), &source).unwrap();
    assert!(result.passed());
}

#[test]
fn unwrapped_store_reports_marker_and_tag() {
    let source = store("export const useMemberStore = create<S>()((set) => ({ count: 0 }));\n");
    let result = WrapperCheck.evaluate(&structure(wrapper_rules()), &source).unwrap();

    assert_eq!(result.violations.len(), 2);
    assert!(result.violations[0].message.contains("devtools("));
    assert!(result.violations[1].message.contains("name tag"));
    assert!(result.violations.iter().all(|v| v.line == 1));
}

#[test]
fn marker_outside_window_is_not_seen() {
    let mut text = String::from("export const useMemberStore = create<S>()(\n");
    for _ in 0..WRAPPER_WINDOW {
        text.push_str("  // filler\n");
    }
    text.push_str("  devtools((set) => ({}), { name: 'm' }),\n);\n");
    let rules = StructureRules {
        must_have_name_tag: Some(false),
        ..wrapper_rules()
    };

    let result = WrapperCheck.evaluate(&structure(rules), &store(&text)).unwrap();
    assert_eq!(result.violations.len(), 1);
}

#[test]
fn wrapper_without_marker_is_template_error() {
    let rules = StructureRules {
        must_use_wrapper: Some(true),
        ..StructureRules::default()
    };
    let err = WrapperCheck.evaluate(&structure(rules), &store("")).unwrap_err();
    match err {
        GuardError::TemplateField { field, .. } => assert_eq!(field, "structure.wrapper_marker"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sections_are_matched_case_insensitively_in_comments() {
    let rules = StructureRules {
        required_sections: vec!["State".to_string(), "Actions".to_string()],
        ..StructureRules::default()
    };
    let source = store("// --- state ---\nconst state = 1;\nconst actions = 2;\n");

    let result = RequiredSectionsCheck.evaluate(&structure(rules), &source).unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].line, 0);
    assert!(result.violations[0].message.contains("'Actions'"));
}

#[test]
fn section_title_in_block_comment_counts() {
    let rules = StructureRules {
        required_sections: vec!["Actions".to_string()],
        ..StructureRules::default()
    };
    let source = store("/**\n * Actions\n */\n");
    assert!(RequiredSectionsCheck.evaluate(&structure(rules), &source).unwrap().passed());
}

#[test]
fn default_exports_are_reported_per_line() {
    let rules = StructureRules {
        named_exports_only: Some(true),
        ..StructureRules::default()
    };
    let source = store(
        "export const useA = create(() => ({}));\nexport default useA;\nconst s = 'export default';\nmodule.exports = useA;\n",
    );

    let result = ExportShapeCheck.evaluate(&structure(rules), &source).unwrap();

    let lines: Vec<_> = result.violations.iter().map(|v| v.line).collect();
    assert_eq!(lines, vec![2, 4]);
}
