use super::*;
use crate::config::{CodeStyleRules, ForbiddenRules, NamingRules};

fn naming_and_forbidden() -> RuleTemplate {
    RuleTemplate {
        naming: Some(NamingRules {
            prefix: Some("use".to_string()),
            ..NamingRules::default()
        }),
        forbidden: Some(ForbiddenRules {
            patterns: vec!["debugger".to_string()],
            disallowed_imports_from_layer: None,
        }),
        ..RuleTemplate::default()
    }
}

#[test]
fn every_canonical_name_resolves() {
    for name in CANONICAL_ORDER {
        let check = check_by_name(name).unwrap();
        assert_eq!(check.name(), name);
    }
    assert!(check_by_name("spelling").is_none());
}

#[test]
fn implicit_order_keeps_only_configured_checks() {
    let registry = CheckRegistry::for_template(&naming_and_forbidden(), Category::Hook).unwrap();
    assert_eq!(registry.names(), vec!["naming", "forbidden-patterns"]);
}

#[test]
fn explicit_order_is_respected() {
    let mut template = naming_and_forbidden();
    template.checks = vec!["forbidden-patterns".to_string(), "naming".to_string()];
    let registry = CheckRegistry::for_template(&template, Category::Hook).unwrap();
    assert_eq!(registry.names(), vec!["forbidden-patterns", "naming"]);
}

#[test]
fn explicit_check_without_field_is_template_error() {
    let mut template = naming_and_forbidden();
    template.checks = vec!["selector-depth".to_string()];
    let err = CheckRegistry::for_template(&template, Category::Style)
        .err()
        .unwrap();
    match err {
        GuardError::TemplateField { check, field } => {
            assert_eq!(check, "selector-depth");
            assert_eq!(field, "code_style.max_selector_depth");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn template_without_checks_is_invalid() {
    let err = CheckRegistry::for_template(&RuleTemplate::default(), Category::Hook)
        .err()
        .unwrap();
    match err {
        GuardError::TemplateInvalid(msg) => assert_eq!(msg, "template configures no checks"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn incomplete_sections_alone_are_invalid() {
    // Sections present, but nothing any check can run on.
    let template = RuleTemplate {
        naming: Some(NamingRules::default()),
        code_style: Some(CodeStyleRules::default()),
        ..RuleTemplate::default()
    };
    assert!(matches!(
        CheckRegistry::for_template(&template, Category::Hook),
        Err(GuardError::TemplateInvalid(_))
    ));
}

#[test]
fn registry_length_matches_names() {
    let registry = CheckRegistry::for_template(&naming_and_forbidden(), Category::Hook).unwrap();
    assert!(!registry.is_empty());
    assert_eq!(registry.len(), registry.names().len());
}

#[test]
fn evaluate_produces_one_result_per_check() {
    let template = naming_and_forbidden();
    let registry = CheckRegistry::for_template(&template, Category::Hook).unwrap();
    let source = SourceFile::new(
        "src/hooks/data.ts",
        Category::Hook,
        "export function fetchData(){ debugger; }\n",
    );

    let report = registry.evaluate(&template, &source).unwrap();

    assert_eq!(report.checks.len(), 2);
    assert_eq!(report.checks[0].name, "naming");
    assert_eq!(report.checks[0].violations.len(), 1);
    assert_eq!(report.checks[0].violations[0].line, 1);
    assert!(report.checks[0].violations[0].message.contains("fetchData"));
    assert_eq!(report.checks[1].name, "forbidden-patterns");
    assert_eq!(report.checks[1].violations.len(), 1);
}

#[test]
fn evaluation_is_deterministic() {
    let template = RuleTemplate {
        code_style: Some(CodeStyleRules {
            max_nesting_depth: Some(1),
            ..CodeStyleRules::default()
        }),
        ..naming_and_forbidden()
    };
    let registry = CheckRegistry::for_template(&template, Category::Hook).unwrap();
    let source = SourceFile::new(
        "a.ts",
        Category::Hook,
        "export function thing() {\n  if (x) {\n    debugger;\n  }\n}\n",
    );

    let first = registry.evaluate(&template, &source).unwrap();
    let second = registry.evaluate(&template, &source).unwrap();
    assert_eq!(first, second);
}
