use super::*;
use crate::config::{Category, ForbiddenRules};

fn forbidden(patterns: &[&str], layer: Option<&str>) -> RuleTemplate {
    RuleTemplate {
        forbidden: Some(ForbiddenRules {
            patterns: patterns.iter().map(|s| (*s).to_string()).collect(),
            disallowed_imports_from_layer: layer.map(String::from),
        }),
        ..RuleTemplate::default()
    }
}

fn store(text: &str) -> SourceFile {
    SourceFile::new("src/stores/cart.ts", Category::Store, text)
}

#[test]
fn present_imports_pass() {
    let template = RuleTemplate {
        required_imports: vec!["zustand".to_string()],
        ..RuleTemplate::default()
    };
    let source = store("import { create } from 'zustand';\n");
    assert!(RequiredImportsCheck.evaluate(&template, &source).unwrap().passed());
}

#[test]
fn missing_import_has_no_location() {
    let template = RuleTemplate {
        required_imports: vec!["zustand".to_string(), "zustand/middleware".to_string()],
        ..RuleTemplate::default()
    };
    let source = store("import { create } from 'zustand';\n");
    let result = RequiredImportsCheck.evaluate(&template, &source).unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].line, 0);
    assert!(result.violations[0].message.contains("zustand/middleware"));
}

#[test]
fn forbidden_literal_reports_first_occurrence_once() {
    let source = store("const a = 1;\nconsole.log(a);\nconsole.log(a);\n");
    let result = ForbiddenPatternsCheck
        .evaluate(&forbidden(&["console.log"], None), &source)
        .unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].line, 2);
    assert!(result.violations[0].message.contains("2 occurrences"));
}

#[test]
fn each_forbidden_pattern_reports_separately() {
    let source = store("debugger;\nconsole.log(1);\n");
    let result = ForbiddenPatternsCheck
        .evaluate(&forbidden(&["console.log", "debugger"], None), &source)
        .unwrap();
    let lines: Vec<_> = result.violations.iter().map(|v| v.line).collect();
    assert_eq!(lines, vec![1, 2]);
}

#[test]
fn layer_imports_report_every_line() {
    let source = store(
        "import { Button } from '@/components/Button';\nimport x from '../utils/x';\nconst Modal = require('../components/Modal');\n",
    );
    let result = ForbiddenPatternsCheck
        .evaluate(&forbidden(&[], Some("components")), &source)
        .unwrap();

    let lines: Vec<_> = result.violations.iter().map(|v| v.line).collect();
    assert_eq!(lines, vec![1, 3]);
    assert!(result.violations[0].suggestion.is_some());
}

#[test]
fn layer_match_is_by_path_segment() {
    let source = store("import x from '@/componentsLegacy/x';\n");
    let result = ForbiddenPatternsCheck
        .evaluate(&forbidden(&[], Some("components")), &source)
        .unwrap();
    assert!(result.passed());
}

#[test]
fn clean_file_passes() {
    let source = store("export const useCartStore = create(() => ({}));\n");
    let result = ForbiddenPatternsCheck
        .evaluate(&forbidden(&["debugger"], Some("components")), &source)
        .unwrap();
    assert!(result.passed());
}
