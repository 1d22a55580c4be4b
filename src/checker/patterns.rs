use std::sync::LazyLock;

use regex::Regex;

use crate::config::RuleTemplate;
use crate::error::Result;

use super::{Check, CheckResult, SourceFile, Violation, ensure_configured};

/// Module specifiers of `import ... from 'x'`, `import 'x'`, `import('x')`, `require('x')`.
static IMPORT_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:\bimport\b[^'"]*?\bfrom\s*|\bimport\s*\(?\s*|\brequire\s*\(\s*|@(?:import|use)\s+)['"]([^'"]+)['"]"#,
    )
    .expect("Invalid regex")
});

/// Every `required_imports` entry must occur somewhere in the file.
pub struct RequiredImportsCheck;

impl RequiredImportsCheck {
    pub const NAME: &'static str = "required-imports";
}

impl Check for RequiredImportsCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        template
            .required_imports
            .is_empty()
            .then_some("required_imports")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let violations = template
            .required_imports
            .iter()
            .filter(|required| !source.text().contains(required.as_str()))
            .map(|required| {
                Violation::unlocated(format!("missing required import '{required}'"))
                    .with_suggestion(format!("add an import matching '{required}'"))
            })
            .collect();
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Literal patterns and imports from a disallowed layer.
///
/// Literal patterns report once per pattern at the first occurrence; layer
/// imports report every offending import line.
pub struct ForbiddenPatternsCheck;

impl ForbiddenPatternsCheck {
    pub const NAME: &'static str = "forbidden-patterns";

    fn literal_violations(template: &RuleTemplate, source: &SourceFile) -> Vec<Violation> {
        let text = source.text();
        template
            .forbidden_patterns()
            .iter()
            .filter_map(|pattern| {
                let first = text.find(pattern.as_str())?;
                let count = text.matches(pattern.as_str()).count();
                let message = if count == 1 {
                    format!("forbidden pattern '{pattern}'")
                } else {
                    format!("forbidden pattern '{pattern}' ({count} occurrences)")
                };
                Some(Violation::at(source.line_of_offset(first), message))
            })
            .collect()
    }

    fn layer_violations(layer: &str, source: &SourceFile) -> Vec<Violation> {
        source
            .lines()
            .flat_map(|(line, text)| {
                IMPORT_SPECIFIER
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                    .filter(|specifier| specifier.split('/').any(|segment| segment == layer))
                    .map(|specifier| {
                        Violation::at(
                            line,
                            format!("import '{specifier}' reaches into the '{layer}' layer"),
                        )
                        .with_suggestion(format!(
                            "move the shared code out of '{layer}' or invert the dependency"
                        ))
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Check for ForbiddenPatternsCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        (template.forbidden_patterns().is_empty() && template.disallowed_layer().is_none())
            .then_some("forbidden.patterns")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let mut violations = Self::literal_violations(template, source);
        if let Some(layer) = template.disallowed_layer() {
            violations.extend(Self::layer_violations(layer, source));
        }
        violations.sort_by_key(|v| v.line);
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;
