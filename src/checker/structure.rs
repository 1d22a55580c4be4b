use std::sync::LazyLock;

use regex::Regex;

use crate::config::RuleTemplate;
use crate::error::Result;

use super::{Check, CheckResult, SourceFile, Violation, ensure_configured};

/// Lines searched for the wrapper marker and name tag, starting at the definition.
pub const WRAPPER_WINDOW: usize = 8;

static NAME_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bname\s*:").expect("Invalid regex"));

static DEFAULT_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+default\b|\bmodule\.exports\b|\bexports\.default\b|\bas\s+default\b")
        .expect("Invalid regex")
});

/// Exported definitions must be built through the wrapper and carry a name tag.
pub struct WrapperCheck;

impl WrapperCheck {
    pub const NAME: &'static str = "structural-wrapper";
}

impl Check for WrapperCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        if template.must_use_wrapper() {
            template
                .wrapper_marker()
                .is_none()
                .then_some("structure.wrapper_marker")
        } else if template.must_have_name_tag() {
            None
        } else {
            Some("structure.must_use_wrapper")
        }
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let marker = template
            .wrapper_marker()
            .filter(|_| template.must_use_wrapper());
        let want_tag = template.must_have_name_tag();

        let mut violations = Vec::new();
        for def in source.definitions() {
            let window = source.window(def.line, WRAPPER_WINDOW);
            if let Some(marker) = marker
                && !window.contains(marker)
            {
                violations.push(
                    Violation::at(def.line, format!("'{}' is not wrapped with '{marker}'", def.name))
                        .with_suggestion(format!("wrap the definition with {marker}...)")),
                );
            }
            if want_tag && !NAME_TAG.is_match(&window) {
                violations.push(
                    Violation::at(def.line, format!("'{}' has no name tag", def.name))
                        .with_suggestion(format!("add {{ name: '{}' }} to the wrapper options", def.name)),
                );
            }
        }
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Each required section title must appear in some comment line.
pub struct RequiredSectionsCheck;

impl RequiredSectionsCheck {
    pub const NAME: &'static str = "required-sections";
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

impl Check for RequiredSectionsCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        template
            .required_sections()
            .is_empty()
            .then_some("structure.required_sections")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let comments: Vec<String> = source
            .lines()
            .filter(|(_, text)| is_comment_line(text))
            .map(|(_, text)| text.to_lowercase())
            .collect();

        let violations = template
            .required_sections()
            .iter()
            .filter(|section| {
                let needle = section.to_lowercase();
                !comments.iter().any(|c| c.contains(&needle))
            })
            .map(|section| {
                Violation::unlocated(format!("missing required section '{section}'"))
                    .with_suggestion(format!("add a '// {section}' section comment"))
            })
            .collect();
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Modules export by name only.
pub struct ExportShapeCheck;

impl ExportShapeCheck {
    pub const NAME: &'static str = "export-shape";
}

impl Check for ExportShapeCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        (!template.named_exports_only()).then_some("structure.named_exports_only")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let violations = source
            .code_lines()
            .filter(|(_, code)| DEFAULT_EXPORT.is_match(code))
            .map(|(line, _)| {
                Violation::at(line, "default export").with_suggestion("use a named export")
            })
            .collect();
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
