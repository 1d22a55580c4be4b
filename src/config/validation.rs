//! Semantic validation of project configs and rule templates.
//!
//! Runs after parsing: catches values that deserialize fine but would make
//! the checks meaningless (unknown check names, zero thresholds, bad globs).

use std::collections::HashSet;

use crate::checker::{CANONICAL_ORDER, WrapperCheck};
use crate::{GuardError, Result};

use super::template::TEMPLATE_VERSION;
use super::{ProjectConfig, RuleTemplate};

/// Validates semantic correctness of a project configuration.
///
/// # Errors
/// Returns an error if an exclude glob is invalid or the i18n section is unusable.
pub fn validate_project_config(config: &ProjectConfig) -> Result<()> {
    for pattern in &config.exclude {
        globset::Glob::new(pattern).map_err(|e| GuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }

    if config.i18n.reference_locale.trim().is_empty() {
        return Err(GuardError::Config(
            "i18n.reference_locale must not be empty".to_string(),
        ));
    }

    if config.i18n.lookup_functions.iter().any(|f| f.trim().is_empty()) {
        return Err(GuardError::Config(
            "i18n.lookup_functions must not contain empty names".to_string(),
        ));
    }
    Ok(())
}

/// Validates semantic correctness of a rule template.
///
/// # Errors
/// Returns `TemplateInvalid` for an unsupported version, unknown or duplicated
/// check names, empty patterns, or zero depth limits, and `TemplateField` when
/// the wrapper is required without a marker.
pub fn validate_template(template: &RuleTemplate) -> Result<()> {
    if let Some(version) = &template.version
        && version != TEMPLATE_VERSION
    {
        return Err(GuardError::TemplateInvalid(format!(
            "unsupported template version '{version}', expected '{TEMPLATE_VERSION}'"
        )));
    }

    validate_check_list(&template.checks)?;

    if template.required_imports.iter().any(|s| s.is_empty()) {
        return Err(GuardError::TemplateInvalid(
            "required_imports must not contain empty strings".to_string(),
        ));
    }
    if template.forbidden_patterns().iter().any(String::is_empty) {
        return Err(GuardError::TemplateInvalid(
            "forbidden.patterns must not contain empty strings".to_string(),
        ));
    }

    if template.must_use_wrapper() && template.wrapper_marker().is_none_or(str::is_empty) {
        return Err(GuardError::TemplateField {
            check: WrapperCheck::NAME.to_string(),
            field: "structure.wrapper_marker".to_string(),
        });
    }

    for (field, value) in [
        ("code_style.max_nesting_depth", template.max_nesting_depth()),
        ("code_style.max_selector_depth", template.max_selector_depth()),
    ] {
        if value == Some(0) {
            return Err(GuardError::TemplateInvalid(format!(
                "{field} must be greater than 0"
            )));
        }
    }
    Ok(())
}

fn validate_check_list(checks: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in checks {
        if !CANONICAL_ORDER.contains(&name.as_str()) {
            return Err(GuardError::TemplateInvalid(format!(
                "unknown check '{name}'. Available checks: {}",
                CANONICAL_ORDER.join(", ")
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(GuardError::TemplateInvalid(format!(
                "check '{name}' is listed more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
