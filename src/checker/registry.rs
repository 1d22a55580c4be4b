use crate::config::{Category, RuleTemplate};
use crate::error::{GuardError, Result};

use super::{
    CANONICAL_ORDER, Check, CommentConventionCheck, ExportShapeCheck, FileReport,
    ForbiddenPatternsCheck, FunctionFormCheck, KeyStyleCheck, NamingCheck, NestingDepthCheck,
    RequiredImportsCheck, RequiredSectionsCheck, SelectorDepthCheck, SourceFile, WrapperCheck,
    ensure_configured,
};

/// Look up a check implementation by its stable name.
#[must_use]
pub fn check_by_name(name: &str) -> Option<Box<dyn Check>> {
    let check: Box<dyn Check> = match name {
        RequiredImportsCheck::NAME => Box::new(RequiredImportsCheck),
        NamingCheck::NAME => Box::new(NamingCheck),
        WrapperCheck::NAME => Box::new(WrapperCheck),
        RequiredSectionsCheck::NAME => Box::new(RequiredSectionsCheck),
        ForbiddenPatternsCheck::NAME => Box::new(ForbiddenPatternsCheck),
        ExportShapeCheck::NAME => Box::new(ExportShapeCheck),
        CommentConventionCheck::NAME => Box::new(CommentConventionCheck),
        FunctionFormCheck::NAME => Box::new(FunctionFormCheck),
        NestingDepthCheck::NAME => Box::new(NestingDepthCheck),
        SelectorDepthCheck::NAME => Box::new(SelectorDepthCheck),
        KeyStyleCheck::NAME => Box::new(KeyStyleCheck),
        _ => return None,
    };
    Some(check)
}

/// Ordered list of checks derived from one rule template.
///
/// The order is the template's `checks` list when present, otherwise the
/// canonical order restricted to the checks the template configures. Order
/// only affects reporting; checks never see each other's results.
pub struct CheckRegistry {
    category: Category,
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Build the check list for a template.
    ///
    /// # Errors
    /// Returns `TemplateInvalid` for an unknown check name or a template that
    /// configures no check at all, and `TemplateField` when an explicitly
    /// listed check is not configured by the template.
    pub fn for_template(template: &RuleTemplate, category: Category) -> Result<Self> {
        let checks = if template.checks.is_empty() {
            CANONICAL_ORDER
                .iter()
                .filter_map(|name| check_by_name(name))
                .filter(|check| check.applies(template))
                .collect()
        } else {
            let mut checks = Vec::with_capacity(template.checks.len());
            for name in &template.checks {
                let check = check_by_name(name)
                    .ok_or_else(|| GuardError::TemplateInvalid(format!("unknown check '{name}'")))?;
                ensure_configured(check.as_ref(), template)?;
                checks.push(check);
            }
            checks
        };

        if checks.is_empty() {
            return Err(GuardError::TemplateInvalid(
                "template configures no checks".to_string(),
            ));
        }
        Ok(Self { category, checks })
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check against one file, in registry order.
    ///
    /// # Errors
    /// Propagates a check's template error; never fails on findings.
    pub fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<FileReport> {
        let checks = self
            .checks
            .iter()
            .map(|check| check.evaluate(template, source))
            .collect::<Result<Vec<_>>>()?;
        Ok(FileReport::new(source.path().to_path_buf(), checks))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
