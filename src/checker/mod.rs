//! Pattern check engine.
//!
//! Each check is an independent unit bound to one template field. A
//! [`CheckRegistry`] turns a rule template into an ordered list of checks and
//! evaluates them against one [`SourceFile`] at a time.

mod naming;
mod patterns;
mod registry;
mod result;
mod source;
mod structure;
mod style;

pub use naming::{KeyStyleCheck, NamingCheck};
pub use patterns::{ForbiddenPatternsCheck, RequiredImportsCheck};
pub use registry::{CheckRegistry, check_by_name};
pub use result::{CheckResult, FileReport, Violation};
pub use source::{Definition, SourceFile};
pub use structure::{ExportShapeCheck, RequiredSectionsCheck, WrapperCheck};
pub use style::{CommentConventionCheck, FunctionFormCheck, NestingDepthCheck, SelectorDepthCheck};

use crate::config::RuleTemplate;
use crate::error::{GuardError, Result};

/// Every check name, in the order used when a template does not list its own.
pub const CANONICAL_ORDER: [&str; 11] = [
    RequiredImportsCheck::NAME,
    NamingCheck::NAME,
    WrapperCheck::NAME,
    RequiredSectionsCheck::NAME,
    ForbiddenPatternsCheck::NAME,
    ExportShapeCheck::NAME,
    CommentConventionCheck::NAME,
    FunctionFormCheck::NAME,
    NestingDepthCheck::NAME,
    SelectorDepthCheck::NAME,
    KeyStyleCheck::NAME,
];

/// A named, pure evaluation unit.
pub trait Check: Send + Sync {
    /// Stable name used in templates and reports.
    fn name(&self) -> &'static str;

    /// The template field this check needs, when the template lacks it.
    ///
    /// `None` means the check is fully configured.
    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str>;

    /// Evaluate the check against one file.
    ///
    /// Non-compliance is reported as violations; only a template that lacks
    /// the check's configuration produces an error.
    ///
    /// # Errors
    /// Returns `TemplateField` when the template does not configure this check.
    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult>;

    fn applies(&self, template: &RuleTemplate) -> bool {
        self.missing_field(template).is_none()
    }
}

/// Fail with `TemplateField` unless `check` is configured by `template`.
///
/// # Errors
/// Returns `TemplateField` naming the missing field.
pub fn ensure_configured(check: &dyn Check, template: &RuleTemplate) -> Result<()> {
    match check.missing_field(template) {
        None => Ok(()),
        Some(field) => Err(GuardError::TemplateField {
            check: check.name().to_string(),
            field: field.to_string(),
        }),
    }
}
