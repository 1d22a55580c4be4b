//! Cross-locale consistency analysis.

use std::path::PathBuf;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::Serialize;

use crate::config::KeyStyle;

use super::bundle::{KeyedBundle, LocaleDocument};
use super::script::{Script, allowed_scripts, foreign_char};

/// `{name}`, `{{name}}` and the argument of ICU `{name, plural, ...}`.
static INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([A-Za-z_$][\w$.\-]*)\s*[,}]").expect("Invalid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    KeyMismatch,
    MixedLanguage,
    EmptyValue,
    NamingConvention,
}

impl IssueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyMismatch => "key-mismatch",
            Self::MixedLanguage => "mixed-language",
            Self::EmptyValue => "empty-value",
            Self::NamingConvention => "naming-convention",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding about one key of one module in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyIssue {
    pub module: String,
    pub locale: String,
    pub kind: IssueKind,
    pub key: String,
    pub detail: String,
    /// File the finding refers to.
    pub path: PathBuf,
    /// 1-based line in `path`; 0 when the key is not in that file.
    pub line: usize,
}

/// Keys of the reference bundle absent from `bundle`.
#[must_use]
pub fn missing_in(reference: &KeyedBundle, bundle: &KeyedBundle) -> IndexSet<String> {
    reference.keys.difference(&bundle.keys).cloned().collect()
}

/// Keys of `bundle` absent from the reference bundle.
#[must_use]
pub fn extra_in(reference: &KeyedBundle, bundle: &KeyedBundle) -> IndexSet<String> {
    bundle.keys.difference(&reference.keys).cloned().collect()
}

/// Keys whose value contains a character from a script foreign to the
/// bundle's locale. Locales without a script profile yield nothing.
#[must_use]
pub fn mixed_language_in(bundle: &KeyedBundle) -> Vec<(String, char, Script)> {
    let Some(allowed) = allowed_scripts(&bundle.locale) else {
        return Vec::new();
    };
    bundle
        .values
        .iter()
        .filter_map(|(key, value)| {
            foreign_char(value, allowed).map(|(c, script)| (key.clone(), c, script))
        })
        .collect()
}

/// Keys whose value is blank or a placeholder token (case-insensitive).
#[must_use]
pub fn empty_or_placeholder_in(bundle: &KeyedBundle, placeholders: &[String]) -> Vec<String> {
    bundle
        .values
        .iter()
        .filter(|(_, value)| {
            let trimmed = value.trim();
            trimmed.is_empty() || placeholders.iter().any(|p| p.trim().eq_ignore_ascii_case(trimmed))
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Interpolation markers whose variable name is not camelCase, as
/// `(key, marker name)` pairs.
#[must_use]
pub fn non_camel_interpolation_in(bundle: &KeyedBundle) -> Vec<(String, String)> {
    bundle
        .values
        .iter()
        .flat_map(|(key, value)| {
            INTERPOLATION
                .captures_iter(value)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .filter(|name| !name.split('.').all(|segment| KeyStyle::Camel.matches(segment)))
                .map(|name| (key.clone(), name.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Compares every locale document against the reference locale.
pub struct ConsistencyChecker {
    reference: String,
    placeholders: Vec<String>,
}

impl ConsistencyChecker {
    #[must_use]
    pub fn new(reference: impl Into<String>, placeholders: Vec<String>) -> Self {
        Self {
            reference: reference.into(),
            placeholders,
        }
    }

    /// Findings for all documents, grouped by module and then by locale.
    ///
    /// Modules are visited in reference order, followed by modules that only
    /// other locales define. A module missing on one side is compared against
    /// an empty bundle. A missing reference document makes every key of the
    /// other locales extra.
    #[must_use]
    pub fn analyze(&self, documents: &[LocaleDocument]) -> Vec<ConsistencyIssue> {
        let reference = documents.iter().find(|d| d.locale == self.reference);

        let mut modules: IndexSet<&str> = IndexSet::new();
        if let Some(reference) = reference {
            modules.extend(reference.modules.keys().map(String::as_str));
        }
        for doc in documents {
            modules.extend(doc.modules.keys().map(String::as_str));
        }

        let mut issues = Vec::new();
        for module in modules {
            let empty_reference = KeyedBundle::empty(&self.reference, module);
            let reference_bundle = reference
                .and_then(|d| d.module(module))
                .unwrap_or(&empty_reference);

            for doc in documents {
                let empty = KeyedBundle::empty(&doc.locale, module);
                let bundle = doc.module(module).unwrap_or(&empty);
                self.analyze_bundle(doc, reference, reference_bundle, bundle, &mut issues);
            }
        }
        issues
    }

    fn analyze_bundle(
        &self,
        doc: &LocaleDocument,
        reference: Option<&LocaleDocument>,
        reference_bundle: &KeyedBundle,
        bundle: &KeyedBundle,
        issues: &mut Vec<ConsistencyIssue>,
    ) {
        let issue = |kind, key: String, detail: String, at: &KeyedBundle, path: &PathBuf| {
            ConsistencyIssue {
                module: bundle.module.clone(),
                locale: doc.locale.clone(),
                kind,
                line: at.line_of(&key),
                key,
                detail,
                path: path.clone(),
            }
        };

        if doc.locale != self.reference {
            let reference_path = reference.map_or_else(|| doc.path.clone(), |r| r.path.clone());
            for key in missing_in(reference_bundle, bundle) {
                let detail = format!("missing in {} (defined in {})", doc.locale, self.reference);
                issues.push(issue(
                    IssueKind::KeyMismatch,
                    key,
                    detail,
                    reference_bundle,
                    &reference_path,
                ));
            }
            for key in extra_in(reference_bundle, bundle) {
                let detail = format!("not defined in reference locale {}", self.reference);
                issues.push(issue(IssueKind::KeyMismatch, key, detail, bundle, &doc.path));
            }
        }

        for (key, c, script) in mixed_language_in(bundle) {
            let detail = format!("value contains {script} character '{c}'");
            issues.push(issue(IssueKind::MixedLanguage, key, detail, bundle, &doc.path));
        }
        for key in empty_or_placeholder_in(bundle, &self.placeholders) {
            let value = bundle.values.get(&key).map_or("", |v| v.trim());
            let detail = if value.is_empty() {
                "empty value".to_string()
            } else {
                format!("placeholder value '{value}'")
            };
            issues.push(issue(IssueKind::EmptyValue, key, detail, bundle, &doc.path));
        }
        for (key, name) in non_camel_interpolation_in(bundle) {
            let detail = format!("interpolation '{{{name}}}' is not camelCase");
            issues.push(issue(IssueKind::NamingConvention, key, detail, bundle, &doc.path));
        }
    }
}

#[cfg(test)]
#[path = "consistency_tests.rs"]
mod tests;
