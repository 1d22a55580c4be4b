use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{Category, RuleTemplate};
use crate::error::Result;

use super::{Check, CheckResult, SourceFile, Violation, ensure_configured};

/// Object properties holding a function: `setName: (v) =>`, `load: async () =>`.
static ACTION_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*([A-Za-z_$][\w$]*)\s*\??\s*:\s*(?:async\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=>",
    )
    .expect("Invalid regex")
});

/// JSON object keys: `"memberList":`.
static JSON_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)"\s*:"#).expect("Invalid regex"));

/// Exported definitions must carry the configured prefix/suffix; store
/// actions must start with one of the configured action prefixes.
pub struct NamingCheck;

impl NamingCheck {
    pub const NAME: &'static str = "naming";

    fn definition_violations(template: &RuleTemplate, source: &SourceFile) -> Vec<Violation> {
        let prefix = template.naming_prefix();
        let suffix = template.naming_suffix();
        if prefix.is_none() && suffix.is_none() {
            return Vec::new();
        }

        source
            .definitions()
            .into_iter()
            .filter_map(|def| {
                let missing_prefix = prefix.filter(|p| !def.name.starts_with(p));
                let missing_suffix = suffix.filter(|s| !def.name.ends_with(s));
                let message = match (missing_prefix, missing_suffix) {
                    (None, None) => return None,
                    (Some(p), None) => format!("'{}' does not start with '{p}'", def.name),
                    (None, Some(s)) => format!("'{}' does not end with '{s}'", def.name),
                    (Some(p), Some(s)) => {
                        format!("'{}' does not start with '{p}' or end with '{s}'", def.name)
                    }
                };
                Some(
                    Violation::at(def.line, message)
                        .with_suggestion(suggest_name(&def.name, prefix, suffix)),
                )
            })
            .collect()
    }

    fn action_violations(template: &RuleTemplate, source: &SourceFile) -> Vec<Violation> {
        let prefixes = template.action_prefixes();
        if prefixes.is_empty() || source.category() != Category::Store {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        source
            .code_lines()
            .filter_map(|(line, code)| {
                let name = ACTION_PROPERTY.captures(code)?.get(1)?.as_str();
                if prefixes.iter().any(|p| name.starts_with(p.as_str())) {
                    return None;
                }
                if !seen.insert(name.to_string()) {
                    return None;
                }
                Some(
                    Violation::at(line, format!("action '{name}' has no allowed prefix"))
                        .with_suggestion(format!("start action names with one of: {}", prefixes.join(", "))),
                )
            })
            .collect()
    }
}

fn suggest_name(name: &str, prefix: Option<&str>, suffix: Option<&str>) -> String {
    let mut suggested = name.to_string();
    if let Some(p) = prefix
        && !suggested.starts_with(p)
    {
        suggested = format!("{p}{}", capitalize(&suggested));
    }
    if let Some(s) = suffix
        && !suggested.ends_with(s)
    {
        suggested.push_str(s);
    }
    format!("rename to '{suggested}'")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl Check for NamingCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        let configured = template.naming_prefix().is_some()
            || template.naming_suffix().is_some()
            || !template.action_prefixes().is_empty();
        (!configured).then_some("naming.prefix")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let mut violations = Self::definition_violations(template, source);
        violations.extend(Self::action_violations(template, source));
        violations.sort_by_key(|v| v.line);
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Locale bundle keys must follow the configured key style, segment by segment.
pub struct KeyStyleCheck;

impl KeyStyleCheck {
    pub const NAME: &'static str = "key-style";
}

impl Check for KeyStyleCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        template.key_style().is_none().then_some("naming.key_style")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let Some(style) = template.key_style() else {
            return Ok(CheckResult::pass(Self::NAME));
        };

        let violations = source
            .lines()
            .flat_map(|(line, text)| {
                JSON_KEY
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                    .filter(|key| key.split('.').any(|segment| !style.matches(segment)))
                    .map(move |key| {
                        Violation::at(line, format!("key '{key}' is not {style}"))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(CheckResult::new(Self::NAME, violations))
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
