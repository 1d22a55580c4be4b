use serde::{Deserialize, Serialize};

/// Supported rule template version.
pub const TEMPLATE_VERSION: &str = "1";

/// Module category a template and a file selection apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// State-store modules
    Store,
    /// UI-logic (hook) modules
    Hook,
    /// Stylesheet modules
    Style,
    /// Localization bundles
    Locale,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Store, Self::Hook, Self::Style, Self::Locale];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Hook => "hook",
            Self::Style => "style",
            Self::Locale => "locale",
        }
    }

    /// Conventional target directory used when no TARGET is given.
    #[must_use]
    pub const fn default_target(self) -> &'static str {
        match self {
            Self::Store => "src/stores",
            Self::Hook => "src/hooks",
            Self::Style => "src/styles",
            Self::Locale => "src/locales",
        }
    }

    /// File name of the category template inside the template directory.
    #[must_use]
    pub fn template_file_name(self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of the conventions one module category must follow.
///
/// Loaded once per run and shared read-only by every check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Explicit check order. Empty means the canonical order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<String>,

    /// Substrings that must appear somewhere in every file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_imports: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingRules>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureRules>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<ForbiddenRules>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_style: Option<CodeStyleRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamingRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Allowed name prefixes for store actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_prefixes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_style: Option<KeyStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStyle {
    #[serde(rename = "camelCase")]
    Camel,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "kebab-case")]
    Kebab,
    #[serde(rename = "PascalCase")]
    Pascal,
}

impl KeyStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Camel => "camelCase",
            Self::Snake => "snake_case",
            Self::Kebab => "kebab-case",
            Self::Pascal => "PascalCase",
        }
    }

    /// Whether a single identifier (one key segment) follows this style.
    #[must_use]
    pub fn matches(self, ident: &str) -> bool {
        let mut chars = ident.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let rest = chars.as_str();
        match self {
            Self::Camel => {
                first.is_ascii_lowercase() && rest.chars().all(|c| c.is_ascii_alphanumeric())
            }
            Self::Pascal => {
                first.is_ascii_uppercase() && rest.chars().all(|c| c.is_ascii_alphanumeric())
            }
            Self::Snake => Self::is_delimited(first, rest, '_'),
            Self::Kebab => Self::is_delimited(first, rest, '-'),
        }
    }

    fn is_delimited(first: char, rest: &str, sep: char) -> bool {
        first.is_ascii_lowercase()
            && !rest.ends_with(sep)
            && !rest.contains(&format!("{sep}{sep}"))
            && rest
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == sep)
    }
}

impl std::fmt::Display for KeyStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructureRules {
    /// Section names that must appear in a comment line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_sections: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_use_wrapper: Option<bool>,

    /// Marker substring identifying the required wrapper call, e.g. `devtools(`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_marker: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_have_name_tag: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_exports_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForbiddenRules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,

    /// Layer directory name that must never appear in an import path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallowed_imports_from_layer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeStyleRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_line_comment_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_section_comment: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_declarative_function_form: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nesting_depth: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selector_depth: Option<usize>,
}

impl RuleTemplate {
    #[must_use]
    pub fn naming_prefix(&self) -> Option<&str> {
        self.naming.as_ref().and_then(|n| n.prefix.as_deref())
    }

    #[must_use]
    pub fn naming_suffix(&self) -> Option<&str> {
        self.naming.as_ref().and_then(|n| n.suffix.as_deref())
    }

    #[must_use]
    pub fn action_prefixes(&self) -> &[String] {
        self.naming
            .as_ref()
            .map_or(&[], |n| n.action_prefixes.as_slice())
    }

    #[must_use]
    pub fn key_style(&self) -> Option<KeyStyle> {
        self.naming.as_ref().and_then(|n| n.key_style)
    }

    #[must_use]
    pub fn required_sections(&self) -> &[String] {
        self.structure
            .as_ref()
            .map_or(&[], |s| s.required_sections.as_slice())
    }

    #[must_use]
    pub fn must_use_wrapper(&self) -> bool {
        self.structure
            .as_ref()
            .and_then(|s| s.must_use_wrapper)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn must_have_name_tag(&self) -> bool {
        self.structure
            .as_ref()
            .and_then(|s| s.must_have_name_tag)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn wrapper_marker(&self) -> Option<&str> {
        self.structure
            .as_ref()
            .and_then(|s| s.wrapper_marker.as_deref())
    }

    #[must_use]
    pub fn named_exports_only(&self) -> bool {
        self.structure
            .as_ref()
            .and_then(|s| s.named_exports_only)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn forbidden_patterns(&self) -> &[String] {
        self.forbidden.as_ref().map_or(&[], |f| f.patterns.as_slice())
    }

    #[must_use]
    pub fn disallowed_layer(&self) -> Option<&str> {
        self.forbidden
            .as_ref()
            .and_then(|f| f.disallowed_imports_from_layer.as_deref())
    }

    fn style_flag(&self, get: impl Fn(&CodeStyleRules) -> Option<bool>) -> bool {
        self.code_style.as_ref().and_then(get).unwrap_or(false)
    }

    #[must_use]
    pub fn single_line_comment_only(&self) -> bool {
        self.style_flag(|s| s.single_line_comment_only)
    }

    #[must_use]
    pub fn require_section_comment(&self) -> bool {
        self.style_flag(|s| s.require_section_comment)
    }

    #[must_use]
    pub fn prefer_declarative_function_form(&self) -> bool {
        self.style_flag(|s| s.prefer_declarative_function_form)
    }

    #[must_use]
    pub fn max_nesting_depth(&self) -> Option<usize> {
        self.code_style.as_ref().and_then(|s| s.max_nesting_depth)
    }

    #[must_use]
    pub fn max_selector_depth(&self) -> Option<usize> {
        self.code_style.as_ref().and_then(|s| s.max_selector_depth)
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
