use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gate::GatePolicy;
use crate::i18n::SeverityPolicy;

use super::Category;

/// Default location of the per-category rule templates.
pub const DEFAULT_TEMPLATE_DIR: &str = ".convention-guard/templates";

/// Project-wide settings loaded from `.convention-guard.toml`.
///
/// Every field has a default, so an absent config file is equivalent to an
/// empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Directory holding `<category>.toml` templates.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Gate policy applied when `--gate` is not given.
    #[serde(default)]
    pub gate: GatePolicy,

    /// Glob patterns excluded from every scan.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub i18n: I18nConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            gate: GatePolicy::default(),
            exclude: Vec::new(),
            targets: TargetsConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Template path for a category inside the configured template directory.
    #[must_use]
    pub fn template_path(&self, category: Category) -> PathBuf {
        self.template_dir.join(category.template_file_name())
    }
}

/// Per-category target directory overrides `[targets]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<PathBuf>,
}

impl TargetsConfig {
    #[must_use]
    pub fn target_for(&self, category: Category) -> PathBuf {
        let configured = match category {
            Category::Store => self.store.as_ref(),
            Category::Hook => self.hook.as_ref(),
            Category::Style => self.style.as_ref(),
            Category::Locale => self.locale.as_ref(),
        };
        configured
            .cloned()
            .unwrap_or_else(|| PathBuf::from(category.default_target()))
    }
}

/// Localization consistency settings `[i18n]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct I18nConfig {
    #[serde(default = "default_locales_dir")]
    pub locales_dir: PathBuf,

    /// Locale whose key set every other locale is compared against.
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,

    #[serde(default = "default_locales")]
    pub locales: Vec<String>,

    /// Directories scanned for key usage.
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<PathBuf>,

    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,

    /// Lookup call names whose first literal argument is a key.
    #[serde(default = "default_lookup_functions")]
    pub lookup_functions: Vec<String>,

    /// Option field names whose literal value is a key.
    #[serde(default = "default_key_fields")]
    pub key_fields: Vec<String>,

    #[serde(default)]
    pub report_unused: bool,

    #[serde(default)]
    pub severity: SeverityPolicy,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales_dir: default_locales_dir(),
            reference_locale: default_reference_locale(),
            locales: default_locales(),
            source_dirs: default_source_dirs(),
            placeholders: default_placeholders(),
            lookup_functions: default_lookup_functions(),
            key_fields: default_key_fields(),
            report_unused: false,
            severity: SeverityPolicy::default(),
        }
    }
}

impl I18nConfig {
    /// Compared locales with the reference locale first and no duplicates.
    #[must_use]
    pub fn ordered_locales(&self) -> Vec<String> {
        let mut ordered = vec![self.reference_locale.clone()];
        for locale in &self.locales {
            if !ordered.contains(locale) {
                ordered.push(locale.clone());
            }
        }
        ordered
    }
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_DIR)
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from(Category::Locale.default_target())
}

fn default_reference_locale() -> String {
    "ko".to_string()
}

fn default_locales() -> Vec<String> {
    ["ko", "en", "zh"].map(String::from).to_vec()
}

fn default_source_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}

fn default_placeholders() -> Vec<String> {
    ["TODO", "TBD", "...", "FIXME"].map(String::from).to_vec()
}

fn default_lookup_functions() -> Vec<String> {
    ["t", "i18n.t", "$t"].map(String::from).to_vec()
}

fn default_key_fields() -> Vec<String> {
    ["i18nKey", "labelKey", "titleKey"].map(String::from).to_vec()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
