use std::path::PathBuf;

use super::*;
use crate::i18n::Severity;

#[test]
fn empty_config_uses_defaults() {
    let config: ProjectConfig = toml::from_str("").unwrap();
    assert_eq!(config, ProjectConfig::default());
    assert_eq!(config.template_dir, PathBuf::from(DEFAULT_TEMPLATE_DIR));
    assert_eq!(config.gate, GatePolicy::FailFast);
    assert_eq!(config.i18n.reference_locale, "ko");
    assert!(!config.i18n.report_unused);
}

#[test]
fn template_path_joins_category_file() {
    let config = ProjectConfig::default();
    assert_eq!(
        config.template_path(Category::Hook),
        PathBuf::from(".convention-guard/templates/hook.toml")
    );
}

#[test]
fn targets_fall_back_to_category_default() {
    let config: ProjectConfig = toml::from_str("[targets]\nstore = \"app/state\"\n").unwrap();
    assert_eq!(
        config.targets.target_for(Category::Store),
        PathBuf::from("app/state")
    );
    assert_eq!(
        config.targets.target_for(Category::Hook),
        PathBuf::from("src/hooks")
    );
}

#[test]
fn gate_policy_parses_kebab_case() {
    let config: ProjectConfig = toml::from_str("gate = \"collect-all\"\n").unwrap();
    assert_eq!(config.gate, GatePolicy::CollectAll);
}

#[test]
fn i18n_section_overrides() {
    let config: ProjectConfig = toml::from_str(
        r#"
[i18n]
locales_dir = "public/locales"
reference_locale = "en"
locales = ["en", "ja"]
report_unused = true

[i18n.severity]
empty_value = "blocking"
"#,
    )
    .unwrap();
    assert_eq!(config.i18n.locales_dir, PathBuf::from("public/locales"));
    assert_eq!(config.i18n.reference_locale, "en");
    assert!(config.i18n.report_unused);
    assert_eq!(config.i18n.severity.empty_value, Severity::Blocking);
    assert_eq!(config.i18n.severity.key_mismatch, Severity::Blocking);
    // Unspecified fields keep their defaults
    assert_eq!(config.i18n.placeholders.len(), 4);
}

#[test]
fn ordered_locales_puts_reference_first() {
    let i18n = I18nConfig {
        reference_locale: "zh".to_string(),
        locales: vec!["ko".to_string(), "zh".to_string(), "en".to_string()],
        ..I18nConfig::default()
    };
    assert_eq!(i18n.ordered_locales(), vec!["zh", "ko", "en"]);
}
