use crate::error::{GuardError, Result};

use super::{Category, RuleTemplate};

/// Built-in template text for a category, as written by `init`.
#[must_use]
pub const fn preset_source(category: Category) -> &'static str {
    match category {
        Category::Store => PRESET_STORE,
        Category::Hook => PRESET_HOOK,
        Category::Style => PRESET_STYLE,
        Category::Locale => PRESET_LOCALE,
    }
}

/// Parse the built-in template for a category.
///
/// # Errors
/// Returns an error if the embedded preset fails to parse.
pub fn load_preset(category: Category) -> Result<RuleTemplate> {
    toml::from_str(preset_source(category)).map_err(|e| {
        GuardError::TemplateInvalid(format!("failed to parse built-in '{category}' preset: {e}"))
    })
}

const PRESET_STORE: &str = r#"# convention-guard rule template: state-store modules
version = "1"
category = "store"

checks = [
    "required-imports",
    "naming",
    "structural-wrapper",
    "required-sections",
    "forbidden-patterns",
    "export-shape",
    "comment-convention",
]

required_imports = ["zustand"]

[naming]
prefix = "use"
suffix = "Store"
action_prefixes = ["set", "fetch", "reset", "add", "remove", "update", "toggle", "clear"]

[structure]
required_sections = ["State", "Actions"]
must_use_wrapper = true
wrapper_marker = "devtools("
must_have_name_tag = true
named_exports_only = true

[forbidden]
patterns = ["console.log", "debugger"]
disallowed_imports_from_layer = "components"

[code_style]
single_line_comment_only = true
require_section_comment = true
"#;

const PRESET_HOOK: &str = r#"# convention-guard rule template: UI-logic (hook) modules
version = "1"
category = "hook"

checks = [
    "naming",
    "forbidden-patterns",
    "export-shape",
    "function-form",
    "comment-convention",
    "nesting-depth",
]

[naming]
prefix = "use"

[structure]
named_exports_only = true

[forbidden]
patterns = ["console.log", "debugger"]
disallowed_imports_from_layer = "pages"

[code_style]
single_line_comment_only = true
prefer_declarative_function_form = true
max_nesting_depth = 4
"#;

const PRESET_STYLE: &str = r#"# convention-guard rule template: stylesheet modules
version = "1"
category = "style"

checks = ["forbidden-patterns", "comment-convention", "selector-depth", "nesting-depth"]

[forbidden]
patterns = ["!important"]

[code_style]
single_line_comment_only = true
max_selector_depth = 3
max_nesting_depth = 3
"#;

const PRESET_LOCALE: &str = r#"# convention-guard rule template: localization bundles
version = "1"
category = "locale"

checks = ["key-style", "forbidden-patterns"]

[naming]
key_style = "camelCase"

[forbidden]
patterns = ["TODO"]
"#;

/// Default project configuration written by `init`.
pub const PROJECT_CONFIG_TEMPLATE: &str = r#"# convention-guard configuration file

# Directory holding <category>.toml rule templates
template_dir = ".convention-guard/templates"

# fail-fast: stop at the first failing check; collect-all: report everything
gate = "fail-fast"

# Glob patterns excluded from every scan
# exclude = ["**/__generated__/**"]

# Default target directories per category
# [targets]
# store = "src/stores"
# hook = "src/hooks"
# style = "src/styles"
# locale = "src/locales"

[i18n]
locales_dir = "src/locales"
reference_locale = "ko"
locales = ["ko", "en", "zh"]
source_dirs = ["src"]
placeholders = ["TODO", "TBD", "...", "FIXME"]
lookup_functions = ["t", "i18n.t", "$t"]
key_fields = ["i18nKey", "labelKey", "titleKey"]
report_unused = false

# Which consistency findings fail the run (blocking) or are only reported (advisory)
# [i18n.severity]
# key_mismatch = "blocking"
# mixed_language = "blocking"
# empty_value = "advisory"
# naming_convention = "advisory"
# undefined_key = "blocking"
"#;

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
