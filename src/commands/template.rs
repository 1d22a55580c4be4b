use std::fmt::Write;
use std::path::PathBuf;

use crate::checker::CheckRegistry;
use crate::cli::{Cli, TemplateAction, TemplateArgs, TemplateTarget};
use crate::config::{FileConfigLoader, TemplateLoader};
use crate::error::Result;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::check::load_category_template;
use super::context::{Diagnostics, load_config, write_output};

#[must_use]
pub fn run_template(args: &TemplateArgs, cli: &Cli) -> i32 {
    let diagnostics = Diagnostics::from_cli(cli);
    let loader = FileConfigLoader::new();
    let result = resolve_path(&loader, cli, target(&args.action)).and_then(|path| {
        match &args.action {
            TemplateAction::Validate(t) => validate(&loader, &path, t),
            TemplateAction::Show(t) => show(&loader, &path, t),
        }
    });

    match result.and_then(|output| write_output(None, &output, cli.quiet)) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            diagnostics.error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

const fn target(action: &TemplateAction) -> &TemplateTarget {
    match action {
        TemplateAction::Validate(t) | TemplateAction::Show(t) => t,
    }
}

fn resolve_path(loader: &FileConfigLoader, cli: &Cli, target: &TemplateTarget) -> Result<PathBuf> {
    match &target.template {
        Some(path) => Ok(path.clone()),
        None => Ok(load_config(loader, cli.config.as_deref())?.template_path(target.category)),
    }
}

/// Load, validate and resolve the check list of a template.
///
/// # Errors
/// Returns the first template error found.
pub fn validate<L: TemplateLoader>(
    loader: &L,
    path: &std::path::Path,
    target: &TemplateTarget,
) -> Result<String> {
    let template = load_category_template(loader, path, target.category)?;
    let registry = CheckRegistry::for_template(&template, target.category)?;
    Ok(format!(
        "✓ {} is a valid {} template ({} checks)\n",
        path.display(),
        target.category,
        registry.len()
    ))
}

/// Resolved check order followed by the template as TOML.
///
/// # Errors
/// Returns a template error, or `TomlSerialize` if rendering fails.
pub fn show<L: TemplateLoader>(
    loader: &L,
    path: &std::path::Path,
    target: &TemplateTarget,
) -> Result<String> {
    let template = load_category_template(loader, path, target.category)?;
    let registry = CheckRegistry::for_template(&template, target.category)?;

    let mut output = String::new();
    writeln!(output, "# {}", path.display()).ok();
    writeln!(output, "# check order:").ok();
    for (i, name) in registry.names().iter().enumerate() {
        writeln!(output, "#   {}. {name}", i + 1).ok();
    }
    output.push('\n');
    output.push_str(&toml::to_string_pretty(&template)?);
    Ok(output)
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
