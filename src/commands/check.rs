use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::checker::{CheckRegistry, FileReport, SourceFile};
use crate::cli::{CheckArgs, Cli};
use crate::config::{Category, FileConfigLoader, RuleTemplate, TemplateLoader};
use crate::error::{GuardError, Result};
use crate::gate::{Gate, GateOutcome};
use crate::output::{ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::scanner::{CategoryFilter, DirectoryScanner, build_glob_set};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS};

use super::context::{Diagnostics, load_config, project_root, write_output};

/// Per-file result of the parallel phase.
enum FileOutcome {
    Checked(FileReport),
    /// Unreadable or not UTF-8; skipped with a warning.
    Skipped(PathBuf, String),
}

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    let diagnostics = Diagnostics::from_cli(cli);
    match run_check_impl(args, cli, &diagnostics) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            diagnostics.error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// # Errors
/// Returns an error for configuration, template or target problems.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli, diagnostics: &Diagnostics) -> Result<i32> {
    let loader = FileConfigLoader::new();
    let config = load_config(&loader, cli.config.as_deref())?;

    let template_path = args
        .template
        .clone()
        .unwrap_or_else(|| config.template_path(args.category));
    let template = load_category_template(&loader, &template_path, args.category)?;
    let registry = CheckRegistry::for_template(&template, args.category)?;
    diagnostics.note(1, &format!("template: {}", template_path.display()));
    diagnostics.note(1, &format!("checks: {}", registry.names().join(", ")));

    let target = args
        .target
        .clone()
        .unwrap_or_else(|| config.targets.target_for(args.category));
    let mut exclude = config.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());
    let scanner =
        DirectoryScanner::with_exclude(CategoryFilter::new(args.category), build_glob_set(&exclude)?);

    let mut walk = scanner.iter(&target)?;
    let files: Vec<PathBuf> = walk.by_ref().collect();
    diagnostics.report_skipped(&walk);
    diagnostics.note(1, &format!("{} {} files under {}", files.len(), args.category, target.display()));

    let reports = evaluate_files(&registry, &template, args.category, &files, diagnostics)?;
    let outcome = Gate::apply(args.gate.unwrap_or(config.gate), reports);

    let output = format_output(args.format, &outcome, cli.color, project_root())?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(if outcome.passed {
        EXIT_SUCCESS
    } else {
        EXIT_VIOLATIONS
    })
}

/// Load a template and make sure it is meant for `category`.
///
/// # Errors
/// Returns the loader's error, or `TemplateInvalid` when the template
/// declares a different category.
pub fn load_category_template<L: TemplateLoader>(
    loader: &L,
    path: &Path,
    category: Category,
) -> Result<RuleTemplate> {
    let template = loader.load_template(path)?;
    match template.category {
        Some(declared) if declared != category => Err(GuardError::TemplateInvalid(format!(
            "template {} is for category '{declared}', not '{category}'",
            path.display()
        ))),
        _ => Ok(template),
    }
}

/// Evaluate every file in parallel, then replay in enumeration order.
///
/// # Errors
/// Propagates the first template error in enumeration order.
pub(crate) fn evaluate_files(
    registry: &CheckRegistry,
    template: &RuleTemplate,
    category: Category,
    files: &[PathBuf],
    diagnostics: &Diagnostics,
) -> Result<Vec<FileReport>> {
    let outcomes: Vec<Result<FileOutcome>> = files
        .par_iter()
        .map(|path| match std::fs::read_to_string(path) {
            Ok(text) => {
                let source = SourceFile::new(path.clone(), category, text);
                registry.evaluate(template, &source).map(FileOutcome::Checked)
            }
            Err(e) => Ok(FileOutcome::Skipped(path.clone(), e.to_string())),
        })
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome? {
            FileOutcome::Checked(report) => reports.push(report),
            FileOutcome::Skipped(path, reason) => {
                diagnostics.warn(&format!("skipped unreadable file {}", path.display()), Some(&reason));
            }
        }
    }
    Ok(reports)
}

/// # Errors
/// Returns an error if serialization fails.
pub fn format_output(
    format: OutputFormat,
    outcome: &GateOutcome,
    color: ColorMode,
    project_root: Option<PathBuf>,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color)
            .with_project_root(project_root)
            .format(outcome),
        OutputFormat::Json => JsonFormatter::new()
            .with_project_root(project_root)
            .format(outcome),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
