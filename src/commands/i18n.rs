use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::cli::{BackfillArgs, Cli, I18nAction, I18nArgs, LocaleArgs};
use crate::config::{FileConfigLoader, I18nConfig};
use crate::error::{GuardError, Result};
use crate::i18n::{
    ConsistencyChecker, I18nReport, InsertOutcome, LocaleDocument, LocaleWriter, UsageScanner,
    plan_backfill, usage_findings,
};
use crate::output::{
    ColorMode, I18nFormatter, I18nJsonFormatter, I18nTextFormatter, OutputFormat, display_path,
};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS};

use super::context::{Diagnostics, load_config, project_root, write_output};

#[must_use]
pub fn run_i18n(args: &I18nArgs, cli: &Cli) -> i32 {
    let diagnostics = Diagnostics::from_cli(cli);
    let result = match &args.action {
        Some(I18nAction::Backfill(backfill)) => run_backfill_impl(backfill, cli, &diagnostics),
        None => run_i18n_impl(args, cli, &diagnostics),
    };
    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            diagnostics.error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Apply command-line locale selection over the `[i18n]` config section.
#[must_use]
pub fn apply_locale_overrides(mut config: I18nConfig, args: &LocaleArgs) -> I18nConfig {
    if let Some(dir) = &args.locales_dir {
        config.locales_dir.clone_from(dir);
    }
    if let Some(reference) = &args.reference {
        config.reference_locale.clone_from(reference);
    }
    if let Some(locales) = &args.locales {
        config.locales.clone_from(locales);
    }
    config
}

/// Load every compared locale, reference first.
///
/// # Errors
/// Returns `RootUnreadable` when the locale directory does not exist, and
/// the parse error of the first malformed locale file.
pub fn load_documents(config: &I18nConfig) -> Result<Vec<LocaleDocument>> {
    let dir = &config.locales_dir;
    if !dir.is_dir() {
        return Err(GuardError::RootUnreadable {
            path: dir.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "locale directory does not exist",
            ),
        });
    }
    config
        .ordered_locales()
        .iter()
        .map(|locale| LocaleDocument::load(dir, locale))
        .collect()
}

/// Build the full consistency report for one run.
///
/// # Errors
/// Returns an error for unreadable locale data or an unusable usage scanner.
pub fn build_report(
    config: &I18nConfig,
    sources: &[PathBuf],
    report_unused: bool,
    diagnostics: &Diagnostics,
) -> Result<I18nReport> {
    let documents = load_documents(config)?;
    for doc in documents.iter().filter(|d| !d.exists) {
        diagnostics.warn(
            &format!("locale file not found: {}", doc.path.display()),
            Some("every reference key is reported as missing"),
        );
    }

    let issues = ConsistencyChecker::new(&config.reference_locale, config.placeholders.clone())
        .analyze(&documents);

    let reference = documents
        .iter()
        .find(|d| d.locale == config.reference_locale && d.exists);
    let usage = match reference {
        Some(reference) if !sources.is_empty() => {
            let scanner = UsageScanner::new(&config.lookup_functions, &config.key_fields)?;
            let scan = scanner.scan(sources, Some(&config.locales_dir))?;
            for root in &scan.missing_roots {
                diagnostics.warn(&format!("source directory not found: {}", root.display()), None);
            }
            for file in &scan.unreadable {
                diagnostics.warn(&format!("skipped unreadable file {}", file.display()), None);
            }
            diagnostics.note(
                1,
                &format!(
                    "{} source files scanned, {} keys referenced, {} dynamic references skipped",
                    scan.files_scanned,
                    scan.references.len(),
                    scan.dynamic_count
                ),
            );
            usage_findings(&scan, &reference.full_keys(), &reference.path, report_unused)
        }
        _ => Vec::new(),
    };

    Ok(I18nReport {
        reference: config.reference_locale.clone(),
        locales: documents.iter().map(|d| d.locale.clone()).collect(),
        missing_files: documents
            .iter()
            .filter(|d| !d.exists)
            .map(|d| d.locale.clone())
            .collect(),
        issues,
        usage,
        policy: config.severity,
    })
}

/// # Errors
/// Returns an error for configuration or locale data problems.
pub fn run_i18n_impl(args: &I18nArgs, cli: &Cli, diagnostics: &Diagnostics) -> Result<i32> {
    let loader = FileConfigLoader::new();
    let config = load_config(&loader, cli.config.as_deref())?;
    let settings = apply_locale_overrides(config.i18n, &args.locale);

    let sources = if args.source.is_empty() {
        settings.source_dirs.clone()
    } else {
        args.source.clone()
    };
    let report_unused = args.report_unused || settings.report_unused;
    diagnostics.note(
        1,
        &format!(
            "locales: {} (reference {})",
            settings.ordered_locales().join(", "),
            settings.reference_locale
        ),
    );

    let report = build_report(&settings, &sources, report_unused, diagnostics)?;
    let output = format_report(args.format, &report, cli.color, project_root())?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(if report.passed() {
        EXIT_SUCCESS
    } else {
        EXIT_VIOLATIONS
    })
}

/// # Errors
/// Returns an error if serialization fails.
pub fn format_report(
    format: OutputFormat,
    report: &I18nReport,
    color: ColorMode,
    project_root: Option<PathBuf>,
) -> Result<String> {
    match format {
        OutputFormat::Text => I18nTextFormatter::new(color)
            .with_project_root(project_root)
            .format(report),
        OutputFormat::Json => I18nJsonFormatter.format(report),
    }
}

/// Plan, and with `--write` apply, insertion of missing reference keys.
///
/// # Errors
/// Returns an error when the reference locale file is missing, a locale
/// file is malformed, or a file cannot be written.
pub fn run_backfill_impl(args: &BackfillArgs, cli: &Cli, diagnostics: &Diagnostics) -> Result<i32> {
    let loader = FileConfigLoader::new();
    let config = load_config(&loader, cli.config.as_deref())?;
    let settings = apply_locale_overrides(config.i18n, &args.locale);

    let summary = backfill(&settings, &args.value, args.write, diagnostics)?;
    write_output(None, &summary, cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

/// Backfill every non-reference locale; returns the printed summary.
///
/// # Errors
/// See [`run_backfill_impl`].
pub fn backfill(
    settings: &I18nConfig,
    value: &str,
    write: bool,
    diagnostics: &Diagnostics,
) -> Result<String> {
    let documents = load_documents(settings)?;
    let Some(reference) = documents
        .iter()
        .find(|d| d.locale == settings.reference_locale && d.exists)
    else {
        return Err(GuardError::Config(format!(
            "reference locale file not found: {}",
            settings
                .locales_dir
                .join(format!("{}.json", settings.reference_locale))
                .display()
        )));
    };

    let root = project_root();
    let mut output = String::new();
    let mut total = 0;
    let mut inserted = 0;
    for target in documents.iter().filter(|d| d.locale != reference.locale) {
        let plan = plan_backfill(reference, target);
        if plan.is_empty() {
            continue;
        }
        let path = display_path(&plan.path, root.as_deref());
        writeln!(output, "{path} ({}):", plan.locale).ok();
        for key in &plan.keys {
            writeln!(output, "  + {key}").ok();
        }
        total += plan.keys.len();

        if write {
            inserted += write_plan(&plan.path, &plan.keys, value, diagnostics)?;
        }
    }

    if total == 0 {
        writeln!(output, "✓ No missing keys").ok();
    } else if write {
        writeln!(output, "Inserted {inserted} keys with value '{value}'").ok();
        if inserted < total {
            writeln!(output, "{} keys skipped (see warnings)", total - inserted).ok();
        }
    } else {
        writeln!(output, "{total} keys missing (dry run, pass --write to insert)").ok();
    }
    Ok(output)
}

/// Insert `keys` into one locale file; returns how many were inserted.
fn write_plan(
    path: &Path,
    keys: &[String],
    value: &str,
    diagnostics: &Diagnostics,
) -> Result<usize> {
    let mut writer = LocaleWriter::open_or_create(path)?;
    let mut inserted = 0;
    for key in keys {
        match writer.insert_missing(key, value) {
            InsertOutcome::Inserted => inserted += 1,
            InsertOutcome::Present => {}
            InsertOutcome::Conflict => diagnostics.warn(
                &format!("cannot insert '{key}' into {}", path.display()),
                Some("a parent key holds a value, not an object"),
            ),
        }
    }
    writer.save()?;
    Ok(inserted)
}

#[cfg(test)]
#[path = "i18n_tests.rs"]
mod tests;
