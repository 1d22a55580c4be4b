use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Category;
use crate::gate::GatePolicy;
use crate::output::{ColorMode, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "convention-guard")]
#[command(author, version, about = "Check front-end modules against rule templates and keep locales consistent")]
#[command(long_about = "Checks store, hook, style and locale modules against declarative rule \
    templates, and compares locale bundles for key consistency.\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - Violations or blocking consistency findings\n  \
    2 - Configuration, template or target error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress report output and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Path to the project configuration file (default: .convention-guard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one category of files against its rule template
    Check(CheckArgs),

    /// Compare locale bundles and key usage
    I18n(I18nArgs),

    /// Write the project configuration and default rule templates
    Init(InitArgs),

    /// Rule template utilities
    Template(TemplateArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File category to check
    #[arg(value_enum)]
    pub category: Category,

    /// Directory or file to check (default: the category's target directory)
    pub target: Option<PathBuf>,

    /// Rule template to use instead of `<template_dir>/<category>.toml`
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Gate policy (overrides config)
    #[arg(long, value_enum)]
    pub gate: Option<GatePolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,
}

/// Locale selection shared by `i18n` and `i18n backfill`.
#[derive(Args, Debug, Default, Clone)]
pub struct LocaleArgs {
    /// Directory holding `<locale>.json` files (overrides config)
    pub locales_dir: Option<PathBuf>,

    /// Reference locale (overrides config)
    #[arg(long)]
    pub reference: Option<String>,

    /// Locales to compare, comma-separated (overrides config)
    #[arg(long, value_delimiter = ',')]
    pub locales: Option<Vec<String>>,
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true)]
pub struct I18nArgs {
    #[command(flatten)]
    pub locale: LocaleArgs,

    /// Source directories scanned for key usage (can be specified multiple times)
    #[arg(long = "source")]
    pub source: Vec<PathBuf>,

    /// Also report reference keys never referenced in source
    #[arg(long)]
    pub report_unused: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub action: Option<I18nAction>,
}

#[derive(Subcommand, Debug)]
pub enum I18nAction {
    /// Insert reference keys missing from the other locales
    Backfill(BackfillArgs),
}

#[derive(Args, Debug)]
pub struct BackfillArgs {
    #[command(flatten)]
    pub locale: LocaleArgs,

    /// Value written for every inserted key
    #[arg(long, default_value = "TODO")]
    pub value: String,

    /// Rewrite the locale files (default: list planned insertions only)
    #[arg(long)]
    pub write: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite existing configuration and templates
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// Load and validate a rule template
    Validate(TemplateTarget),

    /// Print the resolved check order and the template as TOML
    Show(TemplateTarget),
}

#[derive(Args, Debug)]
pub struct TemplateTarget {
    #[arg(value_enum)]
    pub category: Category,

    /// Template path (default: `<template_dir>/<category>.toml`)
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
