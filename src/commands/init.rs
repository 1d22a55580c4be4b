use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, InitArgs};
use crate::config::presets::{PROJECT_CONFIG_TEMPLATE, preset_source};
use crate::config::{Category, DEFAULT_TEMPLATE_DIR, LOCAL_CONFIG_NAME};
use crate::error::{GuardError, Result};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::Diagnostics;

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    let diagnostics = Diagnostics::from_cli(cli);
    match run_init_impl(args, Path::new(".")) {
        Ok(written) => {
            if !cli.quiet {
                for path in written {
                    println!("Created {}", path.display());
                }
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            diagnostics.error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Files `init` writes under `root`, with their contents.
#[must_use]
pub fn init_files(root: &Path) -> Vec<(PathBuf, &'static str)> {
    let template_dir = root.join(DEFAULT_TEMPLATE_DIR);
    std::iter::once((root.join(LOCAL_CONFIG_NAME), PROJECT_CONFIG_TEMPLATE))
        .chain(
            Category::ALL
                .iter()
                .map(|c| (template_dir.join(c.template_file_name()), preset_source(*c))),
        )
        .collect()
}

/// Write the project config and the default templates under `root`.
///
/// Nothing is written when any target exists and `--force` is not given.
///
/// # Errors
/// Returns `Config` when a file exists without `--force`, or an I/O error.
pub fn run_init_impl(args: &InitArgs, root: &Path) -> Result<Vec<PathBuf>> {
    let files = init_files(root);

    if !args.force
        && let Some((existing, _)) = files.iter().find(|(path, _)| path.exists())
    {
        return Err(GuardError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            existing.display()
        )));
    }

    let mut written = Vec::with_capacity(files.len());
    for (path, content) in files {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
