use std::path::{Path, PathBuf};

use crate::error::{GuardError, Result};

use super::validation::{validate_project_config, validate_template};
use super::{ProjectConfig, RuleTemplate};

/// Name of the project config file looked up in the working directory.
pub const LOCAL_CONFIG_NAME: &str = ".convention-guard.toml";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Trait for loading the project configuration.
pub trait ConfigLoader {
    /// Load `.convention-guard.toml` from the working directory, falling back
    /// to defaults when it does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load(&self) -> Result<ProjectConfig>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or malformed.
    fn load_from_path(&self, path: &Path) -> Result<ProjectConfig>;
}

/// Trait for loading rule templates.
pub trait TemplateLoader {
    /// Load and validate the rule template at `path`.
    ///
    /// # Errors
    /// Returns `TemplateNotFound`, `TemplateParse` or `TemplateInvalid`.
    fn load_template(&self, path: &Path) -> Result<RuleTemplate>;
}

/// Loads configuration and templates from the filesystem.
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn parse_config(&self, path: &Path) -> Result<ProjectConfig> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| GuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config: ProjectConfig = toml::from_str(&content)?;
        validate_project_config(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<ProjectConfig> {
        let path = self.fs.current_dir()?.join(LOCAL_CONFIG_NAME);
        if !self.fs.exists(&path) {
            return Ok(ProjectConfig::default());
        }
        self.parse_config(&path)
    }

    fn load_from_path(&self, path: &Path) -> Result<ProjectConfig> {
        if !self.fs.exists(path) {
            return Err(GuardError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        self.parse_config(path)
    }
}

impl<F: FileSystem> TemplateLoader for FileConfigLoader<F> {
    fn load_template(&self, path: &Path) -> Result<RuleTemplate> {
        if !self.fs.exists(path) {
            return Err(GuardError::TemplateNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| GuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let template: RuleTemplate =
            toml::from_str(&content).map_err(|source| GuardError::TemplateParse {
                path: path.to_path_buf(),
                source,
            })?;
        validate_template(&template)?;
        Ok(template)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
