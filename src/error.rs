use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rule template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Failed to parse rule template {}", path.display())]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid rule template: {0}")]
    TemplateInvalid(String),

    #[error("Check '{check}' requires template field '{field}'")]
    TemplateField { check: String, field: String },

    #[error("Target directory is not readable: {}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to parse JSON file {}", path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl GuardError {
    /// Short label used as the heading of error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::TemplateNotFound { .. }
            | Self::TemplateParse { .. }
            | Self::TemplateInvalid(_)
            | Self::TemplateField { .. } => "Template",
            Self::RootUnreadable { .. } => "Target",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "Pattern",
            Self::JsonParse { .. } => "Locale",
            Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
        }
    }

    /// Detail line shown under the message, usually the underlying cause.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::TemplateParse { source, .. } => Some(source.message().to_string()),
            Self::RootUnreadable { source, .. } | Self::FileRead { source, .. } => {
                Some(source.to_string())
            }
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            Self::JsonParse { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// Actionable hint for the user, when one exists.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TemplateNotFound { .. } => Some(
                "Run `convention-guard init` to write the default templates, or pass --template",
            ),
            Self::TemplateParse { .. } => {
                Some("Check the TOML syntax of the template file")
            }
            Self::TemplateInvalid(_) => {
                Some("Run `convention-guard template validate <category>` after fixing the template")
            }
            Self::TemplateField { .. } => Some(
                "Add the missing field to the template or remove the check from `checks`",
            ),
            Self::RootUnreadable { .. } => {
                Some("Pass an existing directory as TARGET or set [targets] in .convention-guard.toml")
            }
            Self::InvalidPattern { .. } => Some("Fix the glob syntax in `exclude`"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
