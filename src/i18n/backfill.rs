//! Insertion of reference keys missing from other locales.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{GuardError, Result};

use super::bundle::LocaleDocument;

/// Keys one locale lacks, as module-qualified dotted paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillPlan {
    pub locale: String,
    pub path: PathBuf,
    pub keys: Vec<String>,
}

impl BackfillPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Plan the keys `target` needs to match `reference`, in reference order.
#[must_use]
pub fn plan_backfill(reference: &LocaleDocument, target: &LocaleDocument) -> BackfillPlan {
    let present = target.full_keys();
    let keys = reference
        .full_keys()
        .into_iter()
        .filter(|key| !present.contains(key))
        .collect();
    BackfillPlan {
        locale: target.locale.clone(),
        path: target.path.clone(),
        keys,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The key already exists; nothing changed.
    Present,
    /// A parent segment holds a non-object value; nothing changed.
    Conflict,
}

/// Locale file editor that only ever adds keys.
pub struct LocaleWriter {
    path: PathBuf,
    data: Map<String, Value>,
}

impl LocaleWriter {
    /// Open an existing locale file, or start an empty one.
    ///
    /// # Errors
    /// Returns `FileRead`, `JsonParse`, or `Config` when the root is not an object.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| GuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            let value: Value =
                serde_json::from_str(&content).map_err(|source| GuardError::JsonParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            match value {
                Value::Object(map) => map,
                _ => {
                    return Err(GuardError::Config(format!(
                        "root of locale file {} must be an object",
                        path.display()
                    )));
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Insert `value` at a dotted key path, creating intermediate objects.
    pub fn insert_missing(&mut self, key: &str, value: &str) -> InsertOutcome {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(&mut self.data, &parts, value)
    }

    /// Pretty-printed document with 2-space indentation and a trailing newline.
    ///
    /// # Errors
    /// Returns `JsonSerialize` if serialization fails.
    pub fn render(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(&self.data)?;
        Ok(format!("{content}\n"))
    }

    /// Write the document back to its file.
    ///
    /// # Errors
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.render()?)?;
        Ok(())
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: &str) -> InsertOutcome {
    let Some((first, rest)) = path.split_first() else {
        return InsertOutcome::Present;
    };

    if rest.is_empty() {
        if root.contains_key(*first) {
            return InsertOutcome::Present;
        }
        root.insert((*first).to_string(), Value::String(value.to_string()));
        return InsertOutcome::Inserted;
    }

    let next = root
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    match next {
        Value::Object(inner) => insert_nested(inner, rest, value),
        _ => InsertOutcome::Conflict,
    }
}

#[cfg(test)]
#[path = "backfill_tests.rs"]
mod tests;
