//! Locale data files flattened into per-module keyed bundles.
//!
//! A locale file `<dir>/<locale>.json` is a JSON object whose top-level keys
//! are modules. Everything below a module is flattened into dot-joined keys.
//! Top-level scalar entries belong to [`ROOT_MODULE`].

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{GuardError, Result};

/// Module of top-level scalar entries.
pub const ROOT_MODULE: &str = "";

/// Flattened keys and string values of one module in one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedBundle {
    pub locale: String,
    pub module: String,
    /// Every leaf key, in document order.
    pub keys: IndexSet<String>,
    /// String leaves only.
    pub values: IndexMap<String, String>,
    /// 1-based line of each key in the source file.
    pub lines: IndexMap<String, usize>,
}

impl KeyedBundle {
    #[must_use]
    pub fn empty(locale: &str, module: &str) -> Self {
        Self {
            locale: locale.to_string(),
            module: module.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn line_of(&self, key: &str) -> usize {
        self.lines.get(key).copied().unwrap_or(0)
    }
}

/// Module-qualified key as referenced from source code.
#[must_use]
pub fn full_key(module: &str, key: &str) -> String {
    if module.is_empty() {
        key.to_string()
    } else if key.is_empty() {
        module.to_string()
    } else {
        format!("{module}.{key}")
    }
}

/// One locale's data file.
#[derive(Debug, Clone)]
pub struct LocaleDocument {
    pub locale: String,
    pub path: PathBuf,
    /// `false` when the file does not exist; the document is then empty.
    pub exists: bool,
    pub modules: IndexMap<String, KeyedBundle>,
}

impl LocaleDocument {
    /// Load `<dir>/<locale>.json`. A missing file yields an empty document.
    ///
    /// # Errors
    /// Returns `FileRead` if the file exists but cannot be read and
    /// `JsonParse` if it is not valid JSON.
    pub fn load(dir: &Path, locale: &str) -> Result<Self> {
        let path = dir.join(format!("{locale}.json"));
        if !path.exists() {
            return Ok(Self {
                locale: locale.to_string(),
                path,
                exists: false,
                modules: IndexMap::new(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|source| GuardError::FileRead {
            path: path.clone(),
            source,
        })?;
        Self::parse(locale, &path, &content)
    }

    /// Parse locale data already read from `path`.
    ///
    /// # Errors
    /// Returns `JsonParse` for invalid JSON and `Config` when the root is not
    /// an object.
    pub fn parse(locale: &str, path: &Path, content: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(content).map_err(|source| GuardError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(root) = json else {
            return Err(GuardError::Config(format!(
                "root of locale file {} must be an object",
                path.display()
            )));
        };

        let line_index = build_line_index(content);
        let mut modules: IndexMap<String, KeyedBundle> = IndexMap::new();
        for (name, value) in &root {
            let (module, prefix) = if value.is_object() {
                (name.as_str(), String::new())
            } else {
                (ROOT_MODULE, name.clone())
            };
            let bundle = modules
                .entry(module.to_string())
                .or_insert_with(|| KeyedBundle::empty(locale, module));
            let ctx = FlattenContext {
                content,
                line_index: &line_index,
                module,
            };
            flatten(&ctx, value, prefix, bundle);
        }

        Ok(Self {
            locale: locale.to_string(),
            path: path.to_path_buf(),
            exists: true,
            modules,
        })
    }

    #[must_use]
    pub fn module(&self, name: &str) -> Option<&KeyedBundle> {
        self.modules.get(name)
    }

    /// All module-qualified keys of the document.
    #[must_use]
    pub fn full_keys(&self) -> IndexSet<String> {
        self.modules
            .values()
            .flat_map(|b| b.keys.iter().map(|k| full_key(&b.module, k)))
            .collect()
    }
}

struct FlattenContext<'a> {
    content: &'a str,
    line_index: &'a [usize],
    module: &'a str,
}

fn flatten(ctx: &FlattenContext<'_>, value: &Value, prefix: String, bundle: &mut KeyedBundle) {
    if let Value::Object(map) = value {
        for (key, val) in map {
            let next = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            flatten(ctx, val, next, bundle);
        }
        return;
    }

    let line = find_key_line(ctx.content, &full_key(ctx.module, &prefix), ctx.line_index);
    if let Value::String(s) = value {
        bundle.values.insert(prefix.clone(), s.clone());
    }
    bundle.lines.insert(prefix.clone(), line);
    bundle.keys.insert(prefix);
}

/// Byte offsets at which each line starts.
fn build_line_index(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Line of a dotted key path, following each segment in sequence so that a
/// leaf name shared by several modules resolves under the right parent.
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    let mut found_any = false;
    for part in key_path.split('.') {
        let pattern = format!("\"{part}\"");
        let remaining = &content[search_start..];
        let mut pos = 0;
        let mut found = false;
        while let Some(rel) = remaining[pos..].find(&pattern) {
            let after = pos + rel + pattern.len();
            if remaining[after..].trim_start().starts_with(':') {
                search_start += after;
                found = true;
                break;
            }
            pos += rel + 1;
        }
        if !found {
            break;
        }
        found_any = true;
    }

    if found_any {
        offset_to_line(line_index, search_start)
    } else {
        0
    }
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
