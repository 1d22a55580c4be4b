//! Literal key references in application source.
//!
//! Keys are extracted from direct calls to lookup functions (`t('a.b')`) and
//! from named option fields (`i18nKey: 'a.b'`, `i18nKey="a.b"`). Keys built by
//! concatenation or template interpolation cannot be resolved from text and
//! are skipped; their static prefix is remembered so that the keys they may
//! reach are not reported as unused.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::Serialize;

use crate::error::{GuardError, Result};
use crate::scanner::{DirectoryScanner, FileFilter};

/// Extensions of files scanned for key usage.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "vue"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    /// Referenced in source, absent from the reference locale.
    Undefined,
    /// Defined in the reference locale, never referenced.
    Unused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageFinding {
    pub key: String,
    pub kind: UsageKind,
    pub file: PathBuf,
    /// 1-based line; 0 when unknown.
    pub line: usize,
}

/// First place a key is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    pub file: PathBuf,
    pub line: usize,
}

/// Result of scanning the source tree.
#[derive(Debug, Clone, Default)]
pub struct UsageScan {
    /// Literal keys with their first reference, in discovery order.
    pub references: IndexMap<String, KeyReference>,
    /// Static prefixes of dynamically built keys.
    pub dynamic_prefixes: IndexSet<String>,
    /// Number of dynamic references skipped.
    pub dynamic_count: usize,
    pub files_scanned: usize,
    /// Files that could not be read as UTF-8 text.
    pub unreadable: Vec<PathBuf>,
    /// Source roots that do not exist.
    pub missing_roots: Vec<PathBuf>,
}

/// Selects script sources outside the locale data directory.
struct SourceFilter {
    skip_dir: Option<PathBuf>,
}

impl FileFilter for SourceFilter {
    fn should_include(&self, path: &Path) -> bool {
        let wanted = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        wanted && !self.skip_dir.as_ref().is_some_and(|dir| path.starts_with(dir))
    }
}

/// A literal found by one of the extraction patterns.
struct Literal<'a> {
    start: usize,
    text: &'a str,
    template: bool,
    followed_by_plus: bool,
}

pub struct UsageScanner {
    call: Regex,
    field: Option<Regex>,
}

/// Alternation matching one string literal, capturing its content in the
/// group for its quote style.
const LITERAL: &str = r#"(?:'([^'\\\n]*)'|"([^"\\\n]*)"|`([^`\\]*)`)"#;

impl UsageScanner {
    /// Build a scanner for the given lookup function names and key fields.
    ///
    /// # Errors
    /// Returns `Config` when no lookup function is configured.
    pub fn new(lookup_functions: &[String], key_fields: &[String]) -> Result<Self> {
        if lookup_functions.is_empty() {
            return Err(GuardError::Config(
                "i18n.lookup_functions must name at least one function".to_string(),
            ));
        }
        let mut functions: Vec<&String> = lookup_functions.iter().collect();
        // longest first so `i18n.t` wins over `t`
        functions.sort_by_key(|f| std::cmp::Reverse(f.len()));
        let functions = functions
            .iter()
            .map(|f| regex::escape(f))
            .collect::<Vec<_>>()
            .join("|");
        let call = format!(r"(?:^|[^\w$.])(?:{functions})\s*\(\s*{LITERAL}");

        let compile = |pattern: String| {
            Regex::new(&pattern)
                .map_err(|e| GuardError::Config(format!("invalid lookup pattern: {e}")))
        };
        let field = if key_fields.is_empty() {
            None
        } else {
            let fields = key_fields
                .iter()
                .map(|f| regex::escape(f))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(format!(
                r"\b(?:{fields})\s*[:=]\s*\{{?\s*{LITERAL}"
            ))?)
        };

        Ok(Self {
            call: compile(call)?,
            field,
        })
    }

    /// Scan every source root, skipping `skip_dir` (the locale data).
    ///
    /// # Errors
    /// Returns an error only for invalid scanner configuration; unreadable
    /// files and missing roots are recorded in the result.
    pub fn scan(&self, roots: &[PathBuf], skip_dir: Option<&Path>) -> Result<UsageScan> {
        let filter = SourceFilter {
            skip_dir: skip_dir.and_then(|d| dunce::canonicalize(d).ok()),
        };
        let scanner = DirectoryScanner::new(filter);
        let mut scan = UsageScan::default();

        for root in roots {
            let files = match scanner.iter(root) {
                Ok(iter) => iter,
                Err(GuardError::RootUnreadable { .. }) => {
                    scan.missing_roots.push(root.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };
            for file in files {
                match std::fs::read_to_string(&file) {
                    Ok(text) => {
                        scan.files_scanned += 1;
                        self.scan_text(&file, &text, &mut scan);
                    }
                    Err(_) => scan.unreadable.push(file),
                }
            }
        }
        Ok(scan)
    }

    /// Extract key references from one file's text into `scan`.
    pub fn scan_text(&self, file: &Path, text: &str, scan: &mut UsageScan) {
        for (idx, line) in text.lines().enumerate() {
            for literal in self.literals(line) {
                let dynamic = literal.followed_by_plus
                    || (literal.template && literal.text.contains("${"));
                if dynamic {
                    scan.dynamic_count += 1;
                    let prefix = literal.text.split("${").next().unwrap_or_default();
                    if !prefix.is_empty() {
                        scan.dynamic_prefixes.insert(prefix.to_string());
                    }
                    continue;
                }
                if literal.text.is_empty() {
                    continue;
                }
                scan.references
                    .entry(literal.text.to_string())
                    .or_insert_with(|| KeyReference {
                        file: file.to_path_buf(),
                        line: idx + 1,
                    });
            }
        }
    }

    /// Literals on one line, left to right.
    fn literals<'a>(&self, line: &'a str) -> Vec<Literal<'a>> {
        let mut found: Vec<Literal<'a>> = std::iter::once(&self.call)
            .chain(self.field.as_ref())
            .flat_map(|re| re.captures_iter(line))
            .filter_map(|caps| {
                let end = caps.get(0)?.end();
                let (group, m) = (1..=3).find_map(|g| caps.get(g).map(|m| (g, m)))?;
                Some(Literal {
                    start: m.start(),
                    text: m.as_str(),
                    template: group == 3,
                    followed_by_plus: line[end..].trim_start().starts_with('+'),
                })
            })
            .collect();
        found.sort_by_key(|l| l.start);
        found
    }
}

/// Compare scanned references against the reference locale's keys.
///
/// Undefined keys come first in discovery order, then unused keys in
/// reference order when `report_unused` is set. A reference key reachable
/// through a dynamic prefix is never reported as unused.
#[must_use]
pub fn usage_findings(
    scan: &UsageScan,
    defined: &IndexSet<String>,
    reference_path: &Path,
    report_unused: bool,
) -> Vec<UsageFinding> {
    let mut findings: Vec<UsageFinding> = scan
        .references
        .iter()
        .filter(|(key, _)| !defined.contains(*key) && !is_subtree(key, defined))
        .map(|(key, at)| UsageFinding {
            key: key.clone(),
            kind: UsageKind::Undefined,
            file: at.file.clone(),
            line: at.line,
        })
        .collect();

    if report_unused {
        findings.extend(
            defined
                .iter()
                .filter(|key| !scan.references.contains_key(*key))
                .filter(|key| {
                    !scan
                        .references
                        .keys()
                        .any(|r| key.starts_with(r.as_str()) && key[r.len()..].starts_with('.'))
                })
                .filter(|key| !scan.dynamic_prefixes.iter().any(|p| key.starts_with(p.as_str())))
                .map(|key| UsageFinding {
                    key: key.clone(),
                    kind: UsageKind::Unused,
                    file: reference_path.to_path_buf(),
                    line: 0,
                }),
        );
    }
    findings
}

/// A reference to a whole subtree (`t('member')` returning an object).
fn is_subtree(key: &str, defined: &IndexSet<String>) -> bool {
    let prefix = format!("{key}.");
    defined.iter().any(|d| d.starts_with(&prefix))
}

#[cfg(test)]
#[path = "usage_tests.rs"]
mod tests;
