use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::Category;
use crate::error::{GuardError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Compile exclusion globs into one set.
///
/// # Errors
/// Returns `InvalidPattern` for the first pattern that fails to compile.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| GuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| GuardError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

/// File extensions belonging to a category.
#[must_use]
pub const fn category_extensions(category: Category) -> &'static [&'static str] {
    match category {
        Category::Store | Category::Hook => &["ts", "tsx", "js", "jsx"],
        Category::Style => &["css", "scss", "less"],
        Category::Locale => &["json"],
    }
}

/// Selects the files of one category: right extension plus a path heuristic.
pub struct CategoryFilter {
    category: Category,
}

impl CategoryFilter {
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self { category }
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                category_extensions(self.category)
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(ext))
            })
    }

    fn matches_heuristic(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let in_dir = |names: &[&str]| {
            path.parent().is_some_and(|parent| {
                parent.components().any(|c| {
                    let segment = c.as_os_str().to_string_lossy().to_lowercase();
                    names.contains(&segment.as_str())
                })
            })
        };

        match self.category {
            Category::Store => in_dir(&["store", "stores"]) || file_name.contains("store"),
            Category::Hook => in_dir(&["hooks"]) || file_name.starts_with("use"),
            Category::Style => {
                in_dir(&["styles"]) || file_name.contains("style") || file_name.contains(".module.")
            }
            Category::Locale => in_dir(&["locales", "locale", "i18n", "lang"]),
        }
    }
}

impl FileFilter for CategoryFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_extension(path) && self.matches_heuristic(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
