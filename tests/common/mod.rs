#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the convention-guard binary.
#[macro_export]
macro_rules! convention_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("convention-guard"))
    };
}

/// Creates a temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("Failed to create directory");
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".convention-guard.toml", content);
    }

    /// Writes `<template_dir>/<category>.toml` at the default location.
    pub fn create_template(&self, category: &str, content: &str) {
        self.create_file(
            &format!(".convention-guard/templates/{category}.toml"),
            content,
        );
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook template: `use` prefix, then a forbidden `debugger`.
pub const HOOK_TEMPLATE: &str = r#"
version = "1"
category = "hook"
checks = ["naming", "forbidden-patterns"]

[naming]
prefix = "use"

[forbidden]
patterns = ["debugger"]
"#;

/// Config comparing only `ko` and `zh`, without a source scan.
pub const KO_ZH_CONFIG: &str = r#"
[i18n]
locales_dir = "src/locales"
reference_locale = "ko"
locales = ["ko", "zh"]
source_dirs = []
"#;
