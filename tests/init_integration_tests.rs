//! Integration tests for the `init` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn init_writes_config_and_templates() {
    let fixture = TestFixture::new();

    convention_guard!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stdout(predicate::str::contains(".convention-guard.toml"));

    assert!(fixture.path().join(".convention-guard.toml").is_file());
    for category in ["store", "hook", "style", "locale"] {
        let template = fixture
            .path()
            .join(format!(".convention-guard/templates/{category}.toml"));
        assert!(template.is_file(), "missing {category} template");
    }
}

#[test]
fn init_refuses_to_overwrite() {
    let fixture = TestFixture::new();
    fixture.create_config("gate = \"collect-all\"\n");

    convention_guard!()
        .current_dir(fixture.path())
        .args(["init", "--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fixture.read(".convention-guard.toml"), "gate = \"collect-all\"\n");
    assert!(!fixture.path().join(".convention-guard/templates").exists());
}

#[test]
fn init_force_overwrites() {
    let fixture = TestFixture::new();
    fixture.create_config("gate = \"collect-all\"\n");

    convention_guard!()
        .current_dir(fixture.path())
        .args(["init", "--force"])
        .assert()
        .success();

    assert_ne!(fixture.read(".convention-guard.toml"), "gate = \"collect-all\"\n");
}

#[test]
fn init_quiet_prints_nothing() {
    let fixture = TestFixture::new();

    convention_guard!()
        .current_dir(fixture.path())
        .args(["init", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn initialized_hook_template_catches_bad_hook() {
    let fixture = TestFixture::new();
    convention_guard!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .success();
    fixture.create_file(
        "src/hooks/fetchUser.ts",
        "export function fetchUser() {\n  return 1;\n}\n",
    );

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ naming"));
}
