//! Integration tests for the `check` command.

mod common;

use common::{HOOK_TEMPLATE, TestFixture};
use predicates::prelude::*;

const FETCH_DATA: &str = "export function fetchData() { debugger; }\n";

#[test]
fn fail_fast_prints_only_first_failing_check() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file("src/hooks/fetchData.ts", FETCH_DATA);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ naming"))
        .stdout(predicate::str::contains(
            "src/hooks/fetchData.ts:1: 'fetchData' does not start with 'use'",
        ))
        .stdout(predicate::str::contains("help: rename to 'useFetchData'"))
        .stdout(predicate::str::contains("debugger").not())
        .stdout(predicate::str::contains("✗ Check failed: naming"));
}

#[test]
fn collect_all_reports_both_findings() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file("src/hooks/fetchData.ts", FETCH_DATA);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--gate", "collect-all", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ naming"))
        .stdout(predicate::str::contains("✗ forbidden-patterns"))
        .stdout(predicate::str::contains("'debugger'"));
}

#[test]
fn gate_policy_from_config() {
    let fixture = TestFixture::new();
    fixture.create_config("gate = \"collect-all\"\n");
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file("src/hooks/fetchData.ts", FETCH_DATA);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ forbidden-patterns"));
}

#[test]
fn compliant_files_pass() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file(
        "src/hooks/useData.ts",
        "export function useData() {\n  return 1;\n}\n",
    );

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ naming"))
        .stdout(predicate::str::contains("✓ All checks passed (1 file checked)"));
}

#[test]
fn json_output_to_file() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file("src/hooks/fetchData.ts", FETCH_DATA);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--format", "json", "--output", "out/report.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&fixture.read("out/report.json")).unwrap();
    assert_eq!(json["summary"]["passed"], false);
    assert_eq!(json["summary"]["first_failure"]["check"], "naming");
    assert_eq!(json["files"][0]["path"], "src/hooks/fetchData.ts");
}

#[test]
fn exclude_glob_skips_files() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file("src/hooks/legacy/fetchData.ts", FETCH_DATA);
    fixture.create_file("src/hooks/useData.ts", "export function useData() {}\n");

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "-x", "legacy/**", "--color", "never"])
        .assert()
        .success();
}

#[test]
fn explicit_target_and_template() {
    let fixture = TestFixture::new();
    fixture.create_file("rules/hooks.toml", HOOK_TEMPLATE);
    fixture.create_file("app/hooks/useThing.ts", "export const useThing = () => 1;\n");

    convention_guard!()
        .current_dir(fixture.path())
        .args([
            "check",
            "hook",
            "app/hooks",
            "--template",
            "rules/hooks.toml",
            "--color",
            "never",
        ])
        .assert()
        .success();
}

#[test]
fn missing_template_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_file("src/hooks/useData.ts", "export function useData() {}\n");

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("✖ Template: Rule template not found"))
        .stderr(predicate::str::contains("convention-guard init"));
}

#[test]
fn missing_target_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("✖ Target:"));
}

#[test]
fn explicit_check_without_field_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_template(
        "hook",
        "checks = [\"naming\", \"nesting-depth\"]\n[naming]\nprefix = \"use\"\n",
    );
    fixture.create_file("src/hooks/useData.ts", "export function useData() {}\n");

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nesting-depth"));
}

#[test]
fn repeated_runs_produce_identical_output() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    for name in ["fetchA", "fetchB", "useC", "fetchD"] {
        fixture.create_file(&format!("src/hooks/{name}.ts"), &format!("export function {name}() {{}}\n"));
    }

    let run = || {
        convention_guard!()
            .current_dir(fixture.path())
            .args(["check", "hook", "--gate", "collect-all", "--color", "never"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn template_with_unknown_keys_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_template(
        "hook",
        "requiredImports = [\"react\"]\n\n[codeStyle]\nmaxNestingDepth = 1\n\n[forbidden]\npattern = [\"debugger\"]\n",
    );
    fixture.create_file("src/hooks/fetchData.ts", FETCH_DATA);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("All checks passed").not())
        .stderr(predicate::str::contains("Failed to parse rule template"))
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn template_without_checks_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_template("hook", "version = \"1\"\ncategory = \"hook\"\n");
    fixture.create_file("src/hooks/fetchData.ts", FETCH_DATA);

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("template configures no checks"));
}

#[test]
fn required_wrapper_without_marker_is_fatal() {
    let fixture = TestFixture::new();
    fixture.create_template("store", "[structure]\nmust_use_wrapper = true\n");
    fixture.create_file(
        "src/stores/userStore.ts",
        "export const useUserStore = create((set) => ({}));\n",
    );

    convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "store", "--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("structural-wrapper"))
        .stderr(predicate::str::contains("structure.wrapper_marker"));
}

#[cfg(unix)]
#[test]
fn unlistable_target_is_fatal() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let fixture = TestFixture::new();
    fixture.create_template("hook", HOOK_TEMPLATE);
    fixture.create_file("src/hooks/useData.ts", "export function useData() {}\n");
    let hooks = fixture.path().join("src/hooks");
    fs::set_permissions(&hooks, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can list the directory anyway.
    let listable = fs::read_dir(&hooks).is_ok();
    let output = convention_guard!()
        .current_dir(fixture.path())
        .args(["check", "hook", "--color", "never"])
        .output()
        .unwrap();
    fs::set_permissions(&hooks, fs::Permissions::from_mode(0o755)).unwrap();
    if listable {
        return;
    }

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✖ Target:"), "{stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("All checks passed"));
}
