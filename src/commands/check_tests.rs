use std::fs;

use tempfile::TempDir;

use super::*;
use crate::config::ForbiddenRules;
use crate::gate::GatePolicy;

fn quiet() -> Diagnostics {
    Diagnostics::new(ColorMode::Never, 0, true)
}

fn forbid_console() -> RuleTemplate {
    RuleTemplate {
        required_imports: vec!["zustand".to_string()],
        forbidden: Some(ForbiddenRules {
            patterns: vec!["console.log".to_string()],
            disallowed_imports_from_layer: None,
        }),
        ..RuleTemplate::default()
    }
}

struct OneTemplate(RuleTemplate);

impl TemplateLoader for OneTemplate {
    fn load_template(&self, _path: &Path) -> Result<RuleTemplate> {
        Ok(self.0.clone())
    }
}

#[test]
fn reports_follow_enumeration_order() {
    let temp = TempDir::new().unwrap();
    let names = ["aStore.ts", "bStore.ts", "cStore.ts", "dStore.ts"];
    let files: Vec<PathBuf> = names
        .iter()
        .map(|name| {
            let path = temp.path().join(name);
            fs::write(&path, "import { create } from 'zustand';\nconsole.log('x');\n").unwrap();
            path
        })
        .collect();

    let template = forbid_console();
    let registry = CheckRegistry::for_template(&template, Category::Store).unwrap();
    let reports =
        evaluate_files(&registry, &template, Category::Store, &files, &quiet()).unwrap();

    let paths: Vec<_> = reports.iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, files);
    assert!(reports.iter().all(|r| r.first_failure() == Some(1)));
}

#[test]
fn fail_fast_outcome_is_repeatable() {
    let temp = TempDir::new().unwrap();
    let mut files = Vec::new();
    for (i, body) in ["import 'zustand';\n", "import 'zustand';\nconsole.log(1);\n", "x\n"]
        .iter()
        .enumerate()
    {
        let path = temp.path().join(format!("s{i}Store.ts"));
        fs::write(&path, body).unwrap();
        files.push(path);
    }

    let template = forbid_console();
    let registry = CheckRegistry::for_template(&template, Category::Store).unwrap();
    let run = || {
        let reports =
            evaluate_files(&registry, &template, Category::Store, &files, &quiet()).unwrap();
        Gate::apply(GatePolicy::FailFast, reports)
    };

    let first = run();
    assert_eq!(first, run());
    let failure = first.first_failure.unwrap();
    assert_eq!(failure.path, files[1]);
    assert_eq!(failure.check, "forbidden-patterns");
    assert_eq!(first.files_checked, 2);
}

#[test]
fn unreadable_file_is_skipped() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join("goodStore.ts");
    let bad = temp.path().join("badStore.ts");
    fs::write(&good, "import 'zustand';\n").unwrap();
    fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

    let template = forbid_console();
    let registry = CheckRegistry::for_template(&template, Category::Store).unwrap();
    let reports = evaluate_files(
        &registry,
        &template,
        Category::Store,
        &[bad, good.clone()],
        &quiet(),
    )
    .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].path, good);
}

#[test]
fn template_for_other_category_is_rejected() {
    let template = RuleTemplate {
        category: Some(Category::Hook),
        ..forbid_console()
    };
    let result = load_category_template(&OneTemplate(template), Path::new("store.toml"), Category::Store);
    assert!(matches!(result, Err(GuardError::TemplateInvalid(_))));
}

#[test]
fn template_without_category_is_accepted() {
    let result =
        load_category_template(&OneTemplate(forbid_console()), Path::new("t.toml"), Category::Style);
    assert!(result.is_ok());
}

#[test]
fn json_output_is_selected_by_format() {
    let outcome = Gate::apply(GatePolicy::FailFast, Vec::new());
    let output = format_output(OutputFormat::Json, &outcome, ColorMode::Never, None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["summary"]["passed"], true);
}
