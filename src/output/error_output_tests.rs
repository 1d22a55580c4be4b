use std::path::PathBuf;

use super::*;

fn render(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}

#[test]
fn error_shows_type_message_and_help() {
    let error = GuardError::TemplateNotFound {
        path: PathBuf::from(".convention-guard/templates/store.toml"),
    };
    let out = render(|w| ErrorOutput::with_colors(false).write_error(w, &error));

    assert!(out.starts_with(
        "✖ Template: Rule template not found: .convention-guard/templates/store.toml\n"
    ));
    assert!(out.contains("  help: Run `convention-guard init`"));
    assert!(!out.contains('×'));
}

#[test]
fn error_detail_comes_from_source() {
    let error = GuardError::RootUnreadable {
        path: PathBuf::from("src/stores"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
    };
    let out = render(|w| ErrorOutput::with_colors(false).write_error(w, &error));

    assert!(out.starts_with("✖ Target: Target directory is not readable: src/stores\n"));
    assert!(out.contains("  × no such directory\n"));
    assert!(out.contains("  help: "));
}

#[test]
fn error_without_suggestion_has_no_help_line() {
    let error = GuardError::Config("bad value".to_string());
    let out = render(|w| ErrorOutput::with_colors(false).write_error(w, &error));
    assert_eq!(out, "✖ Config: Configuration error: bad value\n");
}

#[test]
fn warning_and_note_layout() {
    let output = ErrorOutput::with_colors(false);
    let warning = render(|w| output.write_warning(w, "skipped src/a.ts", Some("invalid UTF-8")));
    assert_eq!(warning, "⚠ Warning: skipped src/a.ts\n  × invalid UTF-8\n");

    let note = render(|w| output.write_note(w, "12 files"));
    assert_eq!(note, "· note: 12 files\n");
}

#[test]
fn colored_error_uses_ansi_codes() {
    let error = GuardError::Config("x".to_string());
    let out = render(|w| ErrorOutput::with_colors(true).write_error(w, &error));
    assert!(out.contains(ansi::RED));
    assert!(out.contains(ansi::RESET));
}

#[test]
fn explicit_modes_ignore_terminal() {
    assert!(ColorMode::Always.resolve(false));
    assert!(!ColorMode::Never.resolve(true));
}
