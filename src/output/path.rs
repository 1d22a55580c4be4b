//! Path display for reports.

use std::path::Path;

/// Format a path for display, relative to `project_root` when it lives under
/// it, with forward slashes on every platform. The root itself displays as
/// `"."`.
#[must_use]
pub fn display_path(path: &Path, project_root: Option<&Path>) -> String {
    let relative = project_root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);

    let result = relative.to_string_lossy().replace('\\', "/");
    if result.is_empty() {
        ".".to_string()
    } else {
        result
    }
}
