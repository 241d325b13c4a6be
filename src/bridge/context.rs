//! Human-readable references to diagnostics for use inside prompts.

use std::path::{Path, PathBuf};

use url::Url;

use crate::Diagnostic;

/// Convert a `file://` URI into a path; other identifiers are returned as-is.
fn uri_to_path(uri: &str) -> PathBuf {
    Url::parse(uri)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(uri))
}

/// Path shown to the agent, relative to `cwd` when the file lives below it.
fn display_path(uri: &str, cwd: Option<&Path>) -> String {
    let path = uri_to_path(uri);
    let shown = cwd
        .and_then(|cwd| path.strip_prefix(cwd).ok())
        .unwrap_or(path.as_path());
    shown.display().to_string()
}

/// Reference a diagnostic's position, e.g. `@src/main.rs L6:C1`.
///
/// Lines and columns are shown one-based.
pub fn format_location(diagnostic: &Diagnostic) -> String {
    let cwd = std::env::current_dir().ok();
    format_location_from(diagnostic, cwd.as_deref())
}

pub(crate) fn format_location_from(diagnostic: &Diagnostic, cwd: Option<&Path>) -> String {
    format!(
        "@{} L{}:C{}",
        display_path(&diagnostic.uri, cwd),
        diagnostic.line.saturating_add(1),
        diagnostic.column.saturating_add(1)
    )
}

/// Describe a diagnostic, e.g. `unused variable (warning, rustc, E0001)`.
pub fn describe(diagnostic: &Diagnostic) -> String {
    let mut details = Vec::new();
    if let Some(severity) = diagnostic.severity {
        details.push(severity.to_string());
    }
    if let Some(source) = &diagnostic.source {
        details.push(source.clone());
    }
    if let Some(code) = &diagnostic.code {
        details.push(code.clone());
    }

    if details.is_empty() {
        diagnostic.message.clone()
    } else {
        format!("{} ({})", diagnostic.message, details.join(", "))
    }
}
