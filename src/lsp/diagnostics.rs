//! Where the shim reads diagnostics from.

use serde_json::Value;

use super::types::{CodeActionParams, LspDiagnostic};
use crate::{Diagnostic, Severity};

/// The editor's diagnostics, as seen by the shim. Read-only.
pub trait DiagnosticSource: Send + Sync {
    /// Diagnostics on the requested line of the requested document, in the
    /// order the editor reports them.
    fn diagnostics_at(&self, params: &CodeActionParams) -> Vec<Diagnostic>;
}

/// Reads the diagnostics the client sends along with each code-action request.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestDiagnostics;

impl RequestDiagnostics {
    fn convert(uri: &str, diag: &LspDiagnostic) -> Diagnostic {
        Diagnostic {
            uri: uri.to_string(),
            line: diag.range.start.line,
            column: diag.range.start.character,
            severity: diag.severity.and_then(|s| Severity::try_from(s).ok()),
            message: diag.message.clone(),
            source: diag.source.clone(),
            code: diag.code.as_ref().and_then(code_to_string),
        }
    }
}

fn code_to_string(code: &Value) -> Option<String> {
    match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl DiagnosticSource for RequestDiagnostics {
    fn diagnostics_at(&self, params: &CodeActionParams) -> Vec<Diagnostic> {
        let line = params.range.start.line;
        params
            .context
            .diagnostics
            .iter()
            .filter(|d| d.range.start.line == line)
            .map(|d| Self::convert(&params.text_document.uri, d))
            .collect()
    }
}
