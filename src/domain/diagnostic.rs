//! Diagnostics as reported by the editor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic, numbered the way LSP numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Information),
            4 => Ok(Severity::Hint),
            other => Err(format!("unknown diagnostic severity: {}", other)),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "info",
            Severity::Hint => "hint",
        };
        f.write_str(label)
    }
}

/// A single diagnostic attached to a line of a buffer.
///
/// Produced by the editor's diagnostics subsystem; this crate only reads it and
/// passes it around as the argument of the fix command. Lines and columns are
/// zero-based, matching the wire protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Buffer identifier (a document URI when coming over the wire)
    pub uri: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub message: String,
    /// Tool that produced the diagnostic (e.g. "rust-analyzer")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(uri: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            line,
            column: 0,
            severity: None,
            message: message.into(),
            source: None,
            code: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = column;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_as_number() {
        let diag = Diagnostic::new("file:///a.rs", 4, "boom").with_severity(Severity::Warning);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], 2);
        assert!(json.get("source").is_none());
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let json = r#"{"uri":"file:///a.rs","line":1,"severity":9,"message":"x"}"#;
        assert!(serde_json::from_str::<Diagnostic>(json).is_err());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"uri":"file:///a.rs","line":3,"message":"unused variable"}"#;
        let diag: Diagnostic = serde_json::from_str(json).unwrap();
        assert_eq!(diag.column, 0);
        assert_eq!(diag.severity, None);
        assert_eq!(diag.message, "unused variable");
    }
}
