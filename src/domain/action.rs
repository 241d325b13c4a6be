//! Code actions offered to the editor and the command they carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Diagnostic;

/// The one command the shim knows how to execute.
pub const FIX_COMMAND: &str = "opencode.fix";

/// Title prefix of every fix action; the diagnostic message follows it.
pub const FIX_TITLE_PREFIX: &str = "Ask opencode to fix: ";

/// Command reference embedded in a code action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub title: String,
    pub command: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

/// An editor-surfaced remediation for one diagnostic. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeAction {
    pub title: String,
    pub command: Command,
}

impl CodeAction {
    /// Build the "ask to fix" action for a diagnostic.
    ///
    /// The diagnostic travels unmodified as the single command argument.
    pub fn fix(diagnostic: &Diagnostic) -> serde_json::Result<Self> {
        let title = format!("{}{}", FIX_TITLE_PREFIX, diagnostic.message);
        Ok(Self {
            title: title.clone(),
            command: Command {
                title,
                command: FIX_COMMAND.to_string(),
                arguments: vec![serde_json::to_value(diagnostic)?],
            },
        })
    }
}

/// Parameters of `workspace/executeCommand`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteCommandRequest {
    pub command: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl ExecuteCommandRequest {
    /// Decode the diagnostic carried as the first argument.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        let first = self.arguments.first()?;
        serde_json::from_value(first.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_action_title_and_argument() {
        let diag = Diagnostic::new("file:///src/lib.rs", 5, "unused variable");
        let action = CodeAction::fix(&diag).unwrap();

        assert_eq!(action.title, "Ask opencode to fix: unused variable");
        assert_eq!(action.command.command, FIX_COMMAND);
        assert_eq!(action.command.arguments.len(), 1);

        let request = ExecuteCommandRequest {
            command: action.command.command.clone(),
            arguments: action.command.arguments.clone(),
        };
        assert_eq!(request.diagnostic(), Some(diag));
    }

    #[test]
    fn test_missing_argument_yields_none() {
        let request: ExecuteCommandRequest =
            serde_json::from_str(r#"{"command":"opencode.fix"}"#).unwrap();
        assert!(request.arguments.is_empty());
        assert!(request.diagnostic().is_none());
    }
}
