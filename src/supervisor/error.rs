//! Error types for pane supervision.

/// The environment cannot host a managed pane.
///
/// Only raised when an operation that needs the multiplexer is attempted;
/// never checked proactively.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("`{binary}` executable not found")]
    MissingBinary { binary: String },

    #[error("not running inside a {multiplexer} session")]
    NoSession { multiplexer: String },
}

impl EnvironmentError {
    /// Ordered, human-readable steps that resolve the failure.
    pub fn remediation(&self) -> Vec<String> {
        match self {
            EnvironmentError::MissingBinary { binary } => vec![
                format!("Install {} with your system package manager", binary),
                format!("Make sure `{}` is on the PATH of the editor process", binary),
            ],
            EnvironmentError::NoSession { multiplexer } => vec![
                format!("Start a {} session first (`{}`)", multiplexer, multiplexer),
                format!("Launch your editor from inside the {} session", multiplexer),
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

impl SupervisorError {
    pub fn remediation(&self) -> Vec<String> {
        match self {
            SupervisorError::Environment(e) => e.remediation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remediation_differs_per_failure() {
        let missing = EnvironmentError::MissingBinary {
            binary: "tmux".to_string(),
        };
        let no_session = EnvironmentError::NoSession {
            multiplexer: "tmux".to_string(),
        };

        assert!(!missing.remediation().is_empty());
        assert!(!no_session.remediation().is_empty());
        assert_ne!(missing.remediation(), no_session.remediation());
        assert_eq!(missing.to_string(), "`tmux` executable not found");
    }

    #[test]
    fn test_supervisor_error_is_transparent() {
        let err = SupervisorError::from(EnvironmentError::NoSession {
            multiplexer: "tmux".to_string(),
        });
        assert_eq!(err.to_string(), "not running inside a tmux session");
        assert_eq!(err.remediation().len(), 2);
    }
}
