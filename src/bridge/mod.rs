//! Sending prompts to the running agent.
//!
//! [`PromptBridge::submit`] returns immediately with a [`PendingPrompt`] that
//! resolves once the agent accepted (or refused) the prompt. Which process
//! actually receives it is up to the implementation; [`OpencodeBridge`] talks
//! to an opencode TUI over HTTP.

mod context;
mod opencode;

pub use context::{describe, format_location};
pub use opencode::OpencodeBridge;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::Diagnostic;

/// Why a prompt did not reach the agent.
///
/// Displays only the underlying reason so callers can embed it in their own
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    /// The agent answered but refused the prompt
    #[error("{0}")]
    Rejected(String),

    /// The agent could not be reached
    #[error("{0}")]
    Transport(String),

    /// The submission task ended without an outcome
    #[error("prompt submission was abandoned")]
    Abandoned,
}

/// How the agent should treat a prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Execute immediately instead of staging it for user review
    pub submit: bool,
}

impl SubmitOptions {
    pub fn immediate() -> Self {
        Self { submit: true }
    }
}

/// A prompt that was sent and awaits the agent's verdict.
///
/// Awaiting consumes it, so the outcome is observed exactly once.
#[must_use = "a pending prompt does nothing unless awaited"]
pub struct PendingPrompt {
    inner: BoxFuture<'static, Result<(), PromptError>>,
}

impl PendingPrompt {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<(), PromptError>> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// A prompt whose outcome is already known.
    pub fn ready(outcome: Result<(), PromptError>) -> Self {
        Self::new(futures::future::ready(outcome))
    }
}

impl Future for PendingPrompt {
    type Output = Result<(), PromptError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

/// Whatever currently drives the agent.
pub trait PromptBridge: Send + Sync {
    /// Reference to the diagnostic's file and position.
    fn format(&self, diagnostic: &Diagnostic) -> String {
        format_location(diagnostic)
    }

    fn submit(&self, prompt: String, options: SubmitOptions) -> PendingPrompt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_prompt_resolves() {
        assert_eq!(PendingPrompt::ready(Ok(())).await, Ok(()));

        let err = PendingPrompt::ready(Err(PromptError::Rejected("timeout".into())))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "timeout");
    }

    #[tokio::test]
    async fn test_pending_prompt_wraps_async_work() {
        let (tx, rx) = tokio::sync::oneshot::channel::<Result<(), PromptError>>();
        let pending =
            PendingPrompt::new(async move { rx.await.unwrap_or(Err(PromptError::Abandoned)) });

        tx.send(Ok(())).unwrap();
        assert_eq!(pending.await, Ok(()));
    }
}
