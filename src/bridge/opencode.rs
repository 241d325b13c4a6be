//! HTTP bridge to a running opencode TUI.

use std::time::Duration;

use serde::Serialize;

use super::{PendingPrompt, PromptBridge, PromptError, SubmitOptions};

/// Default opencode server URL
const DEFAULT_OPENCODE_URL: &str = "http://127.0.0.1:4096";

#[derive(Serialize)]
struct AppendPromptBody<'a> {
    text: &'a str,
}

/// Drives the prompt box of an opencode TUI through its HTTP endpoints.
#[derive(Clone)]
pub struct OpencodeBridge {
    base_url: String,
    client: ureq::Agent,
}

impl Default for OpencodeBridge {
    fn default() -> Self {
        Self::with_url(DEFAULT_OPENCODE_URL)
    }
}

impl OpencodeBridge {
    pub fn with_url(base_url: impl Into<String>) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(2))
            .timeout_read(Duration::from_secs(30))
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST to a TUI endpoint; opencode answers `true` when it acted.
    fn post(&self, endpoint: &str, body: Option<&AppendPromptBody<'_>>) -> Result<(), PromptError> {
        let url = format!("{}/tui/{}", self.base_url, endpoint);
        tracing::debug!(%url, "posting to opencode");

        let request = self.client.post(&url);
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let response = result.map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                PromptError::Rejected(format!("opencode {} returned HTTP {}", endpoint, code))
            }
            ureq::Error::Transport(t) => PromptError::Transport(format!(
                "could not reach opencode at {}: {}",
                self.base_url, t
            )),
        })?;

        let accepted: bool = response.into_json().map_err(|e| {
            PromptError::Rejected(format!("unexpected {} response: {}", endpoint, e))
        })?;

        if accepted {
            Ok(())
        } else {
            Err(PromptError::Rejected(format!("opencode refused {}", endpoint)))
        }
    }

    /// Blocking delivery of one prompt.
    ///
    /// Immediate submissions replace whatever is in the prompt box; staged ones
    /// are appended for the user to review.
    pub fn deliver(&self, prompt: &str, options: SubmitOptions) -> Result<(), PromptError> {
        if options.submit {
            self.post("clear-prompt", None)?;
        }
        self.post("append-prompt", Some(&AppendPromptBody { text: prompt }))?;
        if options.submit {
            self.post("submit-prompt", None)?;
        }
        Ok(())
    }
}

impl PromptBridge for OpencodeBridge {
    fn submit(&self, prompt: String, options: SubmitOptions) -> PendingPrompt {
        let bridge = self.clone();
        PendingPrompt::new(async move {
            tokio::task::spawn_blocking(move || bridge.deliver(&prompt, options))
                .await
                .unwrap_or(Err(PromptError::Abandoned))
        })
    }
}
