//! Request router for the code-action server.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::diagnostics::DiagnosticSource;
use super::handlers;
use super::responder::Responder;
use crate::bridge::PromptBridge;

/// A request handler: parameters in, exactly one reply through the responder.
pub type Handler = fn(&Shim, Value, Responder);

/// Minimal request/response server exposing the fix command.
///
/// The dispatch map is built once per instance. Requests share nothing but the
/// collaborators, so any number of them may be in flight at once.
pub struct Shim {
    handlers: HashMap<&'static str, Handler>,
    diagnostics: Arc<dyn DiagnosticSource>,
    bridge: Arc<dyn PromptBridge>,
}

impl Shim {
    pub fn new(diagnostics: Arc<dyn DiagnosticSource>, bridge: Arc<dyn PromptBridge>) -> Self {
        Self {
            handlers: handlers::table(),
            diagnostics,
            bridge,
        }
    }

    /// Handler for `method`, if the shim serves it.
    ///
    /// Unknown methods have no handler and are meant to be ignored, not
    /// rejected.
    pub fn route(&self, method: &str) -> Option<Handler> {
        self.handlers.get(method).copied()
    }

    /// Dispatch a request. Returns `false` (without building a responder) for
    /// methods the shim does not serve.
    pub fn dispatch<F>(&self, method: &str, params: Value, responder: F) -> bool
    where
        F: FnOnce() -> Responder,
    {
        match self.route(method) {
            Some(handler) => {
                handler(self, params, responder());
                true
            }
            None => {
                tracing::debug!(method, "ignoring unknown request");
                false
            }
        }
    }

    /// Notifications are accepted and ignored.
    pub fn notify(&self, method: &str, _params: Value) {
        tracing::trace!(method, "ignoring notification");
    }

    /// Always `false`.
    ///
    /// Known limitation: the shim has no way to detach itself from a document
    /// once attached, so a detach request is accepted but never acted upon.
    pub fn is_closing(&self) -> bool {
        false
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticSource {
        self.diagnostics.as_ref()
    }

    pub fn bridge(&self) -> &dyn PromptBridge {
        self.bridge.as_ref()
    }
}
