//! Request handlers of the shim's dispatch map.

use std::collections::HashMap;

use serde_json::{Value, json};
use tracing::{debug, warn};

use super::responder::Responder;
use super::shim::{Handler, Shim};
use super::types::{
    CodeActionParams, METHOD_CODE_ACTION, METHOD_EXECUTE_COMMAND, METHOD_INITIALIZE,
    ResponseError,
};
use crate::bridge::{SubmitOptions, describe};
use crate::{CodeAction, ExecuteCommandRequest, FIX_COMMAND};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "opencode";

pub(super) fn table() -> HashMap<&'static str, Handler> {
    let mut handlers: HashMap<&'static str, Handler> = HashMap::new();
    handlers.insert(METHOD_INITIALIZE, initialize);
    handlers.insert(METHOD_CODE_ACTION, code_action);
    handlers.insert(METHOD_EXECUTE_COMMAND, execute_command);
    handlers
}

/// Static capabilities; the client's parameters are not consulted.
fn initialize(_shim: &Shim, _params: Value, responder: Responder) {
    responder.ok(json!({
        "capabilities": {
            "codeActionProvider": true,
            "executeCommandProvider": {
                "commands": [FIX_COMMAND],
            },
        },
        "serverInfo": {
            "name": SERVER_NAME,
        },
    }));
}

/// One fix action per diagnostic on the requested line.
fn code_action(shim: &Shim, params: Value, responder: Responder) {
    let params: CodeActionParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return responder.err(ResponseError::invalid_params(format!(
                "Invalid codeAction params: {}",
                e
            )));
        }
    };

    let diagnostics = shim.diagnostics().diagnostics_at(&params);
    debug!(
        uri = %params.text_document.uri,
        line = params.range.start.line,
        count = diagnostics.len(),
        "listing code actions"
    );

    let actions = diagnostics
        .iter()
        .map(CodeAction::fix)
        .collect::<serde_json::Result<Vec<_>>>()
        .and_then(serde_json::to_value);

    match actions {
        Ok(actions) => responder.ok(actions),
        Err(e) => responder.err(ResponseError::internal(format!(
            "Failed to encode code actions: {}",
            e
        ))),
    }
}

/// Turn the chosen diagnostic into a prompt and hand it to the agent.
///
/// The reply is sent once the submission settles, not when this returns.
fn execute_command(shim: &Shim, params: Value, responder: Responder) {
    let command = params.get("command").and_then(Value::as_str);
    if command != Some(FIX_COMMAND) {
        return responder.err(ResponseError::method_not_found(format!(
            "Unknown command: {}",
            command.unwrap_or("<missing>")
        )));
    }

    let request: ExecuteCommandRequest = match serde_json::from_value(params) {
        Ok(request) => request,
        Err(e) => {
            return responder.err(ResponseError::invalid_params(format!(
                "Invalid executeCommand params: {}",
                e
            )));
        }
    };

    let Some(diagnostic) = request.diagnostic() else {
        return responder.err(ResponseError::invalid_params(format!(
            "{} expects a diagnostic argument",
            FIX_COMMAND
        )));
    };

    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return responder.err(ResponseError::internal(
            "No async runtime available to await the prompt",
        ));
    };

    let bridge = shim.bridge();
    let prompt = format!(
        "Fix diagnostic: {} {}",
        bridge.format(&diagnostic),
        describe(&diagnostic)
    );
    debug!(%prompt, "submitting fix prompt");

    let pending = bridge.submit(prompt, SubmitOptions::immediate());
    runtime.spawn(async move {
        match pending.await {
            Ok(()) => responder.ok(Value::Null),
            Err(e) => {
                warn!(error = %e, "fix prompt failed");
                responder.err(ResponseError::server(format!("Failed to fix: {}", e)));
            }
        }
    });
}
