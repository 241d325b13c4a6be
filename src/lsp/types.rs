//! JSON-RPC and LSP wire types used by the shim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_CODE_ACTION: &str = "textDocument/codeAction";
pub const METHOD_EXECUTE_COMMAND: &str = "workspace/executeCommand";
pub const METHOD_SHUTDOWN: &str = "shutdown";
pub const METHOD_EXIT: &str = "exit";

/// JSON-RPC error codes
pub mod error_codes {
    pub const INVALID_PARAMS: i64 = -32602;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INTERNAL_ERROR: i64 = -32603;
    /// Generic implementation-defined server error
    pub const SERVER_ERROR: i64 = -32000;
}

/// Error member of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

impl ResponseError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(error_codes::METHOD_NOT_FOUND, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(error_codes::SERVER_ERROR, message)
    }
}

/// What a request resolves to: a result value or an error, never both.
pub type Outcome = Result<Value, ResponseError>;

#[derive(Debug, Clone, PartialEq, Serialize)]
enum Payload {
    #[serde(rename = "result")]
    Result(Value),
    #[serde(rename = "error")]
    Error(ResponseError),
}

/// Outgoing response message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    payload: Payload,
}

impl Response {
    pub fn new(id: Value, outcome: Outcome) -> Self {
        let payload = match outcome {
            Ok(value) => Payload::Result(value),
            Err(error) => Payload::Error(error),
        };
        Self {
            jsonrpc: "2.0",
            id,
            payload,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match &self.payload {
            Payload::Result(value) => Ok(value.clone()),
            Payload::Error(error) => Err(error.clone()),
        }
    }
}

/// Any incoming message: request, notification, or a response from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct Incoming {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Position {
    pub line: u32,
    #[serde(default)]
    pub character: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Range {
    pub start: Position,
    #[serde(default)]
    pub end: Position,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextDocumentIdentifier {
    #[serde(default)]
    pub uri: String,
}

/// A diagnostic as an LSP client ships it in `CodeActionContext`.
#[derive(Debug, Clone, Deserialize)]
pub struct LspDiagnostic {
    pub range: Range,
    #[serde(default)]
    pub severity: Option<u8>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub source: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeActionContext {
    #[serde(default)]
    pub diagnostics: Vec<LspDiagnostic>,
}

/// Parameters of `textDocument/codeAction`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeActionParams {
    #[serde(default)]
    pub text_document: TextDocumentIdentifier,
    pub range: Range,
    #[serde(default)]
    pub context: CodeActionContext,
}
