//! Code-action server ("protocol shim").
//!
//! A tiny language-server that serves exactly three requests:
//!
//! - `initialize` advertises code actions and the single `opencode.fix` command
//! - `textDocument/codeAction` offers one "Ask opencode to fix" action per
//!   diagnostic on the requested line
//! - `workspace/executeCommand` turns the chosen diagnostic into a prompt and
//!   replies once the agent accepted or refused it
//!
//! Unknown request methods are ignored without a reply, while an unknown
//! *command* inside `workspace/executeCommand` is rejected with `-32601`.

mod diagnostics;
mod handlers;
mod responder;
mod server;
mod shim;
mod transport;
pub mod types;

pub use diagnostics::{DiagnosticSource, RequestDiagnostics};
pub use handlers::SERVER_NAME;
pub use responder::Responder;
pub use server::serve;
pub use shim::{Handler, Shim};
pub use transport::{read_message, write_message};
