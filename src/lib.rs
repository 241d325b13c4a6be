//! opencode-shim - ask a terminal coding agent to fix editor diagnostics
//!
//! The crate runs opencode inside a tmux pane and exposes it to any editor as
//! a language-server that offers one code action per diagnostic.
//!
//! ## Pieces
//!
//! 1. **Supervisor** ([`supervisor`]): creates, finds, revalidates and tears
//!    down the agent's pane and process group.
//!
//! 2. **Bridge** ([`bridge`]): formats a diagnostic into a prompt and submits
//!    it to the running agent, resolving asynchronously.
//!
//! 3. **Shim** ([`lsp`]): the request router the editor talks to, turning
//!    diagnostics into code actions and executed actions into prompts.

pub mod bridge;
pub mod config;
pub mod domain;
pub mod lsp;
pub mod supervisor;

pub use domain::*;
