//! Core domain types

mod action;
mod diagnostic;

pub use action::{CodeAction, Command, ExecuteCommandRequest, FIX_COMMAND, FIX_TITLE_PREFIX};
pub use diagnostic::{Diagnostic, Severity};
