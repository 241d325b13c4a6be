//! CLI command implementations

pub mod health;
pub mod pane;
pub mod serve;
