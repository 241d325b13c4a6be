//! Lifecycle of the external agent process.
//!
//! A [`Provider`] owns one launch backend: it checks that the environment can
//! host the agent, starts it, finds it again and tears it down. The only
//! backend shipped here is [`TmuxProvider`], which runs the agent in a tmux
//! split and kills its process group on stop.
//!
//! # State
//!
//! A provider is either *absent* (no pane) or *running*. The running state is
//! left either through [`Provider::stop`] or lazily, when the next access finds
//! that the pane vanished out-of-band. Nothing is pushed proactively.
//!
//! # Example
//!
//! ```rust,ignore
//! use opencode_shim::supervisor::{LaunchOptions, Provider, TmuxProvider};
//!
//! let mut provider = TmuxProvider::system(LaunchOptions::new("opencode --port 4096"));
//! provider.toggle()?; // starts
//! provider.toggle()?; // stops
//! ```

mod error;
mod multiplexer;
mod process;
mod record;
mod tmux;

pub use error::{EnvironmentError, SupervisorError};
pub use multiplexer::{Multiplexer, TmuxCli};
pub use process::{PosixProcesses, ProcessTable, Signal};
pub use record::PaneRecord;
pub use tmux::{KILL_GRACE, TmuxProvider};

use crate::config::{Config, ProviderKind};

/// How the agent is launched inside a new pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Command line run in the pane
    pub cmd: String,
    /// Extra flags passed to the pane-split primitive
    pub split_flags: Vec<String>,
    /// Move focus to the new pane
    pub focus: bool,
    /// Leave OSC passthrough enabled on the new pane
    pub allow_passthrough: bool,
}

impl LaunchOptions {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            split_flags: Vec::new(),
            focus: false,
            allow_passthrough: false,
        }
    }
}

/// A launch backend for the agent.
pub trait Provider: Send {
    fn name(&self) -> &str;

    /// Verify the environment can host the agent.
    fn health(&self) -> Result<(), EnvironmentError>;

    /// Id of the live pane, revalidated against the multiplexer.
    ///
    /// Clears the cached id when the pane is gone. Never creates a pane.
    fn pane_id(&mut self) -> Result<Option<String>, SupervisorError>;

    /// Create the pane unless a live one exists.
    fn start(&mut self) -> Result<(), SupervisorError>;

    /// Terminate the pane's processes and destroy it. No-op when absent.
    fn stop(&mut self) -> Result<(), SupervisorError>;

    /// Start when absent, stop when running.
    fn toggle(&mut self) -> Result<(), SupervisorError> {
        if self.pane_id()?.is_some() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Cached pane id without revalidation, for persisting between runs.
    fn tracked_pane(&self) -> Option<&str>;
}

/// Build the provider selected by the configuration.
///
/// `adopted` is a pane id remembered from an earlier run; it is revalidated on
/// first use.
pub fn build_provider(config: &Config, adopted: Option<String>) -> Box<dyn Provider> {
    match config.provider {
        ProviderKind::Tmux => {
            Box::new(TmuxProvider::system(config.launch_options()).adopt(adopted))
        }
    }
}
