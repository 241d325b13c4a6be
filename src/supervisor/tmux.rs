//! Pane-backed provider: runs the agent in a multiplexer split.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::multiplexer::{Multiplexer, TmuxCli};
use super::process::{PosixProcesses, ProcessTable, Signal};
use super::{EnvironmentError, LaunchOptions, Provider, SupervisorError};

/// Wait between the graceful and the forceful signal in [`Provider::stop`].
pub const KILL_GRACE: Duration = Duration::from_millis(200);

/// Owns at most one pane and the process tree running inside it.
///
/// The cached pane id is never trusted on its own: every operation that needs it
/// goes through [`Provider::pane_id`], which re-asks the multiplexer first.
pub struct TmuxProvider {
    mux: Box<dyn Multiplexer>,
    processes: Box<dyn ProcessTable>,
    options: LaunchOptions,
    pane: Option<String>,
}

impl TmuxProvider {
    pub fn new(
        mux: Box<dyn Multiplexer>,
        processes: Box<dyn ProcessTable>,
        options: LaunchOptions,
    ) -> Self {
        Self {
            mux,
            processes,
            options,
            pane: None,
        }
    }

    /// Provider talking to the real `tmux` binary and OS process table.
    pub fn system(options: LaunchOptions) -> Self {
        Self::new(
            Box::new(TmuxCli::default()),
            Box::new(PosixProcesses::new()),
            options,
        )
    }

    /// Start tracking a pane created by an earlier instance.
    ///
    /// The id is revalidated on the next access like any cached id.
    pub fn adopt(mut self, pane_id: Option<String>) -> Self {
        self.pane = pane_id.filter(|id| !id.is_empty());
        self
    }

    fn terminate_pane_processes(&self, pane_id: &str) {
        let Some(root) = self.mux.pane_pid(pane_id) else {
            debug!(pane = pane_id, "pane has no root pid, skipping signals");
            return;
        };

        let group = self.processes.process_group(root);
        if group.is_empty() {
            debug!(pane = pane_id, root, "no processes share the pane's group");
            return;
        }

        debug!(pane = pane_id, root, members = ?group, "sending SIGTERM to process group");
        for &pid in &group {
            self.processes.signal(pid, Signal::Graceful);
        }

        std::thread::sleep(KILL_GRACE);

        for &pid in &group {
            if self.processes.is_alive(pid) {
                warn!(pid, "process survived SIGTERM, sending SIGKILL");
                self.processes.signal(pid, Signal::Forceful);
            }
        }
    }
}

impl Provider for TmuxProvider {
    fn name(&self) -> &str {
        "tmux"
    }

    fn health(&self) -> Result<(), EnvironmentError> {
        if !self.mux.binary_available() {
            return Err(EnvironmentError::MissingBinary {
                binary: self.mux.name().to_string(),
            });
        }
        if !self.mux.in_session() {
            return Err(EnvironmentError::NoSession {
                multiplexer: self.mux.name().to_string(),
            });
        }
        Ok(())
    }

    fn pane_id(&mut self) -> Result<Option<String>, SupervisorError> {
        self.health()?;

        let Some(pane_id) = self.pane.clone() else {
            return Ok(None);
        };

        if self.mux.pane_exists(&pane_id) {
            Ok(Some(pane_id))
        } else {
            info!(pane = %pane_id, "tracked pane disappeared");
            self.pane = None;
            Ok(None)
        }
    }

    fn start(&mut self) -> Result<(), SupervisorError> {
        if self.pane_id()?.is_some() {
            return Ok(());
        }

        let Some(pane_id) = self.mux.split_window(
            &self.options.cmd,
            &self.options.split_flags,
            self.options.focus,
        ) else {
            warn!(cmd = %self.options.cmd, "pane creation returned no id");
            return Ok(());
        };

        // Passthrough lets escape sequences from the agent reach the editor's
        // terminal; keep it off unless the user asked for it.
        if !self.options.allow_passthrough {
            self.mux.set_pane_option(&pane_id, "allow-passthrough", "off");
        }

        info!(pane = %pane_id, cmd = %self.options.cmd, "started agent pane");
        self.pane = Some(pane_id);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SupervisorError> {
        let Some(pane_id) = self.pane_id()? else {
            return Ok(());
        };

        self.terminate_pane_processes(&pane_id);
        self.mux.kill_pane(&pane_id);
        self.pane = None;

        info!(pane = %pane_id, "stopped agent pane");
        Ok(())
    }

    fn tracked_pane(&self) -> Option<&str> {
        self.pane.as_deref()
    }
}
