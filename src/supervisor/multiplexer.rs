//! Terminal multiplexer boundary and its tmux implementation.

use std::process::Command;

/// The multiplexer operations the supervisor needs.
///
/// Implementations swallow invocation failures: a non-zero exit or empty output
/// is reported as `None`/`false`, never as an error.
pub trait Multiplexer: Send {
    /// Name shown in error messages and remediation steps.
    fn name(&self) -> &str;

    /// Whether the multiplexer executable can be run.
    fn binary_available(&self) -> bool;

    /// Whether the current process runs inside an active session.
    fn in_session(&self) -> bool;

    /// Whether a pane with this id currently exists.
    fn pane_exists(&self, pane_id: &str) -> bool;

    /// Split the current window, run `command` in the new pane and return its id.
    fn split_window(&self, command: &str, flags: &[String], focus: bool) -> Option<String>;

    fn set_pane_option(&self, pane_id: &str, option: &str, value: &str) -> bool;

    /// Pid of the process the pane was created with (usually a shell).
    fn pane_pid(&self, pane_id: &str) -> Option<u32>;

    fn kill_pane(&self, pane_id: &str) -> bool;
}

/// [`Multiplexer`] that shells out to the `tmux` binary.
#[derive(Debug, Clone)]
pub struct TmuxCli {
    binary: String,
}

impl Default for TmuxCli {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run tmux and return trimmed stdout, or `None` on any failure.
    fn run<I, S>(&self, args: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let output = match Command::new(&self.binary).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(binary = %self.binary, error = %e, "failed to run tmux");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "tmux exited unsuccessfully"
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Multiplexer for TmuxCli {
    fn name(&self) -> &str {
        "tmux"
    }

    fn binary_available(&self) -> bool {
        self.run(["-V"]).is_some()
    }

    fn in_session(&self) -> bool {
        std::env::var("TMUX").map(|v| !v.is_empty()).unwrap_or(false)
    }

    fn pane_exists(&self, pane_id: &str) -> bool {
        self.run(["list-panes", "-t", pane_id, "-F", "#{pane_id}"])
            .map(|out| out.lines().any(|line| line.trim() == pane_id))
            .unwrap_or(false)
    }

    fn split_window(&self, command: &str, flags: &[String], focus: bool) -> Option<String> {
        let mut args: Vec<String> = vec![
            "split-window".to_string(),
            "-P".to_string(),
            "-F".to_string(),
            "#{pane_id}".to_string(),
        ];
        if !focus {
            args.push("-d".to_string());
        }
        args.extend(flags.iter().cloned());
        args.push(command.to_string());

        self.run(&args).filter(|id| !id.is_empty())
    }

    fn set_pane_option(&self, pane_id: &str, option: &str, value: &str) -> bool {
        self.run(["set-option", "-p", "-t", pane_id, option, value]).is_some()
    }

    fn pane_pid(&self, pane_id: &str) -> Option<u32> {
        self.run(["display-message", "-p", "-t", pane_id, "#{pane_pid}"])
            .and_then(|out| out.parse::<u32>().ok())
    }

    fn kill_pane(&self, pane_id: &str) -> bool {
        self.run(["kill-pane", "-t", pane_id]).is_some()
    }
}
