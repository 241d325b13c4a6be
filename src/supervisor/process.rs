//! OS process table access: process-group enumeration and signalling.
//!
//! Every call here is short and synchronous. Failures (missing `ps`, a pid that
//! vanished, permission errors) read as "nothing there" rather than as errors.

use std::process::Command;

/// Which termination signal to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// SIGTERM: lets the process flush state before exiting
    Graceful,
    /// SIGKILL: cannot be trapped
    Forceful,
}

impl Signal {
    #[cfg(unix)]
    fn as_raw(self) -> i32 {
        match self {
            Signal::Graceful => libc::SIGTERM,
            Signal::Forceful => libc::SIGKILL,
        }
    }
}

/// Narrow view of the OS process table used by the supervisor.
pub trait ProcessTable: Send {
    /// Pids sharing `root`'s process-group id, excluding `root` itself.
    fn process_group(&self, root: u32) -> Vec<u32>;

    /// Deliver `signal` to `pid`. Returns whether delivery succeeded.
    fn signal(&self, pid: u32, signal: Signal) -> bool;

    fn is_alive(&self, pid: u32) -> bool;
}

/// [`ProcessTable`] backed by `ps` and `kill(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PosixProcesses;

impl PosixProcesses {
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn pgid_of(pid: u32) -> Option<i32> {
        let pgid = unsafe { libc::getpgid(pid as libc::pid_t) };
        (pgid > 0).then_some(pgid)
    }

    #[cfg(not(unix))]
    fn pgid_of(_pid: u32) -> Option<i32> {
        None
    }

    /// Process state letter from `ps`, e.g. `S`, `R` or `Z`.
    fn state_of(pid: u32) -> Option<String> {
        let output = Command::new("ps")
            .args(["-o", "stat=", "-p", &pid.to_string()])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let stat = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!stat.is_empty()).then_some(stat)
    }
}

impl ProcessTable for PosixProcesses {
    fn process_group(&self, root: u32) -> Vec<u32> {
        let Some(pgid) = Self::pgid_of(root) else {
            return Vec::new();
        };

        let output = match Command::new("ps").args(["-A", "-o", "pid=,pgid="]).output() {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::debug!(status = %output.status, "ps exited unsuccessfully");
                return Vec::new();
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to run ps");
                return Vec::new();
            }
        };

        parse_process_group(&String::from_utf8_lossy(&output.stdout), pgid, root)
    }

    fn signal(&self, pid: u32, signal: Signal) -> bool {
        #[cfg(unix)]
        {
            let rc = unsafe { libc::kill(pid as libc::pid_t, signal.as_raw()) };
            rc == 0
        }

        #[cfg(not(unix))]
        {
            let _ = (pid, signal);
            false
        }
    }

    fn is_alive(&self, pid: u32) -> bool {
        #[cfg(unix)]
        {
            let rc = unsafe { libc::kill(pid as libc::pid_t, 0) };
            if rc != 0 {
                let errno = std::io::Error::last_os_error().raw_os_error();
                if errno != Some(libc::EPERM) {
                    return false;
                }
            }
            // kill(pid, 0) succeeds for zombies; they no longer run.
            match Self::state_of(pid) {
                Some(stat) => !stat.starts_with('Z'),
                None => false,
            }
        }

        #[cfg(not(unix))]
        {
            let _ = pid;
            false
        }
    }
}

/// Parse `ps -o pid=,pgid=` output, keeping members of `pgid` other than `root`.
fn parse_process_group(ps_output: &str, pgid: i32, root: u32) -> Vec<u32> {
    ps_output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let pid = fields.next()?.parse::<u32>().ok()?;
            let group = fields.next()?.parse::<i32>().ok()?;
            (group == pgid && pid != root).then_some(pid)
        })
        .collect()
}
