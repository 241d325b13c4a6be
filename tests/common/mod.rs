//! Shared fakes for supervisor and shim tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use opencode_shim::bridge::{PendingPrompt, PromptBridge, PromptError, SubmitOptions};
use opencode_shim::lsp::DiagnosticSource;
use opencode_shim::lsp::types::CodeActionParams;
use opencode_shim::supervisor::{Multiplexer, ProcessTable, Signal};
use opencode_shim::Diagnostic;

/// Observable state behind [`FakeMux`]
#[derive(Debug, Default)]
pub struct MuxState {
    pub binary_available: bool,
    pub in_session: bool,
    pub live_panes: HashSet<String>,
    pub pane_pids: HashMap<String, u32>,
    /// Id handed out by the next split; `None` simulates a failed split
    pub next_pane: Option<String>,
    pub root_pid: Option<u32>,
    pub calls: Vec<String>,
}

impl MuxState {
    pub fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

/// In-memory multiplexer recording every call
#[derive(Clone)]
pub struct FakeMux {
    pub state: Arc<Mutex<MuxState>>,
}

impl FakeMux {
    /// Healthy environment whose next split yields `%1`
    pub fn healthy() -> Self {
        Self {
            state: Arc::new(Mutex::new(MuxState {
                binary_available: true,
                in_session: true,
                next_pane: Some("%1".to_string()),
                root_pid: Some(100),
                ..Default::default()
            })),
        }
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    /// Make the pane vanish without telling the supervisor
    pub fn close_out_of_band(&self, pane_id: &str) {
        self.state.lock().unwrap().live_panes.remove(pane_id);
    }
}

impl Multiplexer for FakeMux {
    fn name(&self) -> &str {
        "tmux"
    }

    fn binary_available(&self) -> bool {
        self.state.lock().unwrap().binary_available
    }

    fn in_session(&self) -> bool {
        self.state.lock().unwrap().in_session
    }

    fn pane_exists(&self, pane_id: &str) -> bool {
        self.record(format!("list-panes {}", pane_id));
        self.state.lock().unwrap().live_panes.contains(pane_id)
    }

    fn split_window(&self, command: &str, flags: &[String], focus: bool) -> Option<String> {
        self.record(format!("split-window {} {:?} focus={}", command, flags, focus));
        let mut state = self.state.lock().unwrap();
        let pane = state.next_pane.clone()?;
        state.live_panes.insert(pane.clone());
        if let Some(pid) = state.root_pid {
            state.pane_pids.insert(pane.clone(), pid);
        }
        Some(pane)
    }

    fn set_pane_option(&self, pane_id: &str, option: &str, value: &str) -> bool {
        self.record(format!("set-option {} {} {}", pane_id, option, value));
        true
    }

    fn pane_pid(&self, pane_id: &str) -> Option<u32> {
        self.record(format!("pane-pid {}", pane_id));
        self.state.lock().unwrap().pane_pids.get(pane_id).copied()
    }

    fn kill_pane(&self, pane_id: &str) -> bool {
        self.record(format!("kill-pane {}", pane_id));
        self.state.lock().unwrap().live_panes.remove(pane_id)
    }
}

/// Observable state behind [`FakeProcesses`]
#[derive(Debug, Default)]
pub struct ProcessState {
    /// root pid -> members of its group (root excluded)
    pub groups: HashMap<u32, Vec<u32>>,
    pub alive: HashSet<u32>,
    /// Pids that ignore SIGTERM
    pub stubborn: HashSet<u32>,
    pub signals: Vec<(u32, Signal)>,
}

#[derive(Clone, Default)]
pub struct FakeProcesses {
    pub state: Arc<Mutex<ProcessState>>,
}

impl FakeProcesses {
    /// Seed a process group under `root`
    pub fn with_group(root: u32, members: &[u32]) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.groups.insert(root, members.to_vec());
            state.alive.insert(root);
            state.alive.extend(members.iter().copied());
        }
        fake
    }

    pub fn make_stubborn(&self, pid: u32) {
        self.state.lock().unwrap().stubborn.insert(pid);
    }
}

impl ProcessTable for FakeProcesses {
    fn process_group(&self, root: u32) -> Vec<u32> {
        self.state
            .lock()
            .unwrap()
            .groups
            .get(&root)
            .cloned()
            .unwrap_or_default()
    }

    fn signal(&self, pid: u32, signal: Signal) -> bool {
        let mut state = self.state.lock().unwrap();
        state.signals.push((pid, signal));
        let dies = signal == Signal::Forceful || !state.stubborn.contains(&pid);
        if dies {
            state.alive.remove(&pid)
        } else {
            state.alive.contains(&pid)
        }
    }

    fn is_alive(&self, pid: u32) -> bool {
        self.state.lock().unwrap().alive.contains(&pid)
    }
}

/// Diagnostics keyed by line, returned in insertion order
#[derive(Default)]
pub struct StaticDiagnostics {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSource for StaticDiagnostics {
    fn diagnostics_at(&self, params: &CodeActionParams) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.line == params.range.start.line)
            .cloned()
            .collect()
    }
}

/// Bridge that records prompts and resolves with a fixed outcome
pub struct ScriptedBridge {
    pub outcome: Result<(), PromptError>,
    pub submitted: Mutex<Vec<(String, SubmitOptions)>>,
}

impl ScriptedBridge {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(PromptError::Rejected(reason.to_string())),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

impl PromptBridge for ScriptedBridge {
    fn submit(&self, prompt: String, options: SubmitOptions) -> PendingPrompt {
        self.submitted.lock().unwrap().push((prompt, options));
        let outcome = self.outcome.clone();
        PendingPrompt::new(async move {
            tokio::task::yield_now().await;
            outcome
        })
    }
}
