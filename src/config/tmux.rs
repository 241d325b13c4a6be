//! tmux launch settings

use serde::{Deserialize, Serialize};

/// Options for the tmux provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxSettings {
    /// Extra flags passed to `tmux split-window` (e.g. `["-h", "-l", "40%"]`)
    #[serde(default)]
    pub options: Vec<String>,

    /// Focus the new pane after creating it
    #[serde(default)]
    pub focus: bool,

    /// Keep OSC passthrough enabled in the agent pane.
    ///
    /// Off by default: passthrough lets escape codes leak into the editor,
    /// at the cost of clipboard and image support inside the agent.
    #[serde(default)]
    pub allow_passthrough: bool,
}
