//! start / stop / toggle command implementation

use anyhow::{Result, bail};
use tracing::info;

use opencode_shim::config::Config;
use opencode_shim::supervisor::{PaneRecord, SupervisorError, build_provider};

#[derive(Debug, Clone, Copy)]
pub enum PaneAction {
    Start,
    Stop,
    Toggle,
}

/// Run a lifecycle action, carrying the pane id over from the previous call
pub fn pane_command(config: &Config, action: PaneAction) -> Result<()> {
    let record_path = PaneRecord::default_path();
    let record = PaneRecord::load(&record_path);

    let mut provider = build_provider(config, record.pane_for(config.provider.name()));

    let outcome = match action {
        PaneAction::Start => provider.start(),
        PaneAction::Stop => provider.stop(),
        PaneAction::Toggle => provider.toggle(),
    };

    if let Err(e) = outcome {
        report(&e);
        bail!("{:?} failed", action);
    }

    PaneRecord {
        provider: provider.name().to_string(),
        pane_id: provider.tracked_pane().map(str::to_string),
    }
    .save(&record_path)?;

    match provider.tracked_pane() {
        Some(pane) => info!(pane, "agent pane running"),
        None => info!("no agent pane running"),
    }
    Ok(())
}

fn report(error: &SupervisorError) {
    eprintln!("Error: {}", error);
    for (i, step) in error.remediation().iter().enumerate() {
        eprintln!("  {}. {}", i + 1, step);
    }
}
