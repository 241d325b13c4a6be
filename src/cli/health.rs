//! Health command implementation

use anyhow::{Result, bail};

use opencode_shim::config::Config;
use opencode_shim::supervisor::build_provider;

/// Report whether the configured provider can run the agent
pub fn health_command(config: &Config) -> Result<()> {
    let provider = build_provider(config, None);

    match provider.health() {
        Ok(()) => {
            println!("{}: OK", provider.name());
            Ok(())
        }
        Err(e) => {
            println!("{}: {}", provider.name(), e);
            println!();
            for (i, step) in e.remediation().iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            bail!("{} is not usable", provider.name())
        }
    }
}
