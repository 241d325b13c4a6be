use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "opencode-shim")]
#[command(about = "Ask opencode to fix editor diagnostics, running it in a tmux pane")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.config/opencode-shim/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the code-action server on stdin/stdout
    Serve {
        /// Filetype of the buffer the editor wants to attach to
        #[arg(long)]
        filetype: Option<String>,
    },

    /// Check that tmux is installed and we are inside a tmux session
    Health,

    /// Open the agent pane if it is not running
    Start,

    /// Terminate the agent and close its pane
    Stop,

    /// Start the agent if absent, stop it if running
    Toggle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr: stdout carries the protocol stream in `serve`.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = opencode_shim::config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { filetype } => {
            cli::serve::serve_command(&config, filetype.as_deref()).await?;
        }
        Commands::Health => {
            cli::health::health_command(&config)?;
        }
        Commands::Start => {
            cli::pane::pane_command(&config, cli::pane::PaneAction::Start)?;
        }
        Commands::Stop => {
            cli::pane::pane_command(&config, cli::pane::PaneAction::Stop)?;
        }
        Commands::Toggle => {
            cli::pane::pane_command(&config, cli::pane::PaneAction::Toggle)?;
        }
    }

    Ok(())
}
