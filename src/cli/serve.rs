//! Serve command implementation

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use opencode_shim::bridge::OpencodeBridge;
use opencode_shim::config::Config;
use opencode_shim::lsp::{RequestDiagnostics, Shim, serve};

/// Run the code-action server over stdin/stdout
pub async fn serve_command(config: &Config, filetype: Option<&str>) -> Result<()> {
    if !config.attaches_to(filetype) {
        info!(filetype = filetype.unwrap_or("<none>"), "not attaching");
        return Ok(());
    }

    let bridge = OpencodeBridge::with_url(&config.url);
    info!(url = %bridge.base_url(), "serving code actions");

    let shim = Arc::new(Shim::new(Arc::new(RequestDiagnostics), Arc::new(bridge)));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    serve(shim, stdin, tokio::io::stdout()).await
}
