//! Stdio server loop around a [`Shim`].

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::responder::Responder;
use super::shim::Shim;
use super::transport::{read_message, write_message};
use super::types::{Incoming, METHOD_EXIT, METHOD_SHUTDOWN, Response};

enum Outgoing {
    Reply(Response),
    Close,
}

/// Serve requests from `reader` until EOF or `exit`, writing replies to `writer`.
///
/// Replies are funnelled through one writer task, so handlers that answer
/// later (after a prompt settles) never interleave with others on the wire.
pub async fn serve<R, W>(shim: Arc<Shim>, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Outgoing>();

    let writer_task = tokio::spawn(async move {
        while let Some(Outgoing::Reply(response)) = rx.recv().await {
            if let Err(e) = write_message(&mut writer, &response).await {
                warn!(error = %e, "failed to write response");
                break;
            }
        }
    });

    while let Some(body) = read_message(&mut reader).await? {
        let message: Incoming = match serde_json::from_slice(&body) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "skipping malformed message");
                continue;
            }
        };

        match (message.id, message.method) {
            (Some(id), Some(method)) if method == METHOD_SHUTDOWN => {
                debug!("shutdown requested");
                let _ = tx.send(Outgoing::Reply(Response::new(id, Ok(Value::Null))));
            }
            (Some(id), Some(method)) => {
                let tx = tx.clone();
                shim.dispatch(&method, message.params, move || {
                    Responder::new(move |outcome| {
                        let _ = tx.send(Outgoing::Reply(Response::new(id, outcome)));
                    })
                });
            }
            (None, Some(method)) if method == METHOD_EXIT => {
                debug!("exit notification received");
                break;
            }
            (None, Some(method)) => shim.notify(&method, message.params),
            (_, None) => debug!("ignoring response from client"),
        }

        if shim.is_closing() {
            break;
        }
    }

    info!("protocol stream closed");
    // Flush what is queued; replies settling after this point are dropped.
    let _ = tx.send(Outgoing::Close);
    let _ = writer_task.await;
    Ok(())
}
