//! Content-Length framing of the LSP base protocol.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single message body.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024; // 16 MiB

/// Read one framed message body. Returns `None` on a clean EOF.
///
/// Headers other than `Content-Length` are ignored.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    let mut saw_header = false;

    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .await
            .context("Failed to read message header")?;

        if read == 0 {
            if saw_header {
                bail!("Unexpected EOF inside message header");
            }
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            if saw_header {
                break;
            }
            continue;
        }
        saw_header = true;

        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("Content-Length") {
                let len = value
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid Content-Length: {}", value.trim()))?;
                content_length = Some(len);
            }
        }
    }

    let Some(len) = content_length else {
        bail!("Message header without Content-Length");
    };
    if len > MAX_BODY_BYTES {
        bail!("Message of {} bytes exceeds limit", len);
    }

    let mut body = vec![0u8; len];
    reader
        .read_exact(&mut body)
        .await
        .context("Failed to read message body")?;
    Ok(Some(body))
}

/// Serialize and write one framed message, flushing afterwards.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let body = serde_json::to_vec(message).context("Failed to encode message")?;
    let header = format!("Content-Length: {}\r\n\r\n", body.len());

    writer.write_all(header.as_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}
