//! End-to-end tests of the framed stdio server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedBridge, StaticDiagnostics};
use opencode_shim::lsp::{RequestDiagnostics, Shim, read_message, serve, write_message};
use opencode_shim::Diagnostic;
use serde_json::{Value, json};
use tokio::io::{BufReader, DuplexStream, duplex};

struct Client {
    to_server: DuplexStream,
    from_server: BufReader<DuplexStream>,
}

impl Client {
    async fn send(&mut self, message: Value) {
        write_message(&mut self.to_server, &message).await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        let body = tokio::time::timeout(Duration::from_secs(5), read_message(&mut self.from_server))
            .await
            .expect("no message within 5s")
            .unwrap()
            .expect("server closed the stream");
        serde_json::from_slice(&body).unwrap()
    }
}

fn start(shim: Shim) -> (Client, tokio::task::JoinHandle<anyhow::Result<()>>) {
    let (client_out, server_in) = duplex(64 * 1024);
    let (server_out, client_in) = duplex(64 * 1024);
    let handle = tokio::spawn(serve(Arc::new(shim), BufReader::new(server_in), server_out));
    (
        Client {
            to_server: client_out,
            from_server: BufReader::new(client_in),
        },
        handle,
    )
}

#[tokio::test]
async fn test_session_over_the_wire() {
    let shim = Shim::new(Arc::new(RequestDiagnostics), Arc::new(ScriptedBridge::succeeding()));
    let (mut client, server) = start(shim);

    client
        .send(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
        .await;
    let init = client.recv().await;
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["serverInfo"]["name"], "opencode");

    client
        .send(json!({"jsonrpc": "2.0", "method": "initialized", "params": {}}))
        .await;
    // Unknown request: no reply is ever sent for id 2.
    client
        .send(json!({"jsonrpc": "2.0", "id": 2, "method": "textDocument/hover", "params": {}}))
        .await;

    client
        .send(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "textDocument/codeAction",
            "params": {
                "textDocument": {"uri": "file:///proj/a.rs"},
                "range": {"start": {"line": 5, "character": 0}, "end": {"line": 5, "character": 0}},
                "context": {"diagnostics": [
                    {"range": {"start": {"line": 5, "character": 2}, "end": {"line": 5, "character": 3}},
                     "severity": 2, "message": "unused variable"}
                ]}
            }
        }))
        .await;
    let actions = client.recv().await;
    assert_eq!(actions["id"], 3);
    assert_eq!(actions["result"][0]["title"], "Ask opencode to fix: unused variable");

    let command = actions["result"][0]["command"].clone();
    client
        .send(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "workspace/executeCommand",
            "params": {"command": command["command"], "arguments": command["arguments"]}
        }))
        .await;
    let executed = client.recv().await;
    assert_eq!(executed, json!({"jsonrpc": "2.0", "id": 4, "result": null}));

    client
        .send(json!({"jsonrpc": "2.0", "id": 5, "method": "shutdown"}))
        .await;
    let shutdown = client.recv().await;
    assert_eq!(shutdown["id"], 5);
    assert_eq!(shutdown["result"], Value::Null);

    client.send(json!({"jsonrpc": "2.0", "method": "exit"})).await;
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_unknown_command_error_on_the_wire() {
    let diag = Diagnostic::new("file:///a.rs", 0, "x");
    let shim = Shim::new(
        Arc::new(StaticDiagnostics {
            diagnostics: vec![diag.clone()],
        }),
        Arc::new(ScriptedBridge::failing("timeout")),
    );
    let (mut client, server) = start(shim);

    client
        .send(json!({
            "jsonrpc": "2.0",
            "id": "a",
            "method": "workspace/executeCommand",
            "params": {"command": "opencode.nope", "arguments": []}
        }))
        .await;
    let reply = client.recv().await;
    assert_eq!(reply["id"], "a");
    assert_eq!(reply["error"]["code"], -32601);
    assert!(reply.get("result").is_none());

    client
        .send(json!({
            "jsonrpc": "2.0",
            "id": "b",
            "method": "workspace/executeCommand",
            "params": {"command": "opencode.fix", "arguments": [serde_json::to_value(&diag).unwrap()]}
        }))
        .await;
    let reply = client.recv().await;
    assert_eq!(reply["id"], "b");
    assert_eq!(
        reply["error"],
        json!({"code": -32000, "message": "Failed to fix: timeout"})
    );

    drop(client);
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_malformed_json_is_skipped() {
    let shim = Shim::new(Arc::new(RequestDiagnostics), Arc::new(ScriptedBridge::succeeding()));
    let (mut client, server) = start(shim);

    use tokio::io::AsyncWriteExt;
    client
        .to_server
        .write_all(b"Content-Length: 5\r\n\r\n{oops")
        .await
        .unwrap();
    client
        .send(json!({"jsonrpc": "2.0", "id": 7, "method": "initialize"}))
        .await;

    let reply = client.recv().await;
    assert_eq!(reply["id"], 7);

    drop(client);
    server.await.unwrap().unwrap();
}
