//! MCP Server
//!
//! Main server loop handling JSON-RPC messages over stdio.

use router_core::RouterService;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::handlers::McpHandlers;
use super::protocol::*;

const PREVIEW_CHARS: usize = 100;

fn preview(s: &str) -> String {
    if s.chars().count() > PREVIEW_CHARS {
        let head: String = s.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// MCP Server
#[derive(Clone)]
pub struct McpServer {
    handlers: McpHandlers,
}

impl McpServer {
    pub fn new(service: RouterService) -> Self {
        Self {
            handlers: McpHandlers::new(service),
        }
    }

    /// Run the server, reading from stdin and writing to stdout
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC until `input` closes.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: tokio::io::AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("MCP server started, waiting for messages...");

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            tracing::debug!("<- {}", preview(&line));

            let Some(response) = self.handle(&line).await else {
                continue;
            };
            let out = serde_json::to_string(&response)?;
            tracing::debug!("-> {}", preview(&out));

            output.write_all(out.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }

        tracing::info!("MCP server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message
    pub async fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let req: JsonRpcRequest = match serde_json::from_str(msg) {
            Ok(r) => r,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };
        self.handlers.handle(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn parse_error_is_reported_without_id() {
        let server = McpServer::new(RouterService::default());
        let resp = server.handle("{not json").await.unwrap();
        assert!(resp.id.is_none());
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn wrong_version_is_invalid_request() {
        let server = McpServer::new(RouterService::default());
        let resp = server
            .handle(r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn serve_answers_requests_and_skips_notifications() {
        let server = McpServer::new(RouterService::default());
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"reboot_router","arguments":{"confirm":true}}}"#,
            "\n",
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], 2);

        let text = lines[1]["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["status"], "success");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
