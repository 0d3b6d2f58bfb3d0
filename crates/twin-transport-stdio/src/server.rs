//! MCP server loop over the stdio transport.
//!
//! Reads one JSON-RPC message per line, dispatches it through
//! `McpHandler` and writes the response as one line. Notifications get no
//! response; unparseable lines get a -32700 error with `id: null`.

use std::time::Duration;

use tracing::{debug, info, warn};

use twin_mcp::{Inbound, JsonRpcOutput, McpHandler};

use crate::error::TransportError;
use crate::transport::StdioTransport;

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: McpHandler,
    request_timeout: Duration,
}

impl<R, W> McpServer<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new server with the given transport, handler and per-request limit.
    pub fn new(
        transport: StdioTransport<R, W>,
        handler: McpHandler,
        request_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            handler,
            request_timeout,
        }
    }

    /// Runs until the input stream is closed.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server starting on stdio");

        loop {
            let line = match self.transport.read_line().await? {
                Some(line) if line.is_empty() => continue,
                Some(line) => line,
                None => {
                    info!("stdin closed, shutting down");
                    return Ok(());
                }
            };

            match Inbound::parse(&line) {
                Inbound::Request(request) => {
                    debug!(method = %request.method, id = ?request.id, "received request");
                    let output = self
                        .handler
                        .dispatch_within(&request, self.request_timeout)
                        .await;
                    self.write_output(&output).await?;
                }
                Inbound::Notification(notification) => {
                    debug!(method = %notification.method, "received notification");
                    self.handler.handle_notification(&notification);
                }
                Inbound::Rejected(output) => {
                    warn!(code = ?output.error_code(), "rejected malformed message");
                    self.write_output(&output).await?;
                }
            }
        }
    }

    async fn write_output(&mut self, output: &JsonRpcOutput) -> Result<(), TransportError> {
        let json = output.to_json()?;
        self.transport.write_line(&json).await
    }
}
