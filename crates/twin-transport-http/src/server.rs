//! HTTP server that binds an axum Router to a TCP socket.

use std::future::Future;

use tokio::net::TcpListener;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the MCP JSON-RPC transport.
pub struct HttpServer {
    host: String,
    port: u16,
    state: AppState,
}

impl HttpServer {
    /// Creates a new HTTP server listening on `host:port`.
    pub fn new(state: AppState, host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            state,
        }
    }

    /// The `host:port` string the server binds to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Serves until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run<F>(self, shutdown: F) -> Result<(), HttpTransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr();
        let listener = TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|source| HttpTransportError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!(%addr, "MCP HTTP server ready");

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(HttpTransportError::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use twin_mcp::McpHandler;

    use crate::auth::ApiKeys;

    fn state() -> AppState {
        AppState {
            handler: Arc::new(McpHandler::with_store(None)),
            api_keys: Arc::new(ApiKeys::default()),
            request_timeout: Duration::from_secs(30),
            cors: true,
        }
    }

    #[test]
    fn addr_joins_host_and_port() {
        let server = HttpServer::new(state(), "127.0.0.1", 8000);
        assert_eq!(server.addr(), "127.0.0.1:8000");
    }

    #[tokio::test]
    async fn bind_failure_reports_address() {
        let taken = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = taken.local_addr().expect("addr").port();
        let err = HttpServer::new(state(), "127.0.0.1", port)
            .run(std::future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, HttpTransportError::Bind { .. }));
        assert!(err.to_string().contains(&port.to_string()));
    }
}
