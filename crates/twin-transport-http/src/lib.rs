//! HTTP/JSON-RPC transport adapter for the Twin MCP server.
//! Exposes MCP over `POST /mcp` and `GET /sse`, gated by an API-key allow-list.

pub mod auth;
mod error;
pub mod router;
pub mod server;

pub use auth::ApiKeys;
pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
