//! # twin-mcp
//!
//! MCP method dispatch (APPLICATION layer).
//!
//! `McpHandler` validates a JSON-RPC request, routes `initialize`,
//! `tools/list` and `tools/call`, and always answers with a well-formed
//! JSON-RPC result or error. Transports only feed it requests.

mod dispatch;
pub mod error;
pub mod handler;
pub mod registry;
pub mod tools;

pub use error::ToolError;
pub use handler::{Inbound, JsonRpcOutput, McpHandler, SERVER_NAME};
pub use registry::{RegistryError, ToolHandler, ToolRegistry};
