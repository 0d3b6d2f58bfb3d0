//! Handles the `initialize` MCP method.

use twin_protocol::mcp::initialize::{
    InitializeResult, ServerCapabilities, ServerInfo, ToolCapability, PROTOCOL_VERSION,
};
use twin_protocol::RequestId;

use crate::handler::{JsonRpcOutput, SERVER_NAME};

/// Returns the fixed server capabilities. Params are not inspected.
pub(crate) fn handle_initialize(id: Option<RequestId>) -> JsonRpcOutput {
    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolCapability {}),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };
    super::success(id, &result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_tools_capability() {
        let out = handle_initialize(Some(RequestId::from(1)));
        let JsonRpcOutput::Success(resp) = out else {
            panic!("expected success");
        };
        assert_eq!(resp.result["protocolVersion"], "2024-11-05");
        assert_eq!(resp.result["capabilities"]["tools"], serde_json::json!({}));
        assert_eq!(resp.result["serverInfo"]["name"], "simple-mcp-server");
    }
}
