//! Handles the `tools/list` MCP method.

use twin_protocol::mcp::tools::ToolsListResult;
use twin_protocol::RequestId;

use crate::handler::JsonRpcOutput;
use crate::registry::ToolRegistry;

/// Lists every registered tool in registration order.
pub(crate) fn handle_tools_list(id: Option<RequestId>, registry: &ToolRegistry) -> JsonRpcOutput {
    let result = ToolsListResult {
        tools: registry.descriptors().to_vec(),
    };
    super::success(id, &result)
}
