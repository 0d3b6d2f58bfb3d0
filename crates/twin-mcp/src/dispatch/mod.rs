//! MCP method dispatch functions.
//!
//! Each sub-module handles one MCP method as a free function, keeping
//! `McpHandler` itself thin (struct + routing only).

pub(crate) mod initialize;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

use serde::Serialize;

use twin_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};

use crate::handler::JsonRpcOutput;

/// Serializes a result payload, turning serializer failures into -32603.
pub(crate) fn success<T: Serialize>(id: Option<RequestId>, result: &T) -> JsonRpcOutput {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Internal error: {e}"),
        )),
    }
}
