//! Handles the `tools/call` MCP method.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use twin_protocol::mcp::tools::ToolsCallResult;
use twin_protocol::{error_codes, JsonRpcErrorResponse, RequestId};

use crate::error::ToolError;
use crate::handler::JsonRpcOutput;
use crate::registry::ToolRegistry;

/// Handles the `tools/call` request.
pub(crate) async fn handle_tools_call(
    id: Option<RequestId>,
    params: Option<&Value>,
    registry: &ToolRegistry,
) -> JsonRpcOutput {
    // 1. Parse params
    let (name, arguments) = match parse_params(params) {
        Ok(parsed) => parsed,
        Err(message) => {
            return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {message}"),
            ));
        }
    };

    // 2. Resolve tool
    let Some(handler) = registry.get(name) else {
        debug!(tool = %name, "unknown tool");
        return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Unknown tool: {name}"),
        ));
    };

    // 3. Execute, containing panics at this boundary
    debug!(tool = %name, "executing tool");
    let outcome = AssertUnwindSafe(handler.call(&arguments))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(ToolError::Internal(panic_message(payload.as_ref()))));

    match outcome {
        Ok(text) => super::success(id, &ToolsCallResult::text(text)),
        Err(e) => {
            warn!(tool = %name, code = e.code(), error = %e, "tool call failed");
            JsonRpcOutput::Error(JsonRpcErrorResponse::error(id, e.code(), e.to_string()))
        }
    }
}

fn parse_params(params: Option<&Value>) -> Result<(&str, Map<String, Value>), String> {
    let object = match params {
        None | Some(Value::Null) => return Err("missing tool 'name'".to_string()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err("params must be an object".to_string()),
    };
    let name = match object.get("name") {
        Some(Value::String(name)) => name.as_str(),
        Some(_) => return Err("'name' must be a string".to_string()),
        None => return Err("missing tool 'name'".to_string()),
    };
    let arguments = match object.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(args)) => args.clone(),
        Some(_) => return Err("'arguments' must be an object".to_string()),
    };
    Ok((name, arguments))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
