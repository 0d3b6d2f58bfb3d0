//! MCP request handler: routes JSON-RPC methods to their implementations.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use twin_protocol::methods;
use twin_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    RequestId,
};
use twin_store::TwinStore;

use crate::dispatch::{initialize, tools_call, tools_list};
use crate::registry::ToolRegistry;

/// Name reported in the `initialize` result.
pub const SERVER_NAME: &str = "simple-mcp-server";

/// Either a success or error JSON-RPC response.
#[derive(Debug, Clone)]
pub enum JsonRpcOutput {
    /// Successful response.
    Success(JsonRpcResponse),
    /// Error response.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Serializes the output to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Success(r) => serde_json::to_string(r),
            Self::Error(r) => serde_json::to_string(r),
        }
    }

    /// Serializes the output to a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Success(r) => serde_json::to_value(r),
            Self::Error(r) => serde_json::to_value(r),
        }
    }

    /// The correlated request id, `None` when the request had none.
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Self::Success(r) => r.id.as_ref(),
            Self::Error(r) => r.id.as_ref(),
        }
    }

    /// Error code, if this is an error response.
    pub fn error_code(&self) -> Option<i32> {
        match self {
            Self::Success(_) => None,
            Self::Error(r) => Some(r.error.code),
        }
    }
}

/// Handles MCP JSON-RPC requests.
///
/// Cheap to clone; the registry is shared read-only, so concurrent
/// dispatch needs no coordination.
#[derive(Clone)]
pub struct McpHandler {
    registry: Arc<ToolRegistry>,
}

impl McpHandler {
    /// Creates a handler over an existing registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a handler serving the built-in tools.
    pub fn with_store(store: Option<Arc<dyn TwinStore>>) -> Self {
        Self::new(Arc::new(ToolRegistry::builtin(store)))
    }

    /// The tools this handler serves.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatches a JSON-RPC request to the appropriate handler.
    ///
    /// Never fails: every outcome is a JSON-RPC result or error carrying
    /// the request's id.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        debug!(method = %request.method, id = ?id, "dispatching");
        match request.method.as_str() {
            methods::INITIALIZE => initialize::handle_initialize(id),
            methods::TOOLS_LIST => tools_list::handle_tools_list(id, &self.registry),
            methods::TOOLS_CALL => {
                tools_call::handle_tools_call(id, request.params.as_ref(), &self.registry).await
            }
            other => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Unknown method: {other}"),
            )),
        }
    }

    /// Like [`dispatch`](Self::dispatch), but answers -32603 once `limit` elapses.
    pub async fn dispatch_within(&self, request: &JsonRpcRequest, limit: Duration) -> JsonRpcOutput {
        match tokio::time::timeout(limit, self.dispatch(request)).await {
            Ok(output) => output,
            Err(_) => {
                warn!(method = %request.method, id = ?request.id, "request timed out");
                JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    request.id.clone(),
                    error_codes::INTERNAL_ERROR,
                    format!(
                        "Internal error: request timed out after {}s",
                        limit.as_secs()
                    ),
                ))
            }
        }
    }

    /// Handles a client notification. Notifications never get a response.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATIONS_INITIALIZED => debug!("client initialized"),
            other => trace!(method = %other, "ignoring notification"),
        }
    }
}

/// A raw inbound message after envelope validation.
#[derive(Debug)]
pub enum Inbound {
    /// A request that needs a response.
    Request(JsonRpcRequest),
    /// A notification; no response is sent.
    Notification(JsonRpcNotification),
    /// The envelope was rejected; send this error back.
    Rejected(JsonRpcOutput),
}

impl Inbound {
    /// Parses one JSON text into an inbound message.
    ///
    /// Invalid JSON is -32700 with `id: null`. A non-object, a missing
    /// string `method` or a mistyped field is -32600, answered with the
    /// envelope's `id` when that id is itself well-formed.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(e) => Self::reject(None, error_codes::PARSE_ERROR, format!("Parse error: {e}")),
        }
    }

    /// Classifies an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        let id = value
            .get("id")
            .and_then(|raw| RequestId::deserialize(raw).ok());
        if !value.get("method").is_some_and(Value::is_string) {
            return Self::reject(
                id,
                error_codes::INVALID_REQUEST,
                "Invalid Request: expected an object with a string 'method'",
            );
        }
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) if request.is_notification() => Self::Notification(JsonRpcNotification {
                jsonrpc: request.jsonrpc,
                method: request.method,
                params: request.params,
            }),
            Ok(request) => Self::Request(request),
            Err(e) => Self::reject(id, error_codes::INVALID_REQUEST, format!("Invalid Request: {e}")),
        }
    }

    fn reject(id: Option<RequestId>, code: i32, message: impl Into<String>) -> Self {
        Self::Rejected(JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id, code, message,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handler() -> McpHandler {
        McpHandler::with_store(None)
    }

    #[tokio::test]
    async fn unknown_method() {
        let req = JsonRpcRequest::new(RequestId::from(9), "resources/list", None);
        let out = handler().dispatch(&req).await;
        let JsonRpcOutput::Error(e) = out else {
            panic!("expected error");
        };
        assert_eq!(e.error.code, -32601);
        assert_eq!(e.error.message, "Unknown method: resources/list");
        assert_eq!(e.id, Some(RequestId::from(9)));
    }

    #[tokio::test]
    async fn string_id_is_echoed() {
        let req = JsonRpcRequest::new(RequestId::String("abc".into()), "tools/list", None);
        let out = handler().dispatch(&req).await;
        assert_eq!(out.id(), Some(&RequestId::String("abc".into())));
        assert!(out.error_code().is_none());
    }

    #[test]
    fn output_serializes_null_id() {
        let out = JsonRpcOutput::Error(JsonRpcErrorResponse::error(None, -32700, "bad"));
        let v = out.to_value().expect("value");
        assert_eq!(v["id"], Value::Null);
        assert_eq!(v["jsonrpc"], "2.0");
    }

    #[test]
    fn parse_classifies_messages() {
        assert!(matches!(Inbound::parse("{nope"), Inbound::Rejected(o) if o.error_code() == Some(-32700)));
        assert!(matches!(Inbound::parse("[1,2]"), Inbound::Rejected(o) if o.error_code() == Some(-32600)));
        assert!(matches!(
            Inbound::parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#),
            Inbound::Notification(_)
        ));
        assert!(matches!(
            Inbound::parse(r#"{"jsonrpc":"2.0","method":"tools/list"}"#),
            Inbound::Request(r) if r.id.is_none()
        ));
        assert!(matches!(
            Inbound::from_value(json!({"id": 1, "method": "initialize"})),
            Inbound::Request(_)
        ));
    }

    #[test]
    fn rejected_envelope_keeps_wellformed_id() {
        let Inbound::Rejected(out) =
            Inbound::parse(r#"{"jsonrpc":2,"id":"req-7","method":"tools/list"}"#)
        else {
            panic!("expected rejection");
        };
        assert_eq!(out.error_code(), Some(-32600));
        assert_eq!(out.id(), Some(&RequestId::from("req-7")));

        let Inbound::Rejected(out) = Inbound::from_value(json!({"id": 3})) else {
            panic!("expected rejection");
        };
        assert_eq!(out.id(), Some(&RequestId::from(3)));

        let Inbound::Rejected(out) = Inbound::from_value(json!({"id": [1], "method": "x"})) else {
            panic!("expected rejection");
        };
        assert!(out.id().is_none());
    }

    #[tokio::test]
    async fn fractional_and_large_ids_are_echoed() {
        for text in [
            r#"{"jsonrpc":"2.0","id":1.5,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"tools/list"}"#,
        ] {
            let Inbound::Request(req) = Inbound::parse(text) else {
                panic!("expected request for {text}");
            };
            let sent: Value = serde_json::from_str(text).expect("json");
            let out = handler().dispatch(&req).await.to_value().expect("value");
            assert_eq!(out["id"], sent["id"]);
            assert!(out.get("error").is_none());
        }
    }
}
