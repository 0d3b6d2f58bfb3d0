//! Integration tests for JSON-RPC 2.0 types.

use twin_protocol::{
    error_codes, methods, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, RequestId,
};
use serde_json::json;

#[test]
fn request_serialization() {
    let req = JsonRpcRequest::new(RequestId::from(1), "tools/list", None);
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"jsonrpc\":\"2.0\""));
    assert!(json.contains("\"method\":\"tools/list\""));
    assert!(!json.contains("params"));
}

#[test]
fn request_without_id_or_version_parses() {
    let req: JsonRpcRequest = serde_json::from_str(r#"{"method":"tools/list"}"#).unwrap();
    assert_eq!(req.jsonrpc, "2.0");
    assert!(req.id.is_none());
}

#[test]
fn request_string_id() {
    let req: JsonRpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","id":"abc","method":"initialize"}"#).unwrap();
    assert_eq!(req.id, Some(RequestId::String("abc".into())));
}

#[test]
fn request_without_method_rejected() {
    assert!(serde_json::from_str::<JsonRpcRequest>(r#"{"jsonrpc":"2.0","id":1}"#).is_err());
}

#[test]
fn notification_detection() {
    let notif: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": methods::NOTIFICATIONS_INITIALIZED
    }))
    .unwrap();
    assert!(notif.is_notification());

    let no_id_call: JsonRpcRequest =
        serde_json::from_value(json!({"method": "tools/list"})).unwrap();
    assert!(!no_id_call.is_notification());
}

#[test]
fn response_roundtrip() {
    let resp = JsonRpcResponse::success(Some(RequestId::String("abc".into())), json!({"tools": []}));
    let json = serde_json::to_string(&resp).unwrap();
    let back: JsonRpcResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, Some(RequestId::String("abc".into())));
}

#[test]
fn missing_id_serializes_as_null() {
    let resp = JsonRpcErrorResponse::error(None, error_codes::INTERNAL_ERROR, "boom");
    let value = serde_json::to_value(&resp).unwrap();
    assert!(value["id"].is_null());
    assert!(value.as_object().unwrap().contains_key("id"));
    assert!(value.get("result").is_none());
}

#[test]
fn error_codes_are_reserved_values() {
    assert_eq!(error_codes::METHOD_NOT_FOUND, -32601);
    assert_eq!(error_codes::INVALID_PARAMS, -32602);
    assert_eq!(error_codes::INTERNAL_ERROR, -32603);
}

#[test]
fn any_numeric_id_roundtrips_unchanged() {
    for raw in ["1.5", "18446744073709551615", "-3", "0"] {
        let text = format!(r#"{{"jsonrpc":"2.0","id":{raw},"method":"tools/list"}}"#);
        let req: JsonRpcRequest = serde_json::from_str(&text).unwrap();
        let id = req.id.expect("id");
        assert!(matches!(id, RequestId::Number(_)));

        let resp = JsonRpcResponse::success(Some(id), json!({}));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(&format!(r#""id":{raw}"#)), "{json}");
    }
}
