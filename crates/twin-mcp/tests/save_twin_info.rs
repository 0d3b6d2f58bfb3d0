//! `save_twin_info` against a counting store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use twin_mcp::McpHandler;
use twin_protocol::{JsonRpcRequest, RequestId};
use twin_store::{StoreError, TwinStore};
use twin_types::TwinRecord;

#[derive(Default)]
struct CountingStore {
    upserts: AtomicUsize,
    last: Mutex<Option<TwinRecord>>,
    fail: bool,
}

#[async_trait]
impl TwinStore for CountingStore {
    async fn upsert(&self, record: &TwinRecord) -> Result<(), StoreError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Connection {
                message: "service unavailable".into(),
            });
        }
        *self.last.lock().expect("lock") = Some(record.clone());
        Ok(())
    }

    async fn read(&self, id: &str, partition_key: &str) -> Result<TwinRecord, StoreError> {
        Err(StoreError::NotFound {
            id: id.to_string(),
            partition_key: partition_key.to_string(),
        })
    }

    async fn list(&self) -> Result<Vec<TwinRecord>, StoreError> {
        Ok(Vec::new())
    }
}

fn twin_args() -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Lopez",
        "email": "ana@example.com",
        "telephoneNumber": "+34 600 000 000",
        "countryId": "ES"
    })
}

async fn save(handler: &McpHandler, arguments: Value) -> Value {
    let req = JsonRpcRequest::new(
        RequestId::from(7),
        "tools/call",
        Some(json!({"name": "save_twin_info", "arguments": arguments})),
    );
    handler.dispatch(&req).await.to_value().expect("serialize")
}

#[tokio::test]
async fn success_upserts_once() {
    let store = Arc::new(CountingStore::default());
    let handler = McpHandler::with_store(Some(store.clone() as Arc<dyn TwinStore>));

    let out = save(&handler, twin_args()).await;
    assert_eq!(
        out["result"]["content"][0]["text"],
        "Successfully saved Twin information for Ana Lopez (ID: ana@example.com) in country ES"
    );
    assert_eq!(store.upserts.load(Ordering::SeqCst), 1);

    let record = store.last.lock().expect("lock").clone().expect("record");
    assert_eq!(record.id, "ana@example.com");
    assert_eq!(record.partition_key(), "ES");
    assert_eq!(record.created_at, record.last_modified);
}

#[tokio::test]
async fn missing_email_never_reaches_store() {
    let store = Arc::new(CountingStore::default());
    let handler = McpHandler::with_store(Some(store.clone() as Arc<dyn TwinStore>));

    let mut args = twin_args();
    args.as_object_mut().expect("object").remove("email");
    let out = save(&handler, args).await;

    assert_eq!(out["error"]["code"], -32602);
    let message = out["error"]["message"].as_str().expect("message");
    for field in ["firstName", "lastName", "email", "telephoneNumber", "countryId"] {
        assert!(message.contains(field), "{message} lacks {field}");
    }
    assert_eq!(store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_is_reported() {
    let store = Arc::new(CountingStore {
        fail: true,
        ..CountingStore::default()
    });
    let handler = McpHandler::with_store(Some(store.clone() as Arc<dyn TwinStore>));

    let out = save(&handler, twin_args()).await;
    assert_eq!(out["error"]["code"], -32603);
    let message = out["error"]["message"].as_str().expect("message");
    assert!(message.starts_with("Failed to save Twin information: "));
    assert!(message.contains("service unavailable"));
    assert_eq!(store.upserts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unavailable_store_short_circuits() {
    let handler = McpHandler::with_store(None);
    let out = save(&handler, twin_args()).await;
    assert_eq!(out["error"]["code"], -32603);
    assert_eq!(
        out["error"]["message"],
        "Cosmos DB not available. Please check configuration."
    );
    assert_eq!(out["id"], 7);
}
