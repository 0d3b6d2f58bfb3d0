//! `save_twin_info`: validates a person profile and upserts it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use twin_protocol::mcp::tools::ToolDescriptor;
use twin_protocol::schema;
use twin_store::TwinStore;
use twin_types::{ErrorKind, TwinError, TwinProfile, TwinRecord};

use crate::error::ToolError;
use crate::registry::ToolHandler;

/// Message returned when no store was configured at startup.
pub const STORE_UNAVAILABLE: &str = "Cosmos DB not available. Please check configuration.";

const REQUIRED: [&str; 5] = ["firstName", "lastName", "email", "telephoneNumber", "countryId"];

/// Persists a Twin profile keyed by email, partitioned by country.
pub struct SaveTwinInfo {
    store: Option<Arc<dyn TwinStore>>,
}

impl SaveTwinInfo {
    /// `None` means the store could not be initialized; calls then fail.
    pub fn new(store: Option<Arc<dyn TwinStore>>) -> Self {
        Self { store }
    }
}

/// Field value as text; non-string scalars keep their JSON rendering.
fn text(arguments: &Map<String, Value>, key: &str) -> String {
    match arguments.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn parse_record(schema: &Value, arguments: &Map<String, Value>) -> Result<TwinRecord, TwinError> {
    let missing = schema::missing_required_fields(schema, arguments)
        .map_err(|e| TwinError::new(ErrorKind::Internal, e.to_string()))?;
    if !missing.is_empty() {
        debug!(?missing, "save_twin_info rejected");
        return Err(TwinError::invalid_input(format!(
            "Missing required fields: {}",
            REQUIRED.join(", ")
        ))
        .with_context(format!("absent: {}", missing.join(", "))));
    }

    let profile = TwinProfile {
        first_name: text(arguments, "firstName"),
        last_name: text(arguments, "lastName"),
        email: text(arguments, "email"),
        telephone_number: text(arguments, "telephoneNumber"),
    };
    Ok(TwinRecord::new(profile, text(arguments, "countryId"), Utc::now()))
}

#[async_trait]
impl ToolHandler for SaveTwinInfo {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "save_twin_info".to_string(),
            description: "Save Twin Human information to Cosmos DB".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "firstName": { "type": "string", "description": "First name of the person" },
                    "lastName": { "type": "string", "description": "Last name of the person" },
                    "email": { "type": "string", "description": "Email address (used as the record id)" },
                    "telephoneNumber": { "type": "string", "description": "Telephone number" },
                    "countryId": { "type": "string", "description": "Country identifier (partition key)" }
                },
                "required": REQUIRED
            }),
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ToolError::Unavailable(STORE_UNAVAILABLE.to_string()))?;

        let record = parse_record(&self.descriptor().input_schema, arguments)?;
        store.upsert(&record).await.map_err(ToolError::Persistence)?;

        info!(
            id = %record.id,
            partition = %record.country_id,
            "twin record saved"
        );
        Ok(format!(
            "Successfully saved Twin information for {} {} (ID: {}) in country {}",
            record.profile.first_name, record.profile.last_name, record.id, record.country_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twin_store::MemoryTwinStore;

    fn args(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("object")
    }

    fn alice() -> Map<String, Value> {
        args(json!({
            "firstName": "Alice",
            "lastName": "Smith",
            "email": "alice@example.com",
            "telephoneNumber": "+1-555-0100",
            "countryId": "US"
        }))
    }

    #[tokio::test]
    async fn unavailable_without_store() {
        let err = SaveTwinInfo::new(None).call(&alice()).await.unwrap_err();
        assert!(matches!(err, ToolError::Unavailable(_)));
        assert_eq!(err.to_string(), STORE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unavailable_wins_over_validation() {
        let err = SaveTwinInfo::new(None).call(&Map::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::Unavailable(_)));
    }

    #[tokio::test]
    async fn saves_record() {
        let store = Arc::new(MemoryTwinStore::new());
        let tool = SaveTwinInfo::new(Some(store.clone() as Arc<dyn TwinStore>));
        let text = tool.call(&alice()).await.expect("call");
        assert_eq!(
            text,
            "Successfully saved Twin information for Alice Smith (ID: alice@example.com) in country US"
        );
        let saved = store.read("alice@example.com", "US").await.expect("read");
        assert_eq!(saved.profile.telephone_number, "+1-555-0100");
    }

    #[tokio::test]
    async fn empty_field_is_missing() {
        let store = Arc::new(MemoryTwinStore::new());
        let mut input = alice();
        input.insert("email".into(), json!(""));
        let err = SaveTwinInfo::new(Some(store.clone() as Arc<dyn TwinStore>))
            .call(&input)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
        assert_eq!(
            err.to_string(),
            "Missing required fields: firstName, lastName, email, telephoneNumber, countryId"
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn numeric_fields_are_saved_as_text() {
        let store = Arc::new(MemoryTwinStore::new());
        let mut input = alice();
        input.insert("telephoneNumber".into(), json!(5550100));
        input.insert("countryId".into(), json!(34));
        let text = SaveTwinInfo::new(Some(store.clone() as Arc<dyn TwinStore>))
            .call(&input)
            .await
            .expect("numeric values are present");
        assert!(text.ends_with("in country 34"));
        let saved = store.read("alice@example.com", "34").await.expect("read");
        assert_eq!(saved.profile.telephone_number, "5550100");
    }

    #[tokio::test]
    async fn null_field_is_missing() {
        let mut input = alice();
        input.insert("lastName".into(), Value::Null);
        let err = SaveTwinInfo::new(Some(Arc::new(MemoryTwinStore::new()) as Arc<dyn TwinStore>))
            .call(&input)
            .await
            .unwrap_err();
        assert_eq!(err.code(), -32602);
    }
}
