//! JSON Schema helpers for MCP tool input validation.

use serde_json::{Map, Value};
use thiserror::Error;

/// Schema validation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema itself is malformed.
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

/// Returns the schema's `required` property names, in declaration order.
pub fn required_fields(schema: &Value) -> Result<Vec<&str>, SchemaError> {
    let required = match schema.get("required") {
        Some(Value::Array(arr)) => arr,
        Some(_) => {
            return Err(SchemaError::InvalidSchema {
                message: "`required` must be an array".to_string(),
            })
        }
        None => return Ok(Vec::new()),
    };

    required
        .iter()
        .map(|field| {
            field.as_str().ok_or_else(|| SchemaError::InvalidSchema {
                message: "required field names must be strings".to_string(),
            })
        })
        .collect()
}

/// Lists the required fields that are absent from `input`.
///
/// A field counts as absent when it is missing, `null`, or an empty string.
pub fn missing_required_fields<'s>(
    schema: &'s Value,
    input: &Map<String, Value>,
) -> Result<Vec<&'s str>, SchemaError> {
    Ok(required_fields(schema)?
        .into_iter()
        .filter(|name| match input.get(*name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn no_required_array_passes() {
        let schema = json!({"properties": {"x": {"type": "string"}}});
        let missing = missing_required_fields(&schema, &Map::new()).expect("valid");
        assert!(missing.is_empty());
    }

    #[test]
    fn reports_missing_in_declaration_order() {
        let schema = json!({"required": ["a", "b", "c"]});
        let missing = missing_required_fields(&schema, &obj(json!({"b": "x"}))).expect("valid");
        assert_eq!(missing, vec!["a", "c"]);
    }

    #[test]
    fn empty_string_and_null_count_as_missing() {
        let schema = json!({"required": ["a", "b"]});
        let missing =
            missing_required_fields(&schema, &obj(json!({"a": "", "b": null}))).expect("valid");
        assert_eq!(missing, vec!["a", "b"]);
    }

    #[test]
    fn non_string_required_entry_is_invalid_schema() {
        let schema = json!({"required": ["a", 3]});
        assert!(missing_required_fields(&schema, &Map::new()).is_err());
    }

    #[test]
    fn required_must_be_array() {
        let schema = json!({"required": "a"});
        assert!(required_fields(&schema).is_err());
    }
}
