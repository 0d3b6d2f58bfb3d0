//! `add_numbers`: sums two JSON numbers, keeping integer/float typing.

use async_trait::async_trait;
use serde_json::{json, Map, Number, Value};

use twin_protocol::mcp::tools::ToolDescriptor;

use crate::error::ToolError;
use crate::registry::ToolHandler;

/// Adds `a` and `b`; a missing operand counts as 0.
pub struct AddNumbers;

#[async_trait]
impl ToolHandler for AddNumbers {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "add_numbers".to_string(),
            description: "Add two numbers together and return the result".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "a": { "type": "number", "description": "The first number to add" },
                    "b": { "type": "number", "description": "The second number to add" }
                },
                "required": ["a", "b"]
            }),
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let a = operand(arguments, "a")?;
        let b = operand(arguments, "b")?;
        let sum = add(&a, &b)?;
        Ok(format!(
            "The sum of {} + {} = {}",
            format_number(&a),
            format_number(&b),
            format_number(&sum)
        ))
    }
}

fn operand(arguments: &Map<String, Value>, key: &str) -> Result<Number, ToolError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(Number::from(0)),
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(ToolError::Internal(format!(
            "argument '{key}' must be a number, got {other}"
        ))),
    }
}

/// Integer + integer stays integral unless it overflows; anything else is f64.
fn add(a: &Number, b: &Number) -> Result<Number, ToolError> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Ok(Number::from(sum));
        }
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        if let Some(sum) = x.checked_add(y) {
            return Ok(Number::from(sum));
        }
    }
    let x = a.as_f64().unwrap_or_default();
    let y = b.as_f64().unwrap_or_default();
    Number::from_f64(x + y)
        .ok_or_else(|| ToolError::Internal("sum is not a finite number".to_string()))
}

/// Integers print bare, floats always carry a fractional part (`8.0`).
fn format_number(n: &Number) -> String {
    match (n.is_f64(), n.as_f64()) {
        (true, Some(f)) => {
            let s = f.to_string();
            if s.contains('.') {
                s
            } else {
                format!("{s}.0")
            }
        }
        _ => n.to_string(),
    }
}
