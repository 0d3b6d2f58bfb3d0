//! `hello_world`: a greeting.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use twin_protocol::mcp::tools::ToolDescriptor;

use crate::error::ToolError;
use crate::registry::ToolHandler;

/// Greets `name`, or the world.
pub struct HelloWorld;

#[async_trait]
impl ToolHandler for HelloWorld {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "hello_world".to_string(),
            description: "A simple tool that responds with a hello world message".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The name to greet (optional)",
                        "default": "World"
                    }
                }
            }),
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let name = match arguments.get("name") {
            None | Some(Value::Null) => "World".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Ok(format!(
            "Hello, {name}! This is a response from the MCP server."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_to_world() {
        let text = HelloWorld.call(&Map::new()).await.expect("call");
        assert_eq!(text, "Hello, World! This is a response from the MCP server.");
    }

    #[tokio::test]
    async fn greets_given_name() {
        let args = json!({"name": "Alice"}).as_object().cloned().expect("obj");
        let text = HelloWorld.call(&args).await.expect("call");
        assert_eq!(text, "Hello, Alice! This is a response from the MCP server.");
    }
}
