//! `getdatetime`: the server's local wall-clock time.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde_json::{json, Map, Value};

use twin_protocol::mcp::tools::ToolDescriptor;

use crate::error::ToolError;
use crate::registry::ToolHandler;

const READABLE: &str = "%A, %B %d, %Y at %I:%M:%S %p";
const ISO: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Reports the current local date and time.
pub struct GetDateTime;

impl GetDateTime {
    /// Renders `now` in the requested format. Anything but `"iso"` is readable.
    pub fn render(now: NaiveDateTime, format: &str) -> String {
        let pattern = if format == "iso" { ISO } else { READABLE };
        format!("Current date and time: {}", now.format(pattern))
    }
}

#[async_trait]
impl ToolHandler for GetDateTime {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "getdatetime".to_string(),
            description: "Get the current date and time".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "description": "Output format: 'readable' or 'iso' (optional)",
                        "default": "readable"
                    }
                }
            }),
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let format = arguments
            .get("format")
            .and_then(Value::as_str)
            .unwrap_or("readable");
        Ok(Self::render(Local::now().naive_local(), format))
    }
}
