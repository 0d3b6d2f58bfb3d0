//! Tool registry: the fixed, ordered set of tools the dispatcher serves.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use twin_protocol::mcp::tools::ToolDescriptor;
use twin_store::TwinStore;

use crate::error::ToolError;
use crate::tools;

/// A named, schema-described operation.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name, description and input schema advertised by `tools/list`.
    fn descriptor(&self) -> ToolDescriptor;

    /// Runs the tool and returns its text result.
    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError>;
}

/// Errors building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two tools share a name.
    #[error("duplicate tool name: {0}")]
    Duplicate(String),
}

/// Ordered tool table with name lookup.
///
/// Built once at startup; never mutated afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    descriptors: Vec<ToolDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tools, in their advertised order.
    ///
    /// `save_twin_info` is always registered; with `store == None` it
    /// reports the store as unavailable.
    pub fn builtin(store: Option<Arc<dyn TwinStore>>) -> Self {
        let mut registry = Self::new();
        let builtins: [Arc<dyn ToolHandler>; 4] = [
            Arc::new(tools::HelloWorld),
            Arc::new(tools::AddNumbers),
            Arc::new(tools::GetDateTime),
            Arc::new(tools::SaveTwinInfo::new(store)),
        ];
        for handler in builtins {
            let registered = registry.register(handler);
            debug_assert!(registered.is_ok(), "built-in tool names collide: {registered:?}");
        }
        registry
    }

    /// Appends a tool.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Duplicate` if the name is already taken.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), RegistryError> {
        let descriptor = handler.descriptor();
        if self.by_name.contains_key(&descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }
        self.by_name
            .insert(descriptor.name.clone(), self.handlers.len());
        self.descriptors.push(descriptor);
        self.handlers.push(handler);
        Ok(())
    }

    /// Looks a tool up by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.by_name.get(name).map(|&i| &self.handlers[i])
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no tool is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
