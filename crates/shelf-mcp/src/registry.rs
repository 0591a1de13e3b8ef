//! Tool registration and dispatch.
//!
//! A [`ToolRegistry`] lists tool definitions and turns a `(name, args)` pair
//! into a future. [`ShelfMcpServer`](crate::ShelfMcpServer) delegates both
//! `list_tools` and `call_tool` to the registry it holds, so the server never
//! needs to know which tools exist.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde_json::{Map, Value};

/// Future returned by a tool dispatch.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send>>;

/// Registers and dispatches MCP tools.
pub trait ToolRegistry: Send + Sync {
    /// Definitions of every tool this registry serves.
    fn tools(&self) -> Vec<Tool>;

    /// Start a call to `name`, or `None` if this registry does not serve it.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of tools served.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Whether `name` is served here.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }
}

/// Several registries behind one. The first registry that knows a tool
/// name wins.
#[derive(Default)]
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// An empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-registry.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        self.registries
            .iter()
            .find(|r| r.has_tool(name))
            .and_then(|r| r.call(name, args))
    }
}

/// Tool definition with a JSON-schema object for its input.
pub fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    let input_schema = match schema {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Tool::new(name.to_string(), description.to_string(), Arc::new(input_schema))
}

// ============================================================================
// Tests
// ============================================================================
