//! The `health` tool.

use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::registry::{ToolRegistry, ToolResult, make_tool};

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server can answer.
    pub status: String,
    /// Server name.
    pub server_name: String,
    /// Server version.
    pub version: String,
    /// Storage backend in use (`mysql` or `memory`).
    pub backend: String,
    /// Number of registered tools, this one included.
    pub tool_count: usize,
}

/// Serves the `health` tool from metadata captured at startup.
#[derive(Debug, Clone)]
pub struct HealthTools {
    response: HealthResponse,
}

impl HealthTools {
    /// `total_tool_count` should include the health tool itself.
    pub fn new(
        server_name: impl Into<String>,
        version: impl Into<String>,
        backend: impl Into<String>,
        total_tool_count: usize,
    ) -> Self {
        Self {
            response: HealthResponse {
                status: "healthy".to_string(),
                server_name: server_name.into(),
                version: version.into(),
                backend: backend.into(),
                tool_count: total_tool_count,
            },
        }
    }
}

impl ToolRegistry for HealthTools {
    fn tools(&self) -> Vec<Tool> {
        vec![make_tool(
            "health",
            "Check server health, version and storage backend",
            json!({ "type": "object", "properties": {} }),
        )]
    }

    fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
        if name != "health" {
            return None;
        }
        let response = self.response.clone();
        Some(Box::pin(async move {
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }))
    }
}
