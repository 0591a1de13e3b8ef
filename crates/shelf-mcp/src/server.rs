//! The MCP server.
//!
//! [`ShelfMcpServer`] implements rmcp's `ServerHandler` by delegating tool
//! listing and dispatch to a [`ToolRegistry`]. Each call is raced against the
//! request's cancellation token and an optional timeout.

use std::sync::Arc;
use std::time::Duration;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;

const DEFAULT_INSTRUCTIONS: &str = "Read-only access to a document repository. \
Use list_books to see the books you can read, search_docs to find documents by keyword, \
and get_doc to fetch a document as markdown, html or text. Pass member_token to reach \
private books.";

/// Argument name carrying the caller's credential.
pub const MEMBER_TOKEN_ARG: &str = "member_token";

/// MCP server over a tool registry.
#[derive(Clone)]
pub struct ShelfMcpServer {
    registry: Arc<dyn ToolRegistry>,
    name: String,
    version: String,
    instructions: String,
    timeout: Option<Duration>,
}

impl ShelfMcpServer {
    /// Serve the tools in `registry`.
    pub fn new<R: ToolRegistry + 'static>(registry: R) -> Self {
        Self {
            registry: Arc::new(registry),
            name: crate::config::PROJECT_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            timeout: None,
        }
    }

    /// Name reported in the initialize handshake.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Version reported in the initialize handshake.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Instructions shown to the client.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Abort tool calls that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registry being served.
    pub fn registry(&self) -> &dyn ToolRegistry {
        self.registry.as_ref()
    }

    /// Run one tool call to completion, bounded by the configured timeout.
    ///
    /// Unknown tools are a protocol error; everything else comes back as a
    /// tool result.
    pub async fn dispatch(
        &self,
        name: &str,
        args: JsonObject,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let Some(call) = self.registry.call(name, Value::Object(args)) else {
            return Err(ErrorData::invalid_params(
                format!("Unknown tool: {name}"),
                None,
            ));
        };
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    log::warn!("Tool {name} timed out after {}s", limit.as_secs());
                    Ok(CallToolResult::error(vec![Content::text(format!(
                        "Request timed out after {}s",
                        limit.as_secs()
                    ))]))
                }
            },
            None => call.await,
        }
    }

    /// Serve over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        use rmcp::ServiceExt;

        log::info!(
            "Serving {} tools over stdio as {} v{}",
            self.registry.tool_count(),
            self.name,
            self.version
        );
        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(Error::transport)?;
        service.waiting().await.map_err(Error::transport)?;
        Ok(())
    }

    /// Serve streamable HTTP at `/mcp` on `addr` until Ctrl-C.
    #[cfg(feature = "http")]
    pub async fn serve_http(self, addr: &str) -> Result<()> {
        use rmcp::transport::streamable_http_server::{
            StreamableHttpService, session::local::LocalSessionManager,
        };

        let server = self.clone();
        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            LocalSessionManager::default().into(),
            Default::default(),
        );
        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::transport(format!("cannot bind {addr}: {e}")))?;

        log::info!(
            "Serving {} tools over HTTP at http://{addr}/mcp as {} v{}",
            self.registry.tool_count(),
            self.name,
            self.version
        );
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                log::info!("Shutting down");
            })
            .await
            .map_err(Error::transport)
    }

    /// Without the `http` feature the HTTP transport is unavailable.
    #[cfg(not(feature = "http"))]
    pub async fn serve_http(self, addr: &str) -> Result<()> {
        Err(Error::config(format!(
            "cannot serve HTTP on {addr}: shelf-mcp was built without the `http` feature"
        )))
    }
}

impl std::fmt::Debug for ShelfMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShelfMcpServer")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("tools", &self.registry.tool_count())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fill in `member_token` from an `Authorization: Bearer` header when the
/// caller did not pass one.
pub fn inject_bearer_token(args: &mut JsonObject, parts: Option<&http::request::Parts>) {
    let present = args
        .get(MEMBER_TOKEN_ARG)
        .and_then(Value::as_str)
        .is_some_and(|t| !t.trim().is_empty());
    if present {
        return;
    }
    if let Some(token) = parts.and_then(shelf_auth::token_from_parts) {
        args.insert(MEMBER_TOKEN_ARG.to_string(), Value::String(token.to_string()));
    }
}

impl ServerHandler for ShelfMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.name.clone();
        info.server_info.version = self.version.clone();
        info.instructions = Some(self.instructions.clone());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let name = request.name.to_string();
        let mut args = request.arguments.unwrap_or_default();
        inject_bearer_token(&mut args, context.extensions.get::<http::request::Parts>());

        log::debug!("call_tool {name}");
        tokio::select! {
            result = self.dispatch(&name, args) => result,
            _ = context.ct.cancelled() => {
                log::debug!("call_tool {name} cancelled by client");
                Err(ErrorData::internal_error(format!("Request cancelled: {name}"), None))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
