//! MCP server for the Shelf document repository.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        shelf-mcp                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait: tool registration and dispatch         │
//! │  CompositeRegistry: combine several tool sources            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ShelfMcpServer: implements ServerHandler (stdio, http)     │
//! │  ShelfConfig: TOML config with DB_* env overrides           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpErrorExt: shelf_core::Error into a tool error result    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tools:                                                     │
//! │  ├── list_books, get_doc, search_docs                       │
//! │  └── health                                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_mcp::{ShelfConfig, bootstrap};
//!
//! let config = ShelfConfig::load(None)?;
//! let stores = bootstrap::open_stores(&config.database).await?;
//! bootstrap::build_server(&config, stores).serve_stdio().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

pub use config::{BackendKind, ShelfConfig, Transport};
pub use error::{Error, McpErrorExt, Result};
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult, make_tool};
pub use server::{ShelfMcpServer, inject_bearer_token};
pub use tools::{HealthResponse, HealthTools, LibraryTools};

pub use rmcp::model;
