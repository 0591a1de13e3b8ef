//! Error types for shelf-mcp

use std::path::{Path, PathBuf};

use rmcp::model::{CallToolResult, Content};
use thiserror::Error;

/// Result type alias for shelf-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running the server.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from shelf-core
    #[error("Core error: {0}")]
    Core(#[from] shelf_core::Error),

    /// Error from shelf-storage
    #[error("Storage error: {0}")]
    Storage(#[from] shelf_storage::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// MCP transport failed to start or stopped abnormally
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Wrap an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl std::fmt::Display) -> Self {
        Error::Transport(message.to_string())
    }
}

/// Converts domain errors into MCP tool results.
///
/// Domain failures reach the agent as an error *result* carrying a readable
/// message, never as a protocol fault.
pub trait McpErrorExt {
    /// Render as an `is_error` tool result.
    fn into_tool_result(self) -> CallToolResult;
}

impl McpErrorExt for shelf_core::Error {
    fn into_tool_result(self) -> CallToolResult {
        if self.kind() == shelf_core::ErrorKind::StoreFailure {
            log::warn!("Tool call failed: {self}");
        } else {
            log::debug!("Tool call rejected: {self}");
        }
        CallToolResult::error(vec![Content::text(self.to_string())])
    }
}
