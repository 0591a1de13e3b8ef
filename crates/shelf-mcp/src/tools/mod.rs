//! MCP tools served by Shelf.

pub mod health;
pub mod library;

pub use health::{HealthResponse, HealthTools};
pub use library::LibraryTools;
