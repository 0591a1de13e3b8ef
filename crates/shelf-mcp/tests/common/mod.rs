//! Shared setup for the tool tests: a server over the JSON fixture in
//! `tests/fixtures/library.json`.

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::Value;
use shelf_mcp::config::{BackendKind, DatabaseSettings};
use shelf_mcp::model::{CallToolResult, JsonObject};
use shelf_mcp::{ShelfConfig, ShelfMcpServer, bootstrap};

pub const MEMBER_TOKEN: &str = "member-token";
pub const OUTSIDER_TOKEN: &str = "outsider-token";

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("library.json")
}

pub fn memory_config() -> ShelfConfig {
    ShelfConfig {
        database: DatabaseSettings {
            backend: BackendKind::Memory,
            fixture: Some(fixture_path()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub async fn server_with(config: &ShelfConfig) -> ShelfMcpServer {
    let stores = bootstrap::open_stores(&config.database).await.unwrap();
    bootstrap::build_server(config, stores)
}

pub async fn server() -> ShelfMcpServer {
    server_with(&memory_config()).await
}

pub fn args(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap_or_default()
}

/// Text of the first content item.
pub fn text(result: &CallToolResult) -> String {
    result.content[0].as_text().unwrap().text.clone()
}

pub async fn call(server: &ShelfMcpServer, name: &str, value: Value) -> CallToolResult {
    server.dispatch(name, args(value)).await.unwrap()
}
