//! Wiring from configuration to a running server.

use std::sync::Arc;

use shelf_core::Stores;
use shelf_query::Library;
use shelf_storage::{MemoryStore, MySqlStore};

use crate::config::{BackendKind, DatabaseSettings, ShelfConfig};
use crate::error::Result;
use crate::registry::{CompositeRegistry, ToolRegistry};
use crate::server::ShelfMcpServer;
use crate::tools::{HealthTools, LibraryTools};

/// Open the configured storage backend.
pub async fn open_stores(database: &DatabaseSettings) -> Result<Stores> {
    match database.backend {
        BackendKind::Memory => {
            let store = match &database.fixture {
                Some(path) => {
                    let store = MemoryStore::load(path).await?;
                    log::info!(
                        "Loaded {} books and {} documents from {}",
                        store.book_count(),
                        store.document_count(),
                        path.display()
                    );
                    store
                }
                None => {
                    log::warn!("Memory backend without a fixture; the library is empty");
                    MemoryStore::new()
                }
            };
            Ok(Stores::from_shared(Arc::new(store)))
        }
        BackendKind::Mysql => {
            let store = MySqlStore::connect(&database.mysql_settings()?).await?;
            log::info!("Connected to {}", database.describe());
            Ok(Stores::from_shared(Arc::new(store)))
        }
    }
}

/// Build the server with the document tools and `health`.
pub fn build_server(config: &ShelfConfig, stores: Stores) -> ShelfMcpServer {
    let library = LibraryTools::new(Library::new(stores, config.library_settings()));
    let version = env!("CARGO_PKG_VERSION");
    let health = HealthTools::new(
        config.server.name.clone(),
        version,
        config.database.backend.as_str(),
        library.tool_count() + 1,
    );
    let registry = CompositeRegistry::new().add(library).add(health);

    ShelfMcpServer::new(registry)
        .with_name(config.server.name.clone())
        .with_version(version)
        .with_timeout(config.server.request_timeout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_without_fixture() {
        let config = ShelfConfig {
            database: DatabaseSettings {
                backend: BackendKind::Memory,
                ..Default::default()
            },
            ..Default::default()
        };
        let stores = open_stores(&config.database).await.unwrap();
        let server = build_server(&config, stores);
        let names: Vec<_> = server
            .registry()
            .tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names, ["list_books", "get_doc", "search_docs", "health"]);
    }

    #[tokio::test]
    async fn test_missing_fixture_is_error() {
        let database = DatabaseSettings {
            backend: BackendKind::Memory,
            fixture: Some("/nonexistent/shelf-fixture.json".into()),
            ..Default::default()
        };
        assert!(open_stores(&database).await.is_err());
    }
}
