//! Error types for shelf-storage

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for shelf-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while opening a storage backend.
///
/// Failures of individual store calls are reported as
/// [`shelf_core::Error::StoreFailure`] instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from shelf-core
    #[error("Core error: {0}")]
    Core(#[from] shelf_core::Error),

    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Fixture file could not be read
    #[error("Failed to read fixture {}: {source}", path.display())]
    FixtureIo {
        /// Fixture path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON for the fixture schema
    #[error("Invalid fixture {}: {source}", path.display())]
    FixtureFormat {
        /// Fixture path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Table prefix contains characters that are not allowed in identifiers
    #[error("Invalid table prefix '{0}': only ASCII letters, digits and '_' are allowed")]
    InvalidTablePrefix(String),
}
