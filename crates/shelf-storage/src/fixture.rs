//! JSON fixture format for the in-memory store.
//!
//! ```json
//! {
//!   "books": [{ "id": 1, "name": "Guide", "identify": "guide", "order_index": 0 }],
//!   "documents": [{ "id": 5, "name": "Intro", "book_id": 1, "identify": "intro",
//!                   "release": "<p>Hi</p>", "markdown": "# Hi" }],
//!   "tokens": [{ "token": "abc", "member_id": 7, "is_valid": true }],
//!   "grants": [{ "book_id": 1, "member_id": 7, "role": "observer" }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use shelf_acl::Role;
use shelf_core::{Book, BookId, Document, MemberId, TokenRecord};

use crate::error::{Error, Result};

/// Complete contents of an in-memory store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    /// Books.
    #[serde(default)]
    pub books: Vec<Book>,
    /// Documents with their stored representations.
    #[serde(default)]
    pub documents: Vec<FixtureDocument>,
    /// Member tokens.
    #[serde(default)]
    pub tokens: Vec<FixtureToken>,
    /// Member roles on books.
    #[serde(default)]
    pub grants: Vec<RoleGrant>,
}

/// A document plus the fields kept in the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDocument {
    /// Document metadata.
    #[serde(flatten)]
    pub document: Document,
    /// Stored markdown source.
    #[serde(default)]
    pub markdown: String,
    /// Stored plain-text content.
    #[serde(default)]
    pub content: String,
}

/// A token value and its record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureToken {
    /// Opaque token value.
    pub token: String,
    /// Stored record.
    #[serde(flatten)]
    pub record: TokenRecord,
}

/// A member's role on a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGrant {
    /// Book the role applies to.
    pub book_id: BookId,
    /// Member holding the role.
    pub member_id: MemberId,
    /// Granted role.
    pub role: Role,
}

impl Fixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::FixtureFormat {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a fixture file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::FixtureIo {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json, path)
    }
}
