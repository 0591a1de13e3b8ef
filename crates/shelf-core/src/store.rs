//! Collaborator contracts for the persistence layer.
//!
//! Every method is a read. "Not found" is expressed as `Ok(None)`; any
//! `Err` is a genuine store failure and should carry the operation name via
//! [`Error::store`](crate::Error::store).
//!
//! # Example
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryStore::from_fixture(fixture));
//! let stores = Stores::from_shared(store);
//! let library = Library::new(stores, LibrarySettings::default());
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Book, BookId, BookOrder, ContentField, Document, DocumentId, Identity, MemberId, Page,
    PageRequest, SearchQuery, SearchRow, Tier, TokenRecord,
};

/// Lookup of bearer tokens.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Finds the record for an exact token value.
    async fn find_token(&self, token: &str) -> Result<Option<TokenRecord>>;
}

/// Book metadata and per-book authorization.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Finds a book by id.
    async fn find_book(&self, id: BookId) -> Result<Option<Book>>;

    /// Lists the books visible to `identity`: public books for anonymous
    /// callers, public plus authorized private books for members.
    async fn list_books_for(
        &self,
        identity: Identity,
        page: PageRequest,
        order: BookOrder,
    ) -> Result<Page<Book>>;

    /// Whether `member` holds a role on the book at or above `min_tier`.
    async fn has_access(&self, book_identify: &str, member: MemberId, min_tier: Tier)
    -> Result<bool>;
}

/// Document metadata and stored representations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Finds a document by id.
    async fn find_document(&self, id: DocumentId) -> Result<Option<Document>>;

    /// Finds a document by its slug within a book.
    async fn find_document_by_identify(
        &self,
        book_id: BookId,
        identify: &str,
    ) -> Result<Option<Document>>;

    /// Reads a stored representation. Absent fields read as `""`.
    async fn field(&self, document_id: DocumentId, field: ContentField) -> Result<String>;
}

/// Identity-scoped keyword search. Ranking belongs to the implementation.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Runs a search and returns one page of rows plus the full match count.
    async fn search_documents(
        &self,
        query: &SearchQuery,
        identity: Identity,
    ) -> Result<Page<SearchRow>>;
}

/// The set of store handles a request pipeline needs.
#[derive(Clone)]
pub struct Stores {
    pub tokens: Arc<dyn TokenStore>,
    pub books: Arc<dyn BookStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub search: Arc<dyn SearchStore>,
}

impl Stores {
    /// Builds the handle set from one backend implementing every contract.
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: TokenStore + BookStore + DocumentStore + SearchStore + 'static,
    {
        Self {
            tokens: store.clone(),
            books: store.clone(),
            documents: store.clone(),
            search: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
