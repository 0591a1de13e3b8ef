//! In-memory store.
//!
//! Holds books, documents, tokens and role grants in plain maps behind a
//! `RwLock`. Used for tests, demos and the `memory` backend. Every trait
//! call bumps a query counter so callers can assert on store traffic.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shelf_acl::Role;
use shelf_core::{
    Book, BookId, BookOrder, BookStore, ContentField, Document, DocumentId, DocumentStore, Error,
    Identity, MemberId, Page, PageRequest, Result, SearchQuery, SearchRow, SearchStore, Tier,
    TokenRecord, TokenStore,
};

use crate::fixture::Fixture;

#[derive(Debug, Clone)]
struct StoredDocument {
    document: Document,
    markdown: String,
    content: String,
}

#[derive(Debug, Default)]
struct Inner {
    books: BTreeMap<BookId, Book>,
    documents: BTreeMap<DocumentId, StoredDocument>,
    tokens: HashMap<String, TokenRecord>,
    grants: HashMap<(BookId, MemberId), Tier>,
}

impl Inner {
    fn is_visible(&self, book: &Book, identity: Identity) -> bool {
        if !book.privately_owned {
            return true;
        }
        identity
            .member_id()
            .is_some_and(|member| self.grants.contains_key(&(book.id, member)))
    }
}

/// Store backed by in-process maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    queries: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a parsed fixture.
    pub fn from_fixture(fixture: Fixture) -> Self {
        let store = Self::new();
        for book in fixture.books {
            store.insert_book(book);
        }
        for doc in fixture.documents {
            store.insert_document(doc.document, doc.markdown, doc.content);
        }
        for token in fixture.tokens {
            store.insert_token(token.token, token.record);
        }
        for grant in fixture.grants {
            store.grant(grant.book_id, grant.member_id, grant.role);
        }
        store
    }

    /// Load a fixture file and build a store from it.
    pub async fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let fixture = Fixture::load(path).await?;
        let store = Self::from_fixture(fixture);
        log::info!(
            "Loaded memory store: {} books, {} documents",
            store.book_count(),
            store.document_count()
        );
        Ok(store)
    }

    /// Add a book (builder style).
    pub fn with_book(self, book: Book) -> Self {
        self.insert_book(book);
        self
    }

    /// Add a document with its stored fields (builder style).
    pub fn with_document(
        self,
        document: Document,
        markdown: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.insert_document(document, markdown.into(), content.into());
        self
    }

    /// Add a token (builder style).
    pub fn with_token(self, token: impl Into<String>, record: TokenRecord) -> Self {
        self.insert_token(token.into(), record);
        self
    }

    /// Give a member a role on a book (builder style).
    pub fn with_grant(self, book_id: BookId, member: MemberId, role: Role) -> Self {
        self.grant(book_id, member, role);
        self
    }

    /// Insert or replace a book.
    pub fn insert_book(&self, book: Book) {
        self.write().books.insert(book.id, book);
    }

    /// Insert or replace a document.
    pub fn insert_document(&self, document: Document, markdown: String, content: String) {
        self.write().documents.insert(
            document.id,
            StoredDocument {
                document,
                markdown,
                content,
            },
        );
    }

    /// Insert or replace a token.
    pub fn insert_token(&self, token: String, record: TokenRecord) {
        self.write().tokens.insert(token, record);
    }

    /// Insert or replace a member's role on a book.
    pub fn grant(&self, book_id: BookId, member: MemberId, role: Role) {
        self.write().grants.insert((book_id, member), role.tier());
    }

    /// Remove a member's role on a book.
    pub fn revoke(&self, book_id: BookId, member: MemberId) {
        self.write().grants.remove(&(book_id, member));
    }

    /// Number of store calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of books held.
    pub fn book_count(&self) -> usize {
        self.read().books.len()
    }

    /// Number of documents held.
    pub fn document_count(&self) -> usize {
        self.read().documents.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn count_query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Store contracts
// ============================================================================

#[async_trait]
impl TokenStore for MemoryStore {
    async fn find_token(&self, token: &str) -> Result<Option<TokenRecord>> {
        self.count_query();
        Ok(self.read().tokens.get(token).cloned())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find_book(&self, id: BookId) -> Result<Option<Book>> {
        self.count_query();
        Ok(self.read().books.get(&id).cloned())
    }

    async fn list_books_for(
        &self,
        identity: Identity,
        page: PageRequest,
        order: BookOrder,
    ) -> Result<Page<Book>> {
        self.count_query();
        let inner = self.read();
        let mut books: Vec<Book> = inner
            .books
            .values()
            .filter(|book| inner.is_visible(book, identity))
            .cloned()
            .collect();

        match order {
            BookOrder::Default => books.sort_by_key(|b| (b.order_index, b.id)),
            BookOrder::Newest => books.sort_by(|a, b| b.id.cmp(&a.id)),
            BookOrder::Name => books.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
        }

        Ok(Page::from_ordered(books, page))
    }

    async fn has_access(
        &self,
        book_identify: &str,
        member: MemberId,
        min_tier: Tier,
    ) -> Result<bool> {
        self.count_query();
        let inner = self.read();
        let Some(book) = inner.books.values().find(|b| b.identify == book_identify) else {
            return Ok(false);
        };
        Ok(inner
            .grants
            .get(&(book.id, member))
            .is_some_and(|tier| tier.satisfies(min_tier)))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_document(&self, id: DocumentId) -> Result<Option<Document>> {
        self.count_query();
        Ok(self.read().documents.get(&id).map(|d| d.document.clone()))
    }

    async fn find_document_by_identify(
        &self,
        book_id: BookId,
        identify: &str,
    ) -> Result<Option<Document>> {
        self.count_query();
        Ok(self
            .read()
            .documents
            .values()
            .find(|d| d.document.book_id == book_id && d.document.identify == identify)
            .map(|d| d.document.clone()))
    }

    async fn field(&self, document_id: DocumentId, field: ContentField) -> Result<String> {
        self.count_query();
        let inner = self.read();
        let stored = inner.documents.get(&document_id);
        Ok(match (stored, field) {
            (Some(d), ContentField::Markdown) => d.markdown.clone(),
            (Some(d), ContentField::Content) => d.content.clone(),
            (None, _) => String::new(),
        })
    }
}

#[async_trait]
impl SearchStore for MemoryStore {
    async fn search_documents(
        &self,
        query: &SearchQuery,
        identity: Identity,
    ) -> Result<Page<SearchRow>> {
        self.count_query();
        let keyword = query.keyword.to_lowercase();
        if keyword.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let inner = self.read();
        let mut hits: Vec<(bool, SearchRow)> = inner
            .documents
            .values()
            .map(|stored| &stored.document)
            .filter(|doc| query.book_id.is_none_or(|id| doc.book_id == id))
            .filter_map(|doc| {
                let book = inner.books.get(&doc.book_id)?;
                if !inner.is_visible(book, identity) {
                    return None;
                }
                let in_title = doc.name.to_lowercase().contains(&keyword);
                let in_body = doc.release.to_lowercase().contains(&keyword);
                (in_title || in_body).then(|| {
                    (
                        in_title,
                        SearchRow {
                            document_id: doc.id,
                            document_name: doc.name.clone(),
                            book_name: book.name.clone(),
                            description: doc.release.clone(),
                        },
                    )
                })
            })
            .collect();

        // Title matches first, then newest document first.
        hits.sort_by(|(a_title, a), (b_title, b)| {
            b_title
                .cmp(a_title)
                .then(b.document_id.cmp(&a.document_id))
        });

        let rows = hits.into_iter().map(|(_, row)| row).collect();
        Ok(Page::from_ordered(rows, query.page))
    }
}

// ============================================================================
// Tests
// ============================================================================
