//! Shared fixture for the library scenario tests.
//!
//! | book | name          | visibility | order_index |
//! |------|---------------|------------|-------------|
//! | 1    | Public Guide  | public     | 2           |
//! | 2    | Team Handbook | private    | 1           |
//! | 3    | Atlas         | public     | 0           |
//!
//! Member 7 (`member-token`) is an observer on book 2. Member 8
//! (`outsider-token`) has no roles.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use shelf_acl::Role;
use shelf_core::{
    Book, BookId, BookOrder, BookStore, ContentField, Document, DocumentId, DocumentStore, Error,
    Identity, MemberId, Page, PageRequest, Result, Stores, Tier, TokenRecord,
};
use shelf_query::{Library, LibrarySettings};
use shelf_storage::MemoryStore;

pub const MEMBER_TOKEN: &str = "member-token";
pub const OUTSIDER_TOKEN: &str = "outsider-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const REVOKED_TOKEN: &str = "revoked-token";

pub const INTRO_RELEASE: &str = "<h1>Intro</h1><p>Welcome to the guide</p>";

/// A library over an in-memory store, with the store kept for inspection.
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub library: Library,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_settings(LibrarySettings::default())
    }

    pub fn with_settings(settings: LibrarySettings) -> Self {
        let store = Arc::new(fixture_store());
        let library = Library::new(Stores::from_shared(store.clone()), settings);
        Self { store, library }
    }

    /// A harness whose book and document stores fail on `operation` and
    /// delegate every other call to the fixture.
    pub fn failing_on(operation: &'static str) -> Self {
        let store = Arc::new(fixture_store());
        let failing = Arc::new(FailingStore {
            inner: store.clone(),
            operation,
        });
        let stores = Stores {
            books: failing.clone(),
            documents: failing,
            ..Stores::from_shared(store.clone())
        };
        let library = Library::new(stores, LibrarySettings::default());
        Self { store, library }
    }

    /// Store calls made since the harness was built.
    pub fn queries(&self) -> usize {
        self.store.query_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps the fixture store and fails one named operation.
pub struct FailingStore {
    inner: Arc<MemoryStore>,
    operation: &'static str,
}

impl FailingStore {
    fn check(&self, operation: &'static str) -> Result<()> {
        if operation == self.operation {
            return Err(Error::store(operation, "connection reset"));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for FailingStore {
    async fn find_book(&self, id: BookId) -> Result<Option<Book>> {
        self.check("find_book")?;
        self.inner.find_book(id).await
    }

    async fn list_books_for(
        &self,
        identity: Identity,
        page: PageRequest,
        order: BookOrder,
    ) -> Result<Page<Book>> {
        self.check("list_books_for")?;
        self.inner.list_books_for(identity, page, order).await
    }

    async fn has_access(
        &self,
        book_identify: &str,
        member: MemberId,
        min_tier: Tier,
    ) -> Result<bool> {
        self.check("has_access")?;
        self.inner.has_access(book_identify, member, min_tier).await
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_document(&self, id: DocumentId) -> Result<Option<Document>> {
        self.check("find_document")?;
        self.inner.find_document(id).await
    }

    async fn find_document_by_identify(
        &self,
        book_id: BookId,
        identify: &str,
    ) -> Result<Option<Document>> {
        self.check("find_document_by_identify")?;
        self.inner.find_document_by_identify(book_id, identify).await
    }

    async fn field(&self, document_id: DocumentId, field: ContentField) -> Result<String> {
        self.check("field")?;
        self.inner.field(document_id, field).await
    }
}

fn member(id: i64) -> MemberId {
    MemberId::new(id).unwrap()
}

fn book(id: i64, name: &str, identify: &str, private: bool, order_index: i64) -> Book {
    Book {
        id: BookId(id),
        name: name.into(),
        identify: identify.into(),
        description: format!("<p>About {name}</p>"),
        privately_owned: private,
        order_index,
    }
}

fn doc(id: i64, book_id: i64, name: &str, identify: &str, release: &str) -> Document {
    Document {
        id: DocumentId(id),
        name: name.into(),
        book_id: BookId(book_id),
        identify: identify.into(),
        release: release.into(),
    }
}

fn token(member_id: i64) -> TokenRecord {
    TokenRecord {
        member_id,
        is_valid: true,
        valid_time: None,
    }
}

pub fn fixture_store() -> MemoryStore {
    MemoryStore::new()
        .with_book(book(1, "Public Guide", "public-guide", false, 2))
        .with_book(book(2, "Team Handbook", "team-handbook", true, 1))
        .with_book(book(3, "Atlas", "atlas", false, 0))
        // Markdown never stored: exercises the labeled fallback.
        .with_document(doc(5, 1, "Intro", "intro", INTRO_RELEASE), "", "Intro. Welcome to the guide")
        .with_document(
            doc(6, 1, "Setup", "setup", "<p>Install the guide tools</p>"),
            "# Setup\n\nInstall the guide tools.",
            "",
        )
        .with_document(
            doc(7, 2, "Onboarding plan", "onboarding", "<p>Team guide onboarding</p>"),
            "# Onboarding",
            "",
        )
        // Orphan: its book does not exist.
        .with_document(doc(8, 99, "Orphan", "orphan", "<p>lost</p>"), "# Orphan", "")
        .with_token(MEMBER_TOKEN, token(7))
        .with_token(OUTSIDER_TOKEN, token(8))
        .with_token(
            EXPIRED_TOKEN,
            TokenRecord {
                valid_time: Some(Utc::now() - Duration::days(1)),
                ..token(7)
            },
        )
        .with_token(
            REVOKED_TOKEN,
            TokenRecord {
                is_valid: false,
                ..token(7)
            },
        )
        .with_grant(BookId(2), member(7), Role::Observer)
}
