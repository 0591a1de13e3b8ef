//! The request pipeline facade.

use shelf_acl::{ANY_ACCESS_TIER, AccessPolicy};
use shelf_auth::CredentialResolver;
use shelf_core::{Identity, Page, PageRequest, Result, SearchQuery, Stores, Tier};

use crate::catalog::{BookCatalog, BookSummary};
use crate::lookup::{DocumentLookup, RetrievedDocument};
use crate::request::{GetDocRequest, ListBooksRequest, SearchDocsRequest};
use crate::search::{DocumentSearch, SearchHit};

/// Default number of books per catalog page.
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 50;
/// Default number of hits per search page.
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 30;
/// Upper bound applied to both page sizes.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Tunables of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySettings {
    /// Books per catalog page.
    pub list_page_size: u32,
    /// Hits per search page.
    pub search_page_size: u32,
    /// Cap for both page sizes.
    pub max_page_size: u32,
    /// Tier required to read a private book.
    pub read_tier: Tier,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            read_tier: ANY_ACCESS_TIER,
        }
    }
}

impl LibrarySettings {
    /// Window of catalog page `page`, with the size capped.
    pub fn list_page(&self, page: u32) -> PageRequest {
        PageRequest::new(page, self.list_page_size.min(self.max_page_size))
    }

    /// Window of search page `page`, with the size capped.
    pub fn search_page(&self, page: u32) -> PageRequest {
        PageRequest::new(page, self.search_page_size.min(self.max_page_size))
    }
}

/// Entry point for the three document operations.
///
/// Holds only shared read-only handles, so it is cheap to clone into
/// every request task.
#[derive(Debug, Clone)]
pub struct Library {
    resolver: CredentialResolver,
    catalog: BookCatalog,
    lookup: DocumentLookup,
    search: DocumentSearch,
    settings: LibrarySettings,
}

impl Library {
    /// Wire the services over `stores`.
    pub fn new(stores: Stores, settings: LibrarySettings) -> Self {
        let policy = AccessPolicy::new(stores.books.clone()).with_read_tier(settings.read_tier);
        Self {
            resolver: CredentialResolver::new(stores.tokens),
            catalog: BookCatalog::new(stores.books.clone()),
            lookup: DocumentLookup::new(stores.books, stores.documents, policy),
            search: DocumentSearch::new(stores.search),
            settings,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &LibrarySettings {
        &self.settings
    }

    /// Resolve a member token.
    pub async fn identify(&self, token: &str) -> Result<Identity> {
        self.resolver.resolve(token).await
    }

    /// Books visible to the caller.
    pub async fn list_books(&self, request: &ListBooksRequest) -> Result<Page<BookSummary>> {
        let (page, order) = request.validate()?;
        let identity = self.identify(request.token()).await?;
        self.catalog
            .list_books(identity, self.settings.list_page(page), order)
            .await
    }

    /// One document, access-checked and assembled.
    pub async fn get_doc(&self, request: &GetDocRequest) -> Result<RetrievedDocument> {
        let validated = request.validate()?;
        let identity = self.identify(request.token()).await?;
        self.lookup.get_document(&validated, identity).await
    }

    /// Keyword search over documents visible to the caller.
    pub async fn search_docs(&self, request: &SearchDocsRequest) -> Result<Page<SearchHit>> {
        let (keyword, book_id, page) = request.validate()?;
        let identity = self.identify(request.token()).await?;
        let query = SearchQuery {
            keyword,
            book_id,
            page: self.settings.search_page(page),
        };
        self.search.search(&query, identity).await
    }
}
