//! Identity-scoped keyword search.

use std::sync::Arc;

use shelf_content::snippet;
use shelf_core::{DocumentId, Identity, Page, Result, SearchQuery, SearchRow, SearchStore};

/// A search result ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Document id.
    pub document_id: DocumentId,
    /// Document name.
    pub document_name: String,
    /// Owning book's name.
    pub book_name: String,
    /// Plain-text snippet of the row's description.
    pub snippet: String,
}

impl From<SearchRow> for SearchHit {
    fn from(row: SearchRow) -> Self {
        Self {
            snippet: snippet(&row.description),
            document_id: row.document_id,
            document_name: row.document_name,
            book_name: row.book_name,
        }
    }
}

/// Runs searches against the store and summarizes the rows.
///
/// Matching and ranking are the store's; rows keep the order they came in.
#[derive(Clone)]
pub struct DocumentSearch {
    search: Arc<dyn SearchStore>,
}

impl DocumentSearch {
    /// Create a search service.
    pub fn new(search: Arc<dyn SearchStore>) -> Self {
        Self { search }
    }

    /// One page of hits plus the full match count.
    pub async fn search(&self, query: &SearchQuery, identity: Identity) -> Result<Page<SearchHit>> {
        let rows = self
            .search
            .search_documents(query, identity)
            .await
            .inspect_err(|e| log::warn!("Search for '{}' failed: {e}", query.keyword))?;
        log::debug!(
            "Search '{}' for {identity}: {} matches",
            query.keyword,
            rows.total
        );
        Ok(Page::new(
            rows.items.into_iter().map(SearchHit::from).collect(),
            rows.total,
        ))
    }
}

impl std::fmt::Debug for DocumentSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSearch").finish_non_exhaustive()
    }
}
