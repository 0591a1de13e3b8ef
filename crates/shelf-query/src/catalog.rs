//! Caller-visible book listing.

use std::sync::Arc;

use shelf_content::snippet;
use shelf_core::{Book, BookId, BookOrder, BookStore, Identity, Page, PageRequest, Result, Visibility};

/// A book as presented in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Book id.
    pub id: BookId,
    /// Display name.
    pub name: String,
    /// Slug.
    pub identify: String,
    /// Public or Private label.
    pub visibility: Visibility,
    /// Plain-text description snippet; `None` when the book has no description.
    pub snippet: Option<String>,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        let visibility = book.visibility();
        let snippet = (!book.description.is_empty()).then(|| snippet(&book.description));
        Self {
            id: book.id,
            name: book.name,
            identify: book.identify,
            visibility,
            snippet,
        }
    }
}

/// Lists books visible to a caller.
///
/// Visibility filtering happens inside the store query; the catalog only
/// labels and summarizes what comes back.
#[derive(Clone)]
pub struct BookCatalog {
    books: Arc<dyn BookStore>,
}

impl BookCatalog {
    /// Create a catalog over `books`.
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// One page of books visible to `identity`, plus the total count.
    pub async fn list_books(
        &self,
        identity: Identity,
        page: PageRequest,
        order: BookOrder,
    ) -> Result<Page<BookSummary>> {
        let books = self.books.list_books_for(identity, page, order).await?;
        log::debug!(
            "Catalog for {identity}: {} of {} books (page {})",
            books.items.len(),
            books.total,
            page.page()
        );
        Ok(Page::new(
            books.items.into_iter().map(BookSummary::from).collect(),
            books.total,
        ))
    }
}

impl std::fmt::Debug for BookCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookCatalog").finish_non_exhaustive()
    }
}
