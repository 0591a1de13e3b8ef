//! Single-document retrieval with access control.

use std::fmt;
use std::sync::Arc;

use shelf_acl::AccessPolicy;
use shelf_content::{ContentAssembler, ContentBody, Representation};
use shelf_core::{BookId, BookStore, DocumentId, DocumentStore, Error, Identity, Result};

use crate::request::{DocumentRequest, Locator};

/// A document body plus the metadata shown above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedDocument {
    /// Document id.
    pub document_id: DocumentId,
    /// Document name.
    pub title: String,
    /// Owning book.
    pub book_id: BookId,
    /// Representation that was requested.
    pub representation: Representation,
    /// Assembled body.
    pub body: ContentBody,
}

impl RetrievedDocument {
    /// `Title / ID / Book ID / Format` header, a blank line, then the body.
    pub fn render(self) -> String {
        format!(
            "Title: {}\nID: {}\nBook ID: {}\nFormat: {}\n\n{}",
            self.title,
            self.document_id,
            self.book_id,
            self.representation,
            self.body.into_text()
        )
    }
}

/// Resolves a document, checks its book's policy, and assembles its body.
#[derive(Clone)]
pub struct DocumentLookup {
    books: Arc<dyn BookStore>,
    documents: Arc<dyn DocumentStore>,
    policy: AccessPolicy,
    assembler: ContentAssembler,
}

impl DocumentLookup {
    /// Create a lookup service.
    pub fn new(
        books: Arc<dyn BookStore>,
        documents: Arc<dyn DocumentStore>,
        policy: AccessPolicy,
    ) -> Self {
        let assembler = ContentAssembler::new(documents.clone());
        Self {
            books,
            documents,
            policy,
            assembler,
        }
    }

    /// Retrieve the requested document for `identity`.
    pub async fn get_document(
        &self,
        request: &DocumentRequest,
        identity: Identity,
    ) -> Result<RetrievedDocument> {
        let document = match &request.locator {
            Locator::ById(id) => self.documents.find_document(*id).await,
            Locator::ByBookAndIdentify { book_id, identify } => {
                self.documents
                    .find_document_by_identify(*book_id, identify)
                    .await
            }
        }
        .inspect_err(|e| log::warn!("Document lookup failed: {e}"))?
        .ok_or(Error::DocumentNotFound)?;

        let book = self
            .books
            .find_book(document.book_id)
            .await?
            .ok_or(Error::BookNotFound {
                book_id: document.book_id,
            })?;

        self.policy.authorize_read(&book, identity).await?;

        let body = self
            .assembler
            .assemble(&document, request.representation)
            .await?;

        Ok(RetrievedDocument {
            document_id: document.id,
            title: document.name,
            book_id: document.book_id,
            representation: request.representation,
            body,
        })
    }
}

impl fmt::Debug for DocumentLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentLookup")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
