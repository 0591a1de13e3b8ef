//! Shelf Core: shared types, collaborator traits and errors.
//!
//! This crate provides the foundational types used across all Shelf crates.
//! It has no internal Shelf dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`types`]: Identities, books, documents, search rows, paging
//! - [`store`]: Async contracts the persistence layer must satisfy

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod store;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{DenialReason, Error, ErrorKind, Result};
pub use store::{BookStore, DocumentStore, SearchStore, Stores, TokenStore};
pub use types::{
    Book, BookId, BookOrder, ContentField, Document, DocumentId, Identity, MemberId, Page,
    PageRequest, SearchQuery, SearchRow, Tier, TokenRecord, Visibility,
};
