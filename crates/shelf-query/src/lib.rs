//! # shelf-query
//!
//! The request pipeline behind the three document tools.
//!
//! Every entry point follows the same order:
//!
//! 1. validate the request shape ([`request`]), before any store access;
//! 2. resolve the caller's identity from the optional member token;
//! 3. run the service: [`BookCatalog`], [`DocumentLookup`] or
//!    [`DocumentSearch`].
//!
//! [`Library`] wires these together from a [`Stores`](shelf_core::Stores)
//! handle set and is what the MCP layer talks to.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod library;
pub mod lookup;
pub mod request;
pub mod search;

pub use catalog::{BookCatalog, BookSummary};
pub use library::{Library, LibrarySettings};
pub use lookup::{DocumentLookup, RetrievedDocument};
pub use request::{
    DocumentRequest, GetDocRequest, ListBooksRequest, Locator, SearchDocsRequest,
};
pub use search::{DocumentSearch, SearchHit};
