//! Content utilities for Shelf documents.
//!
//! # Modules
//!
//! - [`markup`]: tag stripping and the shared snippet truncation rule
//! - [`assembler`]: picks the best stored representation of a document
//!
//! Book listings and search results both render descriptions through
//! [`snippet`], so the truncation rule lives in exactly one place.
//!
//! # Example
//!
//! ```rust
//! use shelf_content::{snippet, SNIPPET_MAX_CHARS};
//!
//! assert_eq!(snippet("<p>Hello <b>world</b></p>"), "Hello world");
//!
//! let long = format!("<p>{}</p>", "x".repeat(150));
//! assert_eq!(snippet(&long).chars().count(), SNIPPET_MAX_CHARS + 3);
//! ```

pub mod assembler;
pub mod markup;

pub use assembler::{ContentAssembler, ContentBody, Representation, MARKDOWN_FALLBACK_LABEL};
pub use markup::{snippet, strip_markup, truncate_chars, SNIPPET_MAX_CHARS};
