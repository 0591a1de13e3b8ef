//! # shelf-acl
//!
//! Access control for Shelf books.
//!
//! - [`Role`]: the per-book role hierarchy (lower tier = stronger)
//! - [`ANY_ACCESS_TIER`]: the weakest tier that still grants read access
//! - [`AccessPolicy`]: visibility plus role check for a caller on a book
//!
//! Documents carry no ACL of their own; callers check the owning book.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod policy;
pub mod role;

pub use policy::AccessPolicy;
pub use role::{Role, ANY_ACCESS_TIER};
