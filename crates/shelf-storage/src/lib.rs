//! # shelf-storage
//!
//! Storage backends implementing the `shelf-core` store contracts.
//!
//! - [`memory`]: in-memory store, loadable from a JSON [`Fixture`]
//! - [`mysql`]: MySQL store over the `{prefix}books` / `{prefix}documents`
//!   schema, via `sqlx`
//!
//! Both backends implement every contract, so either can be handed to
//! [`Stores::from_shared`](shelf_core::Stores::from_shared).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fixture;
pub mod memory;
pub mod mysql;

pub use error::{Error, Result};
pub use fixture::{Fixture, FixtureDocument, FixtureToken, RoleGrant};
pub use memory::MemoryStore;
pub use mysql::{MySqlSettings, MySqlStore};
pub use sqlx::mysql::MySqlConnectOptions;
