//! Credential resolution for Shelf.
//!
//! Provides:
//! - [`CredentialResolver`]: maps an opaque token to an [`Identity`](shelf_core::Identity)
//! - [`bearer_token`]: extracts the token from an `Authorization` header value
//! - [`token_from_parts`]: the same, from HTTP request `Parts` forwarded by the
//!   streamable HTTP transport

mod resolver;

pub use resolver::CredentialResolver;

/// Extract a bearer token from an `Authorization` header value.
///
/// Returns `None` for other schemes and for an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract the bearer token from HTTP request `Parts`, if present.
pub fn token_from_parts(parts: &http::request::Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
}
