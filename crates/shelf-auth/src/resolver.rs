//! Token → identity resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shelf_core::{Identity, MemberId, Result, TokenStore};

/// Resolves opaque member tokens into caller identities.
///
/// Every failure mode of the credential itself (missing, unknown, revoked,
/// expired) degrades to [`Identity::Anonymous`]. Only store failures are
/// returned as errors.
#[derive(Clone)]
pub struct CredentialResolver {
    tokens: Arc<dyn TokenStore>,
}

impl CredentialResolver {
    /// Create a resolver over a token store.
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    /// Resolve a token against the current time.
    pub async fn resolve(&self, token: &str) -> Result<Identity> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolve a token as of `now`.
    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Identity::Anonymous);
        }

        let Some(record) = self.tokens.find_token(token).await? else {
            log::debug!("Unknown member token; resolving as anonymous");
            return Ok(Identity::Anonymous);
        };

        if !record.is_valid {
            log::debug!("Revoked token for member {}", record.member_id);
            return Ok(Identity::Anonymous);
        }

        if record.is_expired_at(now) {
            log::debug!("Expired token for member {}", record.member_id);
            return Ok(Identity::Anonymous);
        }

        Ok(MemberId::new(record.member_id).map_or(Identity::Anonymous, Identity::Member))
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
