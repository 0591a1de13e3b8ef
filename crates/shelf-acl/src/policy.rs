//! Read-access policy.

use std::sync::Arc;

use shelf_core::{Book, BookStore, DenialReason, Error, Identity, Result, Tier};

use crate::role::ANY_ACCESS_TIER;

/// Decides whether a caller may read a book.
///
/// Public books are open to everyone. Private books require a member whose
/// role on the book satisfies the required tier; the role lookup is delegated
/// to the [`BookStore`].
#[derive(Clone)]
pub struct AccessPolicy {
    books: Arc<dyn BookStore>,
    read_tier: Tier,
}

impl AccessPolicy {
    /// Create a policy that reads with [`ANY_ACCESS_TIER`].
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self {
            books,
            read_tier: ANY_ACCESS_TIER,
        }
    }

    /// Override the tier used by [`authorize_read`](Self::authorize_read).
    pub fn with_read_tier(mut self, tier: Tier) -> Self {
        self.read_tier = tier;
        self
    }

    /// The tier used for read checks.
    pub fn read_tier(&self) -> Tier {
        self.read_tier
    }

    /// Whether `identity` may access `book` at `required` tier.
    pub async fn can_access(&self, book: &Book, identity: Identity, required: Tier) -> Result<bool> {
        if !book.privately_owned {
            return Ok(true);
        }
        match identity {
            Identity::Anonymous => Ok(false),
            Identity::Member(member) => {
                self.books
                    .has_access(&book.identify, member, required)
                    .await
            }
        }
    }

    /// Require read access, reporting why it was refused.
    pub async fn authorize_read(&self, book: &Book, identity: Identity) -> Result<()> {
        if self.can_access(book, identity, self.read_tier).await? {
            return Ok(());
        }

        let reason = if identity.is_anonymous() {
            DenialReason::CredentialRequired
        } else {
            DenialReason::InsufficientPermissions
        };
        log::debug!("Denied {identity} on book '{}': {reason}", book.identify);
        Err(Error::AccessDenied(reason))
    }
}

impl std::fmt::Debug for AccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("read_tier", &self.read_tier)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
