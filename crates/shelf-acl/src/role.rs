//! Per-book roles.

use serde::{Deserialize, Serialize};
use shelf_core::Tier;

/// Role of a member on a book, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Created the book.
    Founder,
    /// Manages members and settings.
    Administrator,
    /// Writes documents.
    Editor,
    /// Reads only.
    Observer,
}

/// The weakest tier that still permits reading a private book.
///
/// Read checks ask "does this member hold at least observer-level access";
/// pass this constant rather than restating the number.
pub const ANY_ACCESS_TIER: Tier = Role::Observer.tier();

impl Role {
    /// Numeric tier stored for this role.
    pub const fn tier(self) -> Tier {
        match self {
            Role::Founder => Tier(0),
            Role::Administrator => Tier(1),
            Role::Editor => Tier(2),
            Role::Observer => Tier(3),
        }
    }

    /// Maps a stored tier back to a role.
    pub fn from_tier(tier: Tier) -> Option<Self> {
        match tier.0 {
            0 => Some(Role::Founder),
            1 => Some(Role::Administrator),
            2 => Some(Role::Editor),
            3 => Some(Role::Observer),
            _ => None,
        }
    }
}
