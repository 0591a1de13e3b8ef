//! Domain types shared by every Shelf crate.
//!
//! Books own documents; a document's visibility is always its book's
//! visibility. Callers are resolved to an [`Identity`] once per request.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(
    /// Primary key of a book.
    BookId
);
id_newtype!(
    /// Primary key of a document.
    DocumentId
);

/// Primary key of a member. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MemberId(i64);

impl MemberId {
    /// Returns `None` for zero or negative ids, which denote "no member".
    pub fn new(id: i64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// The raw id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for MemberId {
    type Error = String;

    fn try_from(id: i64) -> std::result::Result<Self, Self::Error> {
        Self::new(id).ok_or_else(|| format!("member id must be positive, got {id}"))
    }
}

impl From<MemberId> for i64 {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Identity
// ============================================================================

/// The resolved caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    /// No credential, or a credential that did not resolve.
    #[default]
    Anonymous,
    /// A known member.
    Member(MemberId),
}

impl Identity {
    /// Returns `true` for [`Identity::Anonymous`].
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// Returns the member id, if any.
    pub fn member_id(&self) -> Option<MemberId> {
        match self {
            Identity::Anonymous => None,
            Identity::Member(id) => Some(*id),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Anonymous => write!(f, "anonymous"),
            Identity::Member(id) => write!(f, "member:{id}"),
        }
    }
}

// ============================================================================
// Roles and tokens
// ============================================================================

/// Numeric permission level of a member on a book. Lower is stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(pub u8);

impl Tier {
    /// Whether a member holding `self` satisfies a `required` threshold.
    pub fn satisfies(self, required: Tier) -> bool {
        self.0 <= required.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Owner of the token. Non-positive values mean "nobody".
    pub member_id: i64,
    /// Revocation flag.
    pub is_valid: bool,
    /// Expiry instant; `None` never expires.
    #[serde(default)]
    pub valid_time: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// Whether the token has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_time.is_some_and(|expiry| expiry < now)
    }
}

// ============================================================================
// Books and documents
// ============================================================================

/// Visibility label of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Readable by anyone.
    Public,
    /// Readable by members with a role on the book.
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "Public"),
            Visibility::Private => write!(f, "Private"),
        }
    }
}

/// A top-level content container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    /// Unique human-readable slug.
    pub identify: String,
    /// Markup description.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub privately_owned: bool,
    #[serde(default)]
    pub order_index: i64,
}

impl Book {
    pub fn visibility(&self) -> Visibility {
        if self.privately_owned {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

/// A content unit belonging to exactly one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub book_id: BookId,
    /// Slug, unique within the owning book.
    pub identify: String,
    /// Rendered markup; always present and authoritative.
    #[serde(default)]
    pub release: String,
}

/// Representation fields kept in the separate document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    /// Markdown source.
    Markdown,
    /// Plain-text content.
    Content,
}

impl ContentField {
    /// Column name in the document store.
    pub fn column(self) -> &'static str {
        match self {
            ContentField::Markdown => "markdown",
            ContentField::Content => "content",
        }
    }
}

// ============================================================================
// Queries and paging
// ============================================================================

/// Ordering of the book catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookOrder {
    /// By the configured `order_index`, ascending.
    #[default]
    Default,
    /// Most recently created first.
    Newest,
    /// Alphabetical by name.
    Name,
}

impl FromStr for BookOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(BookOrder::Default),
            "newest" => Ok(BookOrder::Newest),
            "name" => Ok(BookOrder::Name),
            other => Err(Error::invalid_input(format!(
                "unknown order '{other}' (expected default, newest, or name)"
            ))),
        }
    }
}

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Page numbers and sizes below 1 are raised to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// One page of results plus the full match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Count of all matching rows, independent of the page window.
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Slices an already ordered, fully materialized result set.
    pub fn from_ordered(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.page_size() as usize)
            .collect();
        Self { items, total }
    }
}

/// A keyword search, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// Restrict matches to a single book.
    pub book_id: Option<BookId>,
    pub page: PageRequest,
}

/// A search hit as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRow {
    pub document_id: DocumentId,
    pub document_name: String,
    pub book_name: String,
    /// Markup snippet source, usually the document's release.
    pub description: String,
}

// ============================================================================
// Tests
// ============================================================================
