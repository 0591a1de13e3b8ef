//! Tool request shapes and their validation.
//!
//! Each request deserializes leniently (every field optional) and is then
//! checked by `validate`, so a malformed request is rejected with a domain
//! error before any store is touched.

use serde::{Deserialize, Deserializer, Serialize, de};
use shelf_content::Representation;
use shelf_core::{BookId, BookOrder, DocumentId, Error, Result};

fn token_or_empty(token: &Option<String>) -> &str {
    token.as_deref().unwrap_or("")
}

fn page_number(page: Option<u32>) -> Result<u32> {
    match page {
        None => Ok(1),
        Some(0) => Err(Error::invalid_input("page must be 1 or greater")),
        Some(page) => Ok(page),
    }
}

/// A JSON number as sent by clients that only speak floats.
#[derive(Deserialize)]
#[serde(untagged)]
enum WholeNumber {
    Int(i64),
    Float(f64),
}

impl WholeNumber {
    fn to_i64(&self) -> Option<i64> {
        match *self {
            WholeNumber::Int(n) => Some(n),
            WholeNumber::Float(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Some(f as i64)
            }
            WholeNumber::Float(_) => None,
        }
    }
}

/// Accepts `5` and `5.0` alike; rejects `5.5`.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WholeNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) => n
            .to_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected a whole number")),
    }
}

fn whole_page<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    whole_number(deserializer)?
        .map(|n| u32::try_from(n).map_err(|_| de::Error::custom("page out of range")))
        .transpose()
}

fn positive_book_id(book_id: i64) -> Result<BookId> {
    if book_id > 0 {
        Ok(BookId(book_id))
    } else {
        Err(Error::invalid_input("book_id must be positive"))
    }
}

// ============================================================================
// list_books
// ============================================================================

/// Arguments of `list_books`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBooksRequest {
    /// Optional member credential.
    #[serde(default)]
    pub member_token: Option<String>,
    /// 1-based page number.
    #[serde(default, deserialize_with = "whole_page")]
    pub page: Option<u32>,
    /// `default`, `newest` or `name`.
    #[serde(default)]
    pub order: Option<String>,
}

impl ListBooksRequest {
    /// Credential, or `""` when absent.
    pub fn token(&self) -> &str {
        token_or_empty(&self.member_token)
    }

    /// Validated page number and ordering.
    pub fn validate(&self) -> Result<(u32, BookOrder)> {
        let page = page_number(self.page)?;
        let order = self.order.as_deref().unwrap_or("").parse()?;
        Ok((page, order))
    }
}

// ============================================================================
// get_doc
// ============================================================================

/// Arguments of `get_doc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDocRequest {
    /// Document id; excludes `identify`/`book_id`.
    #[serde(default, deserialize_with = "whole_number")]
    pub doc_id: Option<i64>,
    /// Document slug; requires `book_id`.
    #[serde(default)]
    pub identify: Option<String>,
    /// Owning book of `identify`.
    #[serde(default, deserialize_with = "whole_number")]
    pub book_id: Option<i64>,
    /// `markdown` (default), `html` or `text`.
    #[serde(default)]
    pub format: Option<String>,
    /// Optional member credential.
    #[serde(default)]
    pub member_token: Option<String>,
}

/// How a single document is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// By primary key.
    ById(DocumentId),
    /// By slug within a book.
    ByBookAndIdentify {
        /// Owning book.
        book_id: BookId,
        /// Slug within the book.
        identify: String,
    },
}

/// A validated `get_doc` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    /// Which document.
    pub locator: Locator,
    /// Which representation.
    pub representation: Representation,
}

impl GetDocRequest {
    /// Credential, or `""` when absent.
    pub fn token(&self) -> &str {
        token_or_empty(&self.member_token)
    }

    /// Check that exactly one locator form is present and the format is known.
    pub fn validate(&self) -> Result<DocumentRequest> {
        let identify = self
            .identify
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let locator = match (self.doc_id, identify, self.book_id) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(Error::InvalidLocator {
                    reason: "doc_id cannot be combined with identify or book_id",
                });
            }
            (Some(id), None, None) if id > 0 => Locator::ById(DocumentId(id)),
            (Some(_), None, None) => {
                return Err(Error::InvalidLocator {
                    reason: "doc_id must be positive",
                });
            }
            (None, Some(identify), Some(book_id)) if book_id > 0 => Locator::ByBookAndIdentify {
                book_id: BookId(book_id),
                identify: identify.to_string(),
            },
            (None, Some(_), Some(_)) => {
                return Err(Error::InvalidLocator {
                    reason: "book_id must be positive",
                });
            }
            (None, Some(_), None) => {
                return Err(Error::InvalidLocator {
                    reason: "identify requires book_id",
                });
            }
            (None, None, Some(_)) => {
                return Err(Error::InvalidLocator {
                    reason: "book_id requires identify",
                });
            }
            (None, None, None) => {
                return Err(Error::InvalidLocator {
                    reason: "provide doc_id, or identify together with book_id",
                });
            }
        };

        let representation = match self.format.as_deref().map(str::trim) {
            None | Some("") => Representation::default(),
            Some(format) => format.parse()?,
        };

        Ok(DocumentRequest {
            locator,
            representation,
        })
    }
}

// ============================================================================
// search_docs
// ============================================================================

/// Arguments of `search_docs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocsRequest {
    /// Keyword; must not be blank.
    #[serde(default)]
    pub query: String,
    /// Restrict matches to one book.
    #[serde(default, deserialize_with = "whole_number")]
    pub book_id: Option<i64>,
    /// Optional member credential.
    #[serde(default)]
    pub member_token: Option<String>,
    /// 1-based page number.
    #[serde(default, deserialize_with = "whole_page")]
    pub page: Option<u32>,
}

impl SearchDocsRequest {
    /// Credential, or `""` when absent.
    pub fn token(&self) -> &str {
        token_or_empty(&self.member_token)
    }

    /// Validated keyword, book filter and page number.
    pub fn validate(&self) -> Result<(String, Option<BookId>, u32)> {
        let keyword = self.query.trim();
        if keyword.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let book_id = self.book_id.map(positive_book_id).transpose()?;
        let page = page_number(self.page)?;
        Ok((keyword.to_string(), book_id, page))
    }
}

// ============================================================================
// Tests
// ============================================================================
