//! Error types for shelf-core

use thiserror::Error;

use crate::types::BookId;

/// Result type alias for Shelf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a read of private content was refused.
///
/// The two reasons are distinct user-facing outcomes: an anonymous caller can
/// retry with a token, a member with an insufficient role cannot.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The caller is anonymous and the book is private.
    #[error("Private book requires valid member_token")]
    CredentialRequired,

    /// The caller is a member without a sufficient role on the book.
    #[error("Insufficient permissions for this private book")]
    InsufficientPermissions,
}

/// Coarse error categories, used to decide how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing request arguments. Never reaches the store.
    InvalidInput,
    /// The requested document or book does not exist.
    NotFound,
    /// Visibility or role check failed.
    AccessDenied,
    /// The requested representation is not one of markdown, html, text.
    UnsupportedFormat,
    /// A collaborator failed for a reason other than "not found".
    StoreFailure,
}

/// Errors that can occur while serving a request.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A request argument is malformed.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// A search was requested with an empty query.
    #[error("Query is required")]
    EmptyQuery,

    /// The document locator was missing, incomplete, or ambiguous.
    #[error("Invalid document locator: {reason}")]
    InvalidLocator {
        /// Which locator rule was violated
        reason: &'static str,
    },

    /// No document matched the locator.
    #[error("Document not found")]
    DocumentNotFound,

    /// The document references a book that does not exist.
    #[error("Associated book not found (book_id {book_id})")]
    BookNotFound {
        /// The dangling book reference
        book_id: BookId,
    },

    /// The caller may not read the document.
    #[error("Access denied: {0}")]
    AccessDenied(DenialReason),

    /// The requested output representation is unknown.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The rejected format string
        format: String,
    },

    /// A store call failed.
    #[error("Store failure during {operation}: {source}")]
    StoreFailure {
        /// The store operation that failed
        operation: &'static str,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. } | Error::EmptyQuery | Error::InvalidLocator { .. } => {
                ErrorKind::InvalidInput
            }
            Error::DocumentNotFound | Error::BookNotFound { .. } => ErrorKind::NotFound,
            Error::AccessDenied(_) => ErrorKind::AccessDenied,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::StoreFailure { .. } => ErrorKind::StoreFailure,
        }
    }

    /// Creates a new invalid-input error.
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a new unsupported-format error.
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Error::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Wraps a collaborator error, tagging it with the failed operation.
    pub fn store<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::StoreFailure {
            operation,
            source: source.into(),
        }
    }

    /// Returns the denial reason if this is an access error.
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Error::AccessDenied(reason) => Some(*reason),
            _ => None,
        }
    }
}
