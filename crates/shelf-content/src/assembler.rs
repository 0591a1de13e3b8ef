//! Representation selection with a fixed fallback chain.
//!
//! | requested  | first choice            | fallback                     |
//! |------------|-------------------------|------------------------------|
//! | `html`     | `release`               | (none)                       |
//! | `markdown` | stored `markdown` field | labeled `release`            |
//! | `text`     | stored `content` field  | `release` (no label)         |
//!
//! Imported or legacy documents may lack the stored fields.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use shelf_core::{ContentField, Document, DocumentStore, Error, Result};

/// Prefix that marks markdown output as rendered-markup fallback.
pub const MARKDOWN_FALLBACK_LABEL: &str = "Markdown source not available. HTML Release content:";

/// Output form requested for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// Markdown source.
    #[default]
    Markdown,
    /// Rendered markup.
    Html,
    /// Plain text.
    Text,
}

impl Representation {
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Markdown => "markdown",
            Representation::Html => "html",
            Representation::Text => "text",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" => Ok(Representation::Markdown),
            "html" => Ok(Representation::Html),
            "text" => Ok(Representation::Text),
            _ => Err(Error::unsupported_format(s)),
        }
    }
}

/// An assembled document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// The requested representation as stored.
    Native(String),
    /// The stored representation was empty; `release` stands in for it.
    Fallback {
        /// What the caller asked for.
        requested: Representation,
        /// The rendered markup used instead.
        release: String,
    },
}

impl ContentBody {
    /// Returns `true` if the requested form was available.
    pub fn is_native(&self) -> bool {
        matches!(self, ContentBody::Native(_))
    }

    /// Final text as shown to the caller.
    pub fn into_text(self) -> String {
        match self {
            ContentBody::Native(text) => text,
            ContentBody::Fallback {
                requested: Representation::Markdown,
                release,
            } => format!("{MARKDOWN_FALLBACK_LABEL}\n{release}"),
            ContentBody::Fallback { release, .. } => release,
        }
    }
}

/// Produces a document body in the requested representation.
#[derive(Clone)]
pub struct ContentAssembler {
    documents: Arc<dyn DocumentStore>,
}

impl ContentAssembler {
    /// Create an assembler reading stored fields from `documents`.
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Assemble `document` as `representation`.
    pub async fn assemble(
        &self,
        document: &Document,
        representation: Representation,
    ) -> Result<ContentBody> {
        let field = match representation {
            Representation::Html => return Ok(ContentBody::Native(document.release.clone())),
            Representation::Markdown => ContentField::Markdown,
            Representation::Text => ContentField::Content,
        };

        let stored = self.documents.field(document.id, field).await?;
        if !stored.is_empty() {
            return Ok(ContentBody::Native(stored));
        }

        log::debug!(
            "Document {} has no stored {}; falling back to release",
            document.id,
            field.column()
        );
        Ok(ContentBody::Fallback {
            requested: representation,
            release: document.release.clone(),
        })
    }
}

impl fmt::Debug for ContentAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentAssembler").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shelf_core::{BookId, DocumentId, ErrorKind};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockFields {
        fields: HashMap<(i64, &'static str), String>,
        reads: Mutex<Vec<&'static str>>,
    }

    impl MockFields {
        fn with(mut self, id: i64, field: ContentField, value: &str) -> Self {
            self.fields.insert((id, field.column()), value.to_string());
            self
        }
    }

    #[async_trait]
    impl DocumentStore for MockFields {
        async fn find_document(&self, _id: DocumentId) -> Result<Option<Document>> {
            Ok(None)
        }

        async fn find_document_by_identify(&self, _: BookId, _: &str) -> Result<Option<Document>> {
            Ok(None)
        }

        async fn field(&self, document_id: DocumentId, field: ContentField) -> Result<String> {
            self.reads.lock().unwrap().push(field.column());
            if document_id.0 == 99 {
                return Err(Error::store("field", "disk on fire"));
            }
            Ok(self
                .fields
                .get(&(document_id.0, field.column()))
                .cloned()
                .unwrap_or_default())
        }
    }

    fn document(id: i64) -> Document {
        Document {
            id: DocumentId(id),
            name: "Intro".into(),
            book_id: BookId(1),
            identify: "intro".into(),
            release: "<p>Hello</p>".into(),
        }
    }

    #[test]
    fn test_representation_parse() {
        assert_eq!("markdown".parse::<Representation>().unwrap(), Representation::Markdown);
        assert_eq!("HTML".parse::<Representation>().unwrap(), Representation::Html);
        assert_eq!(" text ".parse::<Representation>().unwrap(), Representation::Text);
        let err = "pdf".parse::<Representation>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert_eq!(Representation::default(), Representation::Markdown);
    }

    #[tokio::test]
    async fn test_html_returns_release_without_store_read() {
        let store = Arc::new(MockFields::default());
        let assembler = ContentAssembler::new(store.clone());
        let body = assembler
            .assemble(&document(1), Representation::Html)
            .await
            .unwrap();
        assert_eq!(body, ContentBody::Native("<p>Hello</p>".into()));
        assert!(store.reads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_markdown_native() {
        let store = MockFields::default().with(1, ContentField::Markdown, "# Hello");
        let assembler = ContentAssembler::new(Arc::new(store));
        let body = assembler
            .assemble(&document(1), Representation::Markdown)
            .await
            .unwrap();
        assert!(body.is_native());
        assert_eq!(body.into_text(), "# Hello");
    }

    #[tokio::test]
    async fn test_markdown_fallback_is_labeled() {
        let assembler = ContentAssembler::new(Arc::new(MockFields::default()));
        let body = assembler
            .assemble(&document(1), Representation::Markdown)
            .await
            .unwrap();
        assert!(!body.is_native());
        let text = body.into_text();
        assert!(text.starts_with(MARKDOWN_FALLBACK_LABEL));
        assert!(text.ends_with("<p>Hello</p>"));
    }

    #[tokio::test]
    async fn test_text_native_and_unlabeled_fallback() {
        let store = MockFields::default().with(1, ContentField::Content, "Hello");
        let assembler = ContentAssembler::new(Arc::new(store));

        let native = assembler
            .assemble(&document(1), Representation::Text)
            .await
            .unwrap();
        assert_eq!(native.into_text(), "Hello");

        let fallback = assembler
            .assemble(&document(2), Representation::Text)
            .await
            .unwrap();
        assert!(!fallback.is_native());
        assert_eq!(fallback.into_text(), "<p>Hello</p>");
    }

    #[tokio::test]
    async fn test_markdown_reads_markdown_field_only() {
        let store = Arc::new(MockFields::default().with(1, ContentField::Content, "plain"));
        let assembler = ContentAssembler::new(store.clone());
        let body = assembler
            .assemble(&document(1), Representation::Markdown)
            .await
            .unwrap();
        assert!(!body.is_native());
        assert_eq!(store.reads.lock().unwrap().as_slice(), &["markdown"]);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let assembler = ContentAssembler::new(Arc::new(MockFields::default()));
        let err = assembler
            .assemble(&document(99), Representation::Text)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
    }
}
