//! The document tools: `list_books`, `get_doc` and `search_docs`.
//!
//! Each tool parses its arguments into the request struct from
//! `shelf-query`, runs it through the [`Library`], and renders the result as
//! markdown text. Every domain failure comes back as an error result.

use std::fmt::Write as _;

use rmcp::model::{CallToolResult, Content, Tool};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shelf_core::{Error, Page, PageRequest};
use shelf_query::{
    BookSummary, GetDocRequest, Library, ListBooksRequest, SearchDocsRequest, SearchHit,
};

use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult, make_tool};

const MEMBER_TOKEN_DESCRIPTION: &str =
    "Member token for private books (optional; anonymous when omitted)";

/// Serves the three document tools over a [`Library`].
#[derive(Debug, Clone)]
pub struct LibraryTools {
    library: Library,
}

impl LibraryTools {
    /// Create the tools.
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

impl ToolRegistry for LibraryTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                "list_books",
                "List the books you can read: all public books plus private books you have a role on",
                json!({
                    "type": "object",
                    "properties": {
                        "member_token": { "type": "string", "description": MEMBER_TOKEN_DESCRIPTION },
                        "page": { "type": "integer", "minimum": 1, "description": "Page number (default 1)" },
                        "order": {
                            "type": "string",
                            "enum": ["default", "newest", "name"],
                            "description": "Ordering (default: configured book order)"
                        }
                    }
                }),
            ),
            make_tool(
                "get_doc",
                "Get a document's content by doc_id, or by identify together with book_id",
                json!({
                    "type": "object",
                    "properties": {
                        "doc_id": { "type": "integer", "description": "Document ID" },
                        "identify": { "type": "string", "description": "Document identify (alternative to doc_id)" },
                        "book_id": { "type": "integer", "description": "Book ID (required with identify)" },
                        "format": {
                            "type": "string",
                            "enum": ["markdown", "html", "text"],
                            "description": "Output format (default markdown)"
                        },
                        "member_token": { "type": "string", "description": MEMBER_TOKEN_DESCRIPTION }
                    }
                }),
            ),
            make_tool(
                "search_docs",
                "Search documents by keyword across the books you can read",
                json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search keyword" },
                        "book_id": { "type": "integer", "description": "Restrict the search to one book" },
                        "page": { "type": "integer", "minimum": 1, "description": "Page number (default 1)" },
                        "member_token": { "type": "string", "description": MEMBER_TOKEN_DESCRIPTION }
                    },
                    "required": ["query"]
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let library = self.library.clone();

        match name {
            "list_books" => Some(Box::pin(async move {
                Ok(respond(list_books(&library, args).await))
            })),
            "get_doc" => Some(Box::pin(async move {
                Ok(respond(get_doc(&library, args).await))
            })),
            "search_docs" => Some(Box::pin(async move {
                Ok(respond(search_docs(&library, args).await))
            })),
            _ => None,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn respond(result: shelf_core::Result<String>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => e.into_tool_result(),
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> shelf_core::Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args)
        .map_err(|e| Error::invalid_input(format!("Invalid arguments: {e}")))
}

async fn list_books(library: &Library, args: Value) -> shelf_core::Result<String> {
    let request: ListBooksRequest = parse_args(args)?;
    let page = library.list_books(&request).await?;
    let window = library.settings().list_page(request.page.unwrap_or(1));
    Ok(render_books(&page, window))
}

async fn get_doc(library: &Library, args: Value) -> shelf_core::Result<String> {
    let request: GetDocRequest = parse_args(args)?;
    Ok(library.get_doc(&request).await?.render())
}

async fn search_docs(library: &Library, args: Value) -> shelf_core::Result<String> {
    let request: SearchDocsRequest = parse_args(args)?;
    let page = library.search_docs(&request).await?;
    let window = library.settings().search_page(request.page.unwrap_or(1));
    Ok(render_hits(&page, window))
}

// ============================================================================
// Rendering
// ============================================================================

/// Footer pointing at the next page; only printed when one exists.
fn page_footer(out: &mut String, window: PageRequest, shown: usize, total: u64, noun: &str) {
    if window.offset() + (shown as u64) < total {
        let _ = writeln!(
            out,
            "_Page {}: showing {shown} of {total} {noun}. Pass `page` to see more._",
            window.page()
        );
    }
}

fn render_books(page: &Page<BookSummary>, window: PageRequest) -> String {
    let mut out = String::from("# Book List\n\n");
    if page.items.is_empty() {
        out.push_str("No books available.\n");
    }
    for book in &page.items {
        let _ = writeln!(
            out,
            "- [ID: {}] **{}** (Identify: {}) - {}",
            book.id, book.name, book.identify, book.visibility
        );
        if let Some(snippet) = &book.snippet {
            let _ = writeln!(out, "  {snippet}");
        }
        out.push('\n');
    }
    page_footer(&mut out, window, page.items.len(), page.total, "books");
    out
}

fn render_hits(page: &Page<SearchHit>, window: PageRequest) -> String {
    let mut out = format!("Found {} documents:\n\n", page.total);
    for hit in &page.items {
        let _ = writeln!(
            out,
            "- [ID: {}] **{}** (Book: {})",
            hit.document_id, hit.document_name, hit.book_name
        );
        let _ = writeln!(out, "  {}\n", hit.snippet);
    }
    page_footer(&mut out, window, page.items.len(), page.total, "documents");
    out
}

// ============================================================================
// Tests
// ============================================================================
