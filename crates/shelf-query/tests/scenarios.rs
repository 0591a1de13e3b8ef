//! End-to-end behavior of the three operations against the in-memory store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::{
    EXPIRED_TOKEN, INTRO_RELEASE, MEMBER_TOKEN, OUTSIDER_TOKEN, REVOKED_TOKEN, TestHarness,
};
use shelf_content::{ContentBody, MARKDOWN_FALLBACK_LABEL, Representation};
use shelf_core::{DenialReason, Error, ErrorKind, Identity, Visibility};
use shelf_query::{GetDocRequest, LibrarySettings, ListBooksRequest, SearchDocsRequest};

fn get_doc(doc_id: i64, format: &str, token: Option<&str>) -> GetDocRequest {
    GetDocRequest {
        doc_id: Some(doc_id),
        format: Some(format.into()),
        member_token: token.map(str::to_string),
        ..Default::default()
    }
}

fn search(query: &str, token: Option<&str>) -> SearchDocsRequest {
    SearchDocsRequest {
        query: query.into(),
        member_token: token.map(str::to_string),
        ..Default::default()
    }
}

fn list(token: Option<&str>) -> ListBooksRequest {
    ListBooksRequest {
        member_token: token.map(str::to_string),
        ..Default::default()
    }
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_identity_resolution_cases() {
    let harness = TestHarness::new();
    let library = &harness.library;

    assert_eq!(library.identify("").await.unwrap(), Identity::Anonymous);
    assert_eq!(library.identify("nope").await.unwrap(), Identity::Anonymous);
    assert_eq!(library.identify(EXPIRED_TOKEN).await.unwrap(), Identity::Anonymous);
    assert_eq!(library.identify(REVOKED_TOKEN).await.unwrap(), Identity::Anonymous);
    assert_eq!(
        library.identify(MEMBER_TOKEN).await.unwrap().to_string(),
        "member:7"
    );
}

// ============================================================================
// get_doc
// ============================================================================

#[tokio::test]
async fn test_public_html_returns_release_verbatim() {
    let harness = TestHarness::new();
    let doc = harness
        .library
        .get_doc(&get_doc(5, "html", None))
        .await
        .unwrap();
    assert_eq!(doc.body, ContentBody::Native(INTRO_RELEASE.into()));
    assert_eq!(doc.title, "Intro");
    assert_eq!(doc.representation, Representation::Html);
    assert_eq!(
        doc.render(),
        format!("Title: Intro\nID: 5\nBook ID: 1\nFormat: html\n\n{INTRO_RELEASE}")
    );
}

#[tokio::test]
async fn test_member_without_role_gets_insufficient_permissions() {
    let harness = TestHarness::new();
    let err = harness
        .library
        .get_doc(&get_doc(7, "markdown", Some(OUTSIDER_TOKEN)))
        .await
        .unwrap_err();
    assert_eq!(err.denial_reason(), Some(DenialReason::InsufficientPermissions));
    assert_eq!(
        err.to_string(),
        "Access denied: Insufficient permissions for this private book"
    );
}

#[tokio::test]
async fn test_anonymous_on_private_book_needs_credential() {
    let harness = TestHarness::new();
    for token in [None, Some(EXPIRED_TOKEN), Some(REVOKED_TOKEN)] {
        let err = harness
            .library
            .get_doc(&get_doc(7, "html", token))
            .await
            .unwrap_err();
        assert_eq!(err.denial_reason(), Some(DenialReason::CredentialRequired));
        assert_eq!(
            err.to_string(),
            "Access denied: Private book requires valid member_token"
        );
    }
}

#[tokio::test]
async fn test_member_with_role_reads_private_document() {
    let harness = TestHarness::new();
    let doc = harness
        .library
        .get_doc(&get_doc(7, "markdown", Some(MEMBER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(doc.body, ContentBody::Native("# Onboarding".into()));
}

#[tokio::test]
async fn test_missing_markdown_falls_back_with_label() {
    let harness = TestHarness::new();
    let doc = harness
        .library
        .get_doc(&get_doc(5, "markdown", None))
        .await
        .unwrap();
    assert!(!doc.body.is_native());
    let text = doc.render();
    assert!(text.contains(MARKDOWN_FALLBACK_LABEL));
    assert!(text.ends_with(INTRO_RELEASE));
}

#[tokio::test]
async fn test_text_prefers_stored_content() {
    let harness = TestHarness::new();
    let native = harness
        .library
        .get_doc(&get_doc(5, "text", None))
        .await
        .unwrap();
    assert_eq!(native.body.into_text(), "Intro. Welcome to the guide");

    let fallback = harness
        .library
        .get_doc(&get_doc(6, "text", None))
        .await
        .unwrap();
    assert_eq!(fallback.body.into_text(), "<p>Install the guide tools</p>");
}

#[tokio::test]
async fn test_lookup_by_book_and_identify() {
    let harness = TestHarness::new();
    let request = GetDocRequest {
        identify: Some("setup".into()),
        book_id: Some(1),
        ..Default::default()
    };
    let doc = harness.library.get_doc(&request).await.unwrap();
    assert_eq!(doc.document_id.0, 6);
    assert_eq!(doc.representation, Representation::Markdown);
    assert!(doc.body.is_native());
}

#[tokio::test]
async fn test_get_doc_is_idempotent() {
    let harness = TestHarness::new();
    let request = get_doc(5, "markdown", Some(MEMBER_TOKEN));
    let first = harness.library.get_doc(&request).await.unwrap();
    let second = harness.library.get_doc(&request).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_not_found_cases() {
    let harness = TestHarness::new();

    let err = harness
        .library
        .get_doc(&get_doc(404, "markdown", None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound));

    let err = harness
        .library
        .get_doc(&GetDocRequest {
            identify: Some("setup".into()),
            book_id: Some(3),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound));

    let err = harness
        .library
        .get_doc(&get_doc(8, "markdown", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().starts_with("Associated book not found"));
}

#[tokio::test]
async fn test_store_failures_are_not_reported_as_not_found() {
    for operation in ["find_document", "find_book", "field"] {
        let harness = TestHarness::failing_on(operation);
        let err = harness
            .library
            .get_doc(&get_doc(6, "markdown", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure, "{operation}");
        match err {
            Error::StoreFailure { operation: failed, .. } => assert_eq!(failed, operation),
            other => panic!("expected StoreFailure for {operation}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_private_book_role_check_failure_propagates() {
    let harness = TestHarness::failing_on("has_access");
    let err = harness
        .library
        .get_doc(&get_doc(7, "markdown", Some(MEMBER_TOKEN)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreFailure);
    assert!(err.to_string().starts_with("Store failure during has_access"));
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_store() {
    let harness = TestHarness::new();

    let err = harness
        .library
        .get_doc(&get_doc(5, "pdf", Some(MEMBER_TOKEN)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);

    let err = harness
        .library
        .get_doc(&GetDocRequest {
            identify: Some("setup".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLocator { .. }));

    assert_eq!(harness.queries(), 0);
}

// ============================================================================
// search_docs
// ============================================================================

#[tokio::test]
async fn test_empty_query_makes_no_store_call() {
    let harness = TestHarness::new();
    let err = harness
        .library
        .search_docs(&search("", Some(MEMBER_TOKEN)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyQuery));
    assert_eq!(err.to_string(), "Query is required");
    assert_eq!(harness.queries(), 0);
}

#[tokio::test]
async fn test_search_is_scoped_to_identity() {
    let harness = TestHarness::new();

    let anonymous = harness.library.search_docs(&search("guide", None)).await.unwrap();
    let ids: Vec<_> = anonymous.items.iter().map(|h| h.document_id.0).collect();
    assert_eq!(ids, [6, 5]);
    assert_eq!(anonymous.total, 2);

    let member = harness
        .library
        .search_docs(&search("guide", Some(MEMBER_TOKEN)))
        .await
        .unwrap();
    let ids: Vec<_> = member.items.iter().map(|h| h.document_id.0).collect();
    assert_eq!(ids, [7, 6, 5]);
    assert_eq!(member.items[0].book_name, "Team Handbook");
    assert_eq!(member.items[0].snippet, "Team guide onboarding");
}

#[tokio::test]
async fn test_search_book_filter_and_paging() {
    let harness = TestHarness::with_settings(LibrarySettings {
        search_page_size: 1,
        ..Default::default()
    });

    let request = SearchDocsRequest {
        book_id: Some(1),
        page: Some(2),
        ..search("guide", Some(MEMBER_TOKEN))
    };
    let page = harness.library.search_docs(&request).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].document_id.0, 5);
}

// ============================================================================
// list_books
// ============================================================================

#[tokio::test]
async fn test_anonymous_lists_public_books_by_order_index() {
    let harness = TestHarness::new();
    let page = harness.library.list_books(&list(None)).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Atlas", "Public Guide"]);
    assert!(page.items.iter().all(|b| b.visibility == Visibility::Public));
    assert_eq!(page.items[0].snippet.as_deref(), Some("About Atlas"));
}

#[tokio::test]
async fn test_member_lists_authorized_private_books() {
    let harness = TestHarness::new();

    let member = harness.library.list_books(&list(Some(MEMBER_TOKEN))).await.unwrap();
    let names: Vec<_> = member.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Atlas", "Team Handbook", "Public Guide"]);
    assert_eq!(member.items[1].visibility, Visibility::Private);

    let outsider = harness
        .library
        .list_books(&list(Some(OUTSIDER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(outsider.total, 2);
}

#[tokio::test]
async fn test_list_books_order_override() {
    let harness = TestHarness::new();
    let request = ListBooksRequest {
        order: Some("newest".into()),
        ..list(None)
    };
    let page = harness.library.list_books(&request).await.unwrap();
    let ids: Vec<_> = page.items.iter().map(|b| b.id.0).collect();
    assert_eq!(ids, [3, 1]);
}
