//! Integration test: local HTTP server with canned pages, fetched through curl.
//!
//! Exercises the real fetcher, HTML parsing, and the orchestrator end to end.

mod common;

use common::page_server::{self, Page};
use http::{Request, StatusCode};
use unfurl_core::config::UnfurlConfig;
use unfurl_core::error::UnfurlError;
use unfurl_core::fetch::TransportKind;
use unfurl_core::{Resolution, Unfurler};

const HOME: &str = r##"<!doctype html><html><head>
<meta name="theme-color" content="#123456">
<link rel="icon" sizes="16x16" href="/favicon-16.png">
<link rel="icon" sizes="192x192" href="/favicon-192.png">
</head><body>hello</body></html>"##;

const NOT_FOUND: &str = r#"<html><head>
<link rel="shortcut icon" href="/favicon.ico">
</head><body>missing</body></html>"#;

/// Icon tags up front, then well past the fetcher's body cap.
fn oversized_page() -> String {
    let filler = "<p>filler</p>\n".repeat(6 * 1024 * 1024 / 14);
    format!("{}{}", HOME.replace("</body></html>", ""), filler)
}

fn server() -> String {
    page_server::start(vec![
        ("/huge", Page::html("200 OK", &oversized_page())),
        ("/", Page::html("200 OK", HOME)),
        ("/boom", Page::html("500 Internal Server Error", HOME)),
        ("/gone", Page::html("404 Not Found", NOT_FOUND)),
        ("/old", Page::redirect("/")),
        ("/plain", Page::html("200 OK", "<p>no head here</p>")),
    ])
}

fn unfurler() -> Unfurler {
    Unfurler::from_config(&UnfurlConfig::default())
}

#[tokio::test]
async fn fetches_page_and_picks_largest_icon() {
    let base = server();
    let r = unfurler().unfurl(&format!("{}/", base)).await.unwrap();
    assert_eq!(r.icon, format!("{}/favicon-192.png", base));
    assert_eq!(r.theme.as_deref(), Some("#123456"));
}

#[tokio::test]
async fn server_error_page_uses_fallback() {
    let base = server();
    let r = unfurler().unfurl(&format!("{}/boom", base)).await.unwrap();
    assert_eq!(
        r,
        Resolution {
            icon: "/public/images/hl3confirmed.jpg?badStatus500".to_string(),
            theme: None,
        }
    );
}

#[tokio::test]
async fn not_found_page_is_still_parsed() {
    let base = server();
    let r = unfurler().unfurl(&format!("{}/gone", base)).await.unwrap();
    assert_eq!(r.icon, format!("{}/favicon.ico", base));
}

#[tokio::test]
async fn redirects_are_followed() {
    let base = server();
    let r = unfurler().unfurl(&format!("{}/old", base)).await.unwrap();
    assert_eq!(r.icon, format!("{}/favicon-192.png", base));
}

#[tokio::test]
async fn oversized_page_is_truncated_not_failed() {
    let base = server();
    let r = unfurler().unfurl(&format!("{}/huge", base)).await.unwrap();
    assert_eq!(r.icon, format!("{}/favicon-192.png", base));
    assert_eq!(r.theme.as_deref(), Some("#123456"));
}

#[tokio::test]
async fn page_without_icons_marks_none() {
    let base = server();
    let r = unfurler().unfurl(&format!("{}/plain", base)).await.unwrap();
    assert_eq!(r.icon, "/public/images/hl3confirmed.jpg?none");
    assert_eq!(r.theme, None);
}

#[tokio::test]
async fn unreachable_target_is_fetch_error() {
    let base = page_server::closed_port();
    let err = unfurler().unfurl(&format!("{}/", base)).await.unwrap_err();
    match err {
        UnfurlError::Fetch(e) => assert_eq!(e.kind, TransportKind::Connection),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn handle_serves_repeat_requests_from_cache() {
    let base = server();
    let u = unfurler();
    let uri = format!("/?target={}/", base);
    let req = Request::builder()
        .uri(uri.as_str())
        .header("Origin", "https://www.devconf.co.za")
        .body(())
        .unwrap();

    let first = u.handle(&req).await;
    assert_eq!(first.response.status(), StatusCode::OK);
    first.store.expect("allowed origin is cached").await.unwrap();

    let second = u.handle(&req).await;
    assert_eq!(second.response.status(), StatusCode::OK);
    assert!(second.store.is_none(), "cache hit schedules no store");
    assert_eq!(second.response.body(), first.response.body());
}

#[tokio::test]
async fn unreachable_target_via_handle_is_500() {
    let base = page_server::closed_port();
    let req = Request::builder()
        .uri(format!("/?target={}/", base))
        .header("Origin", "http://localhost:3000")
        .body(())
        .unwrap();
    let handled = unfurler().handle(&req).await;
    assert_eq!(handled.response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(handled.response.body().starts_with("GET "));
}
