mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use url_shortener_core::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_redirect_success() {
    let backends = common::Backends::new();
    backends
        .repository
        .save("https://example.com/target", "0000abc")
        .await
        .unwrap();
    let server = common::redirect_server(&backends);

    let response = server.get("/0000abc").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_percent_encodes_non_ascii_location() {
    let backends = common::Backends::new();
    backends
        .repository
        .save("https://example.com/ünï", "0000uni")
        .await
        .unwrap();
    let server = common::redirect_server(&backends);

    let response = server.get("/0000uni").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        "https://example.com/%C3%BCn%C3%AF"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let backends = common::Backends::new();
    let server = common::redirect_server(&backends);

    let response = server.get("/unknown").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert!(backends.cache.is_empty());
}

#[tokio::test]
async fn test_empty_code_returns_400() {
    let backends = common::Backends::new();
    let server = common::redirect_server(&backends);

    let response = server.get("/").await;
    response.assert_status_bad_request();

    let response = server.get("/api/v1/urls").await;
    response.assert_status_bad_request();

    assert_eq!(backends.repository.lookups(), 0);
}

#[tokio::test]
async fn test_second_redirect_is_served_from_cache() {
    let backends = common::Backends::new();
    backends
        .repository
        .save("https://example.com", "0000xyz")
        .await
        .unwrap();
    let server = common::redirect_server(&backends);

    for _ in 0..3 {
        let response = server.get("/0000xyz").await;
        assert_eq!(response.status_code(), StatusCode::FOUND);
    }

    assert_eq!(backends.repository.lookups(), 1);
    assert_eq!(backends.cache.len(), 1);
}

#[tokio::test]
async fn test_cached_code_resolves_while_store_is_offline() {
    let backends = common::Backends::new();
    backends
        .repository
        .save("https://example.com", "0000xyz")
        .await
        .unwrap();
    let server = common::redirect_server(&backends);

    server.get("/0000xyz").await;
    backends.repository.set_available(false);

    let response = server.get("/0000xyz").await;
    assert_eq!(response.status_code(), StatusCode::FOUND);

    let response = server.get("/0000nop").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "store_unavailable");
}

#[tokio::test]
async fn test_get_record_metadata() {
    let backends = common::Backends::new();
    let saved = backends
        .repository
        .save("https://example.com/meta", "0000met")
        .await
        .unwrap();
    let server = common::redirect_server(&backends);

    let response = server.get("/api/v1/urls/0000met").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], saved.id);
    assert_eq!(body["originalUrl"], "https://example.com/meta");
    assert_eq!(body["shortCode"], "0000met");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_get_record_metadata_not_found() {
    let backends = common::Backends::new();
    let server = common::redirect_server(&backends);

    let response = server.get("/api/v1/urls/nothere").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_created_code_redirects_through_other_service() {
    let backends = common::Backends::new();
    let convert = common::convert_server(&backends, 100).await;
    let redirect = common::redirect_server(&backends);

    let created: Value = convert
        .post("/api/v1/urls")
        .json(&json!({ "originalUrl": "https://example.com/e2e" }))
        .await
        .json();
    let code = created["shortCode"].as_str().unwrap();

    let response = redirect.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/e2e");
}
