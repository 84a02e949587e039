//! HTTP binding tests
//!
//! Exercises the actix handlers end to end against the in-memory store:
//! status codes, the Location header, and error bodies.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::json;

use snipurl::api::register_routes;
use snipurl::config::AppConfig;
use snipurl::services::{Redirector, Shortener};
use snipurl::store::RecordStore;
use snipurl::store::memory::MemoryStore;

// =============================================================================
// Test Setup
// =============================================================================

fn test_config() -> AppConfig {
    AppConfig {
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        base_url: "https://snip.example".to_string(),
        store_backend: "memory".to_string(),
        redis_url: "redis://127.0.0.1:6379".to_string(),
        key_prefix: "snipurl:".to_string(),
    }
}

macro_rules! test_app {
    ($store:expr) => {{
        let config = test_config();
        let shortener = Arc::new(Shortener::new($store.clone(), &config));
        let redirector = Arc::new(Redirector::new($store.clone()));

        test::init_service(
            App::new()
                .app_data(web::Data::new(shortener))
                .app_data(web::Data::new(redirector))
                .configure(register_routes),
        )
        .await
    }};
}

// =============================================================================
// POST /shorten
// =============================================================================

#[actix_rt::test]
async fn shorten_returns_plaintext_short_url() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let app = test_app!(store);

    let req = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({"url": "https://example.com/page"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let short_url = String::from_utf8(body.to_vec()).unwrap();
    assert!(short_url.starts_with("https://snip.example/"));
}

#[actix_rt::test]
async fn shorten_with_empty_url_is_bad_request() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let app = test_app!(store);

    let req = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({"url": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty(), "failed shorten must not write");
}

#[actix_rt::test]
async fn shorten_with_missing_url_field_is_bad_request() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let app = test_app!(store);

    let req = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// GET /{id}
// =============================================================================

#[actix_rt::test]
async fn redirect_answers_308_with_location_header() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let app = test_app!(store);

    // Create through the real shorten endpoint, then follow the id.
    let req = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({"url": "https://example.com/page"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let short_url = String::from_utf8(body.to_vec()).unwrap();
    let id = short_url.rsplit('/').next().unwrap().to_string();

    let req = TestRequest::get().uri(&format!("/{id}")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/page"
    );
}

#[actix_rt::test]
async fn head_request_is_not_routed_and_counts_no_hit() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let app = test_app!(store);

    let req = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({"url": "https://example.com/page"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let short_url = String::from_utf8(body.to_vec()).unwrap();
    let id = short_url.rsplit('/').next().unwrap().to_string();

    // Only GET resolves a short id; a HEAD must never count a visit.
    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri(&format!("/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.status(), StatusCode::PERMANENT_REDIRECT);

    let record = store.get(&id).await.unwrap().unwrap();
    assert_eq!(record.hit_count, 0, "HEAD must not increment the hit count");
}

#[actix_rt::test]
async fn redirect_of_unknown_id_is_not_found() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let app = test_app!(store);

    let req = TestRequest::get().uri("/zzzzz").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
