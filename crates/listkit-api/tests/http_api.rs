//! HTTP API integration tests against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use listkit_api::{create_router, ApiConfig, AppState};
use listkit_export::{ChannelRegistry, ExportService, HttpImageFetcher};
use listkit_models::{
    Channel, ChannelId, ChannelOverride, ChannelRules, FormatCategory, ImageRef, ListingBase,
    ListingId, ListingRecord,
};
use listkit_store::MemoryStore;

fn listing(id: &str) -> ListingRecord {
    ListingRecord {
        base: ListingBase {
            id: ListingId::from_string(id),
            title: "Hand-thrown ceramic mug".to_string(),
            description: "A sturdy mug with a matte glaze.".to_string(),
            price: 32.0,
            quantity: 4,
            category: "Mugs".to_string(),
            materials: vec!["stoneware".to_string()],
            images: vec![ImageRef::new("https://img.example/1.jpg", 1)],
            video_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        overrides: vec![ChannelOverride {
            channel_id: ChannelId::from_string("chan-etsy"),
            channel_slug: "etsy".to_string(),
            tags: Some(vec!["mug".to_string(), "ceramic".to_string()]),
            ..Default::default()
        }],
    }
}

async fn test_app() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    store
        .seed_channels(ChannelRegistry::standard().channels().to_vec())
        .await;
    store.seed_listing(listing("listing-1")).await;

    let shared = Arc::new(store.clone());
    let service = ExportService::new(
        shared.clone(),
        shared.clone(),
        shared.clone(),
        shared,
        Arc::new(HttpImageFetcher::new()),
    );

    let state = AppState::with_service(ApiConfig::default(), Arc::new(service));
    (create_router(state, None), store)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_flat_file_export_round_trip() {
    let (app, store) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/listings/listing-1/channels/chan-etsy/export")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"format":"flat_file"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["file"]["encoding"], "utf8");
    assert_eq!(json["file"]["content_type"], "text/csv");
    assert!(json["file"]["content"]
        .as_str()
        .unwrap()
        .starts_with("TITLE,DESCRIPTION"));
    assert_eq!(json["validation"]["is_ready"], true);

    // The export was logged.
    assert_eq!(store.export_log_len().await, 1);
}

#[tokio::test]
async fn test_export_defaults_to_flat_file_without_body() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/listings/listing-1/channels/chan-etsy/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["file"]["name"]
        .as_str()
        .unwrap()
        .ends_with("_etsy_bulk_upload.csv"));
}

#[tokio::test]
async fn test_overlong_title_is_refused_with_400() {
    let (app, store) = test_app().await;

    let mut record = listing("listing-long");
    record.base.title = "x".repeat(150);
    store.seed_listing(record).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/listings/listing-long/channels/chan-etsy/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["validation"]["is_ready"], false);
    let errors = json["validation"]["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("140")));
}

#[tokio::test]
async fn test_unknown_listing_is_404() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/listings/ghost/channels/chan-etsy/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_channel_lists_supported_slugs() {
    let (app, store) = test_app().await;

    // A channel the store knows but no exporter handles.
    store
        .seed_channel(Channel::new(
            ChannelId::from_string("chan-artfire"),
            "artfire",
            "ArtFire",
            FormatCategory::FlatText,
            ChannelRules {
                title_max_length: 100,
                description_max_length: 10_000,
                tags: None,
                bullets: None,
                min_images: 1,
                recommended_images: None,
                requires_materials: false,
            },
        ))
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/listings/listing-1/channels/chan-artfire/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    let supported: Vec<&str> = json["supported_channels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(supported.contains(&"etsy"));
    assert!(supported.contains(&"shopify"));
}

#[tokio::test]
async fn test_preflight_returns_checks_without_side_effects() {
    let (app, store) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/listings/listing-1/channels/chan-etsy/preflight")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["channel_slug"], "etsy");
    assert!(!json["preflight_checks"].as_array().unwrap().is_empty());

    // Preflight never logs or marks anything.
    assert_eq!(store.export_log_len().await, 0);
}

#[tokio::test]
async fn test_channel_catalog() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/channels")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let channels = json["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 6);

    let amazon = channels
        .iter()
        .find(|c| c["slug"] == "amazon-handmade")
        .unwrap();
    assert_eq!(amazon["supports_flat_file"], false);

    let etsy = channels.iter().find(|c| c["slug"] == "etsy").unwrap();
    assert_eq!(etsy["supports_flat_file"], true);
    assert_eq!(etsy["rules"]["title_max_length"], 140);
}
