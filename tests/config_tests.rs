//! Configuration and catalog file loading

use axum_test::TestServer;
use navora::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const TWO_LISTINGS: &str = r#"
listings:
  - id: "a"
    name: "TinyBot"
    creator: "Sam"
    creatorId: "u1"
    price: 5
    rating: 3.5
    description: "A very small helper"
    shortDescription: "Small helper"
    category: "Education"
    tags: ["tutoring"]
    modelType: "Custom AI"
    createdAt: "2024-01-01T00:00:00Z"
    updatedAt: "2024-01-02T00:00:00Z"
  - id: "b"
    name: "BigBot"
    creator: "Sam"
    creatorId: "u1"
    price: 150
    rating: 4.1
    description: "A very large helper"
    shortDescription: "Large helper"
    category: "Finance"
    tags: ["budgeting", "tutoring"]
    modelType: "GPT-4"
    createdAt: "2024-01-01T00:00:00Z"
    updatedAt: "2024-01-02T00:00:00Z"
    featured: true
reviews:
  - id: "r1"
    agentId: "b"
    userId: "u9"
    userName: "Kim"
    rating: 4
    comment: "Solid"
    date: "2024-02-01T00:00:00Z"
"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_temp(
        r#"
server:
  host: "0.0.0.0"
  port: 8088
contact:
  inbox_capacity: 25
latency:
  catalog_ms: 800
  upload_ms: 3000
"#,
    );

    let config = NavoraConfig::from_yaml_file(file.path()).expect("config should load");
    assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8088");
    assert_eq!(config.latency.catalog(), Duration::from_millis(800));
    assert_eq!(config.latency.upload(), Duration::from_secs(3));
    assert_eq!(config.latency.auth(), Duration::ZERO);
    assert_eq!(config.contact.inbox_capacity, 25);
}

#[test]
fn test_missing_config_file() {
    let err = NavoraConfig::from_yaml_file("/nonexistent/navora.yaml").unwrap_err();
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::FileNotFound { path }) => assert!(path.contains("navora.yaml")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_malformed_config_file() {
    let file = write_temp("server:\n  port: not-a-port\n");
    let err = NavoraConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ParseError { .. })
    ));
}

#[tokio::test]
async fn test_server_uses_configured_catalog() {
    let catalog = write_temp(TWO_LISTINGS);
    let mut config = NavoraConfig::default();
    config.catalog.path = Some(catalog.path().display().to_string());

    let app = ServerBuilder::new()
        .with_config(config)
        .build()
        .expect("Failed to build app");
    let server = TestServer::new(app).expect("Failed to create test server");

    let body: Value = server.get("/api/agents").await.json();
    assert_eq!(body["count"], 2);

    let body: Value = server.get("/api/agents?maxPrice=100&tag=tutoring").await.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "TinyBot");

    let body: Value = server.get("/api/home").await.json();
    assert_eq!(body["featured"][0]["name"], "BigBot");

    let body: Value = server.get("/api/agents/b").await.json();
    assert_eq!(body["ratingSummary"]["average"], 4.0);
}

#[test]
fn test_invalid_catalog_file_is_rejected() {
    let broken = TWO_LISTINGS.replace("price: 5", "price: -5");
    let catalog = write_temp(&broken);

    let err = CatalogSeed::from_yaml_file(&catalog.path().display().to_string()).unwrap_err();
    match err.downcast_ref::<CatalogError>() {
        Some(CatalogError::InvalidListing { id, .. }) => assert_eq!(id, "a"),
        other => panic!("expected InvalidListing, got {:?}", other),
    }
}

#[test]
fn test_review_for_unknown_listing_is_rejected() {
    let broken = TWO_LISTINGS.replace("agentId: \"b\"", "agentId: \"zzz\"");
    let err = CatalogSeed::from_yaml_str(&broken).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidReview { .. }));
}

#[test]
fn test_duplicate_listing_id_is_rejected() {
    let broken = TWO_LISTINGS.replace("id: \"b\"", "id: \"a\"");
    let err = CatalogSeed::from_yaml_str(&broken).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId { .. }));
}
