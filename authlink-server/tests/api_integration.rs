//! API integration tests for authlink-server.
//!
//! These tests drive the HTTP API through the router with mocked trust
//! authorities, covering the full verify flow and its failure shapes.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use authlink_core::{
    MockRegistryClient, MockTagVerifier, NfcData, ProductRecord, Verifier,
};
use authlink_server::{create_router, AppState};

fn sample_nfc_data() -> NfcData {
    NfcData {
        uid: "TAG123".into(),
        read_ctr: 5,
        enc_mode: "AES128".into(),
    }
}

fn sample_product() -> ProductRecord {
    ProductRecord {
        owner: "ownerX".into(),
        nfc_id: "TAG123".into(),
        product_id: "PRD-001".into(),
        product_account: "acct1".into(),
    }
}

/// Build a test app over mocked SDM and registry backends.
fn create_test_app(tag: MockTagVerifier, registry: MockRegistryClient) -> Router {
    let verifier = Arc::new(Verifier::new(Arc::new(tag), Arc::new(registry)));
    create_router(AppState::new(verifier))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// ============================================================================
// Health & Readiness Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = create_test_app(
        MockTagVerifier::rejected("unused"),
        MockRegistryClient::unavailable("unused"),
    );

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "authlink-server");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_ready_endpoint_returns_ok() {
    let app = create_test_app(
        MockTagVerifier::rejected("unused"),
        MockRegistryClient::unavailable("unused"),
    );

    let (status, json) = get_json(app, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
}

// ============================================================================
// Dual-Factor Verification Tests
// ============================================================================

#[tokio::test]
async fn test_verify_both_factors_pass() {
    let app = create_test_app(
        MockTagVerifier::verified(sample_nfc_data()),
        MockRegistryClient::authentic(sample_product()),
    );

    let (status, json) = get_json(app, "/verify?uid=TAG123&ctr=5&cmac=ABCDEF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["nfcVerified"], true);
    assert_eq!(json["blockchainVerified"], true);
    assert_eq!(json["nfcData"]["uid"], "TAG123");
    assert_eq!(json["nfcData"]["read_ctr"], 5);
    assert_eq!(json["nfcData"]["enc_mode"], "AES128");
    assert_eq!(json["blockchainData"]["product"]["productId"], "PRD-001");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_verify_missing_parameters_is_structured_verdict() {
    let app = create_test_app(
        MockTagVerifier::verified(sample_nfc_data()),
        MockRegistryClient::authentic(sample_product()),
    );

    let (status, json) = get_json(app, "/verify?uid=TAG123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["nfcVerified"], false);
    assert_eq!(json["blockchainVerified"], false);
    assert!(json.get("nfcData").is_none());
    assert!(json.get("blockchainData").is_none());
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Missing required parameters"));
}

#[tokio::test]
async fn test_verify_tag_rejection() {
    let app = create_test_app(
        MockTagVerifier::rejected("mac mismatch"),
        MockRegistryClient::authentic(sample_product()),
    );

    let (status, json) = get_json(app, "/verify?uid=TAG123&ctr=5&cmac=ABCDEF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["nfcVerified"], false);
    assert_eq!(json["blockchainVerified"], false);
    assert!(json.get("blockchainData").is_none());
    assert_eq!(json["error"], "NFC verification failed: mac mismatch");
}

#[tokio::test]
async fn test_verify_registry_negative_preserves_nfc_success() {
    let app = create_test_app(
        MockTagVerifier::verified(sample_nfc_data()),
        MockRegistryClient::not_authentic("TAG123"),
    );

    let (status, json) = get_json(app, "/verify?uid=TAG123&ctr=5&cmac=ABCDEF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["nfcVerified"], true);
    assert_eq!(json["blockchainVerified"], false);
    assert_eq!(json["blockchainData"]["isAuthentic"], false);
    assert_eq!(
        json["error"],
        "Blockchain verification failed: Product not found or not authentic"
    );
}

#[tokio::test]
async fn test_verify_detail_fetch_degradation_still_succeeds() {
    let app = create_test_app(
        MockTagVerifier::verified(sample_nfc_data()),
        MockRegistryClient::authentic_without_details("TAG123"),
    );

    let (status, json) = get_json(app, "/verify?uid=TAG123&ctr=5&cmac=ABCDEF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["blockchainVerified"], true);
    assert!(json["blockchainData"].get("product").is_none());
}

// ============================================================================
// Legacy Tag-Only Verification Tests
// ============================================================================

#[tokio::test]
async fn test_verify_tag_only_success() {
    let app = create_test_app(
        MockTagVerifier::verified(sample_nfc_data()),
        MockRegistryClient::unavailable("TAG123"),
    );

    let (status, json) = get_json(app, "/verify/tag?uid=TAG123&ctr=5&cmac=ABCDEF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["uid"], "TAG123");
    assert_eq!(json["result"]["read_ctr"], 5);
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_verify_tag_only_rejection() {
    let app = create_test_app(
        MockTagVerifier::rejected("mac mismatch"),
        MockRegistryClient::unavailable("TAG123"),
    );

    let (status, json) = get_json(app, "/verify/tag?uid=TAG123&ctr=5&cmac=ABCDEF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], "mac mismatch");
    assert!(json.get("result").is_none());
}

#[tokio::test]
async fn test_verify_tag_only_missing_parameters() {
    let app = create_test_app(
        MockTagVerifier::verified(sample_nfc_data()),
        MockRegistryClient::unavailable("TAG123"),
    );

    let (status, json) = get_json(app, "/verify/tag").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Missing required parameters"));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = create_test_app(
        MockTagVerifier::rejected("unused"),
        MockRegistryClient::unavailable("unused"),
    );

    let (status, json) = get_json(app, "/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

// ============================================================================
// OpenAPI Documentation Tests
// ============================================================================

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let app = create_test_app(
        MockTagVerifier::rejected("unused"),
        MockRegistryClient::unavailable("unused"),
    );

    let (status, json) = get_json(app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"].get("/verify").is_some());
    assert!(json["paths"].get("/verify/tag").is_some());
}
