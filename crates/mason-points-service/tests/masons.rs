//! Enrollment, profile and ledger integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

// ============================================================================
// Enrollment
// ============================================================================

#[tokio::test]
async fn enroll_credits_joining_bonus() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/masons")
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({"name": "Ravi", "phone": "+91-9000000001"}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["points_balance"], 100);
    assert_eq!(body["joining_bonus_points"], 100);
    assert_eq!(body["bags_lifted"], 0);
}

#[tokio::test]
async fn enroll_rejects_empty_name() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/masons")
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({"name": "  ", "phone": "+91-9000000001"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn enroll_requires_operator_key() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/masons")
        .json(&json!({"name": "Ravi", "phone": "+91-9000000001"}))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn enroll_rejects_wrong_operator_key() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/masons")
        .add_header("x-api-key", "wrong-key")
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({"name": "Ravi", "phone": "+91-9000000001"}))
        .await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn get_me_returns_profile() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .get("/v1/masons/me")
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], mason_id);
    assert_eq!(body["name"], "Ravi");
    assert_eq!(body["points_balance"], 100);
}

#[tokio::test]
async fn get_me_without_token_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/masons/me").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn get_me_with_garbage_token_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/masons/me")
        .add_header("authorization", "Bearer not-a-jwt")
        .await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Ledger History
// ============================================================================

#[tokio::test]
async fn ledger_shows_joining_bonus() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .get("/v1/masons/me/ledger")
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["points"], 100);
    assert_eq!(entries[0]["source_type"], "adjustment");
    assert_eq!(body["points_balance"], 100);
}

#[tokio::test]
async fn ledger_respects_pagination() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .get("/v1/masons/me/ledger?limit=0")
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["entries"].as_array().unwrap().is_empty());
}
