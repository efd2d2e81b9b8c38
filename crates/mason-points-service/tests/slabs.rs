//! Scheme slab claim and adjustment integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

async fn create_slab(harness: &TestHarness, points_earned: i64) -> String {
    let response = harness
        .server
        .put("/v1/slabs")
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({
            "name": "Gold",
            "min_bags_best": 500,
            "min_bags_others": 600,
            "points_earned": points_earned
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Claims
// ============================================================================

#[tokio::test]
async fn claim_credits_slab_points() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let slab_id = create_slab(&harness, 1500).await;

    let response = harness
        .server
        .post(&format!("/v1/slabs/{slab_id}/claim"))
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["points_awarded"], 1500);
    assert_eq!(body["points_balance"], 1600); // 100 bonus + 1500 slab
}

#[tokio::test]
async fn second_claim_reports_already_claimed() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let slab_id = create_slab(&harness, 1500).await;
    let url = format!("/v1/slabs/{slab_id}/claim");

    harness
        .server
        .post(&url)
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await
        .assert_status_ok();

    let second = harness
        .server
        .post(&url)
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await;

    second.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = second.json();
    assert_eq!(body["error"]["code"], "already_claimed");

    // No second credit.
    let profile: serde_json::Value = harness
        .server
        .get("/v1/masons/me")
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await
        .json();
    assert_eq!(profile["points_balance"], 1600);
}

#[tokio::test]
async fn claim_unknown_slab_is_not_found() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .post(&format!("/v1/slabs/{}/claim", uuid::Uuid::new_v4()))
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Manual Adjustments
// ============================================================================

#[tokio::test]
async fn adjustment_moves_balance_both_ways() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .post(&format!("/v1/masons/{mason_id}/adjustments"))
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({"points": -30, "memo": "Duplicate submission"}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["points_balance"], 70);
}

#[tokio::test]
async fn zero_adjustment_is_rejected() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .post(&format!("/v1/masons/{mason_id}/adjustments"))
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({"points": 0, "memo": "Nothing"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn adjustment_requires_operator_auth() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;

    let response = harness
        .server
        .post(&format!("/v1/masons/{mason_id}/adjustments"))
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .json(&json!({"points": 10, "memo": "Backdoor"}))
        .await;

    response.assert_status_unauthorized();
}
