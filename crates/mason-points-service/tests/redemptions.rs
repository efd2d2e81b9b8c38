//! Redemption placement and fulfilment integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

async fn place(
    harness: &TestHarness,
    mason_id: &str,
    reward_id: &str,
    quantity: i64,
) -> axum_test::TestResponse {
    harness
        .server
        .post("/v1/redemptions")
        .add_header("authorization", harness.mason_auth_header(mason_id))
        .json(&json!({
            "reward_id": reward_id,
            "quantity": quantity,
            "delivery": {"address": "12 Site Road", "phone": "+91-9000000002"}
        }))
        .await
}

async fn advance(
    harness: &TestHarness,
    redemption_id: &str,
    status: &str,
) -> axum_test::TestResponse {
    harness
        .server
        .post(&format!("/v1/redemptions/{redemption_id}/status"))
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({"status": status}))
        .await
}

// ============================================================================
// Placement
// ============================================================================

#[tokio::test]
async fn place_debits_catalogue_cost() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 40, 5).await;

    let response = place(&harness, &mason_id, &reward_id, 2).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["points_debited"], 80);
    assert_eq!(body["status"], "placed");
    assert_eq!(body["points_balance"], 20); // 100 bonus - 80 hold
}

#[tokio::test]
async fn place_with_insufficient_points_fails() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Drill kit", 500, 5).await;

    let response = place(&harness, &mason_id, &reward_id, 1).await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_points");
    assert_eq!(body["error"]["details"]["balance"], 100);
    assert_eq!(body["error"]["details"]["required"], 500);
}

#[tokio::test]
async fn place_beyond_stock_fails() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 10, 1).await;

    let response = place(&harness, &mason_id, &reward_id, 2).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_stock");
}

#[tokio::test]
async fn place_zero_quantity_fails() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 10, 5).await;

    let response = place(&harness, &mason_id, &reward_id, 0).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn place_inactive_reward_fails() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 10, 5).await;

    // Deactivate it.
    harness
        .server
        .put("/v1/rewards")
        .add_header("x-api-key", harness.operator_api_key.clone())
        .add_header("x-operator-id", harness.operator_id.clone())
        .json(&json!({
            "id": reward_id,
            "name": "Trowel set",
            "point_cost": 10,
            "stock": 5,
            "is_active": false
        }))
        .await
        .assert_status_ok();

    let response = place(&harness, &mason_id, &reward_id, 1).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "reward_inactive");
}

// ============================================================================
// Fulfilment
// ============================================================================

#[tokio::test]
async fn fulfilment_walks_the_status_chain() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 40, 5).await;

    let placed: serde_json::Value = place(&harness, &mason_id, &reward_id, 2).await.json();
    let redemption_id = placed["id"].as_str().unwrap().to_string();

    let approved = advance(&harness, &redemption_id, "approved").await;
    approved.assert_status_ok();

    // Approval takes the stock.
    let reward: serde_json::Value = harness
        .server
        .get(&format!("/v1/rewards/{reward_id}"))
        .await
        .json();
    assert_eq!(reward["stock"], 3);

    advance(&harness, &redemption_id, "shipped").await.assert_status_ok();
    let delivered = advance(&harness, &redemption_id, "delivered").await;
    delivered.assert_status_ok();
    let body: serde_json::Value = delivered.json();
    assert_eq!(body["status"], "delivered");
}

#[tokio::test]
async fn skipping_a_stage_conflicts() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 40, 5).await;

    let placed: serde_json::Value = place(&harness, &mason_id, &reward_id, 1).await.json();
    let redemption_id = placed["id"].as_str().unwrap().to_string();

    let response = advance(&harness, &redemption_id, "delivered").await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn rejection_refunds_held_points() {
    let harness = TestHarness::new();
    let mason_id = harness.enroll_mason("Ravi").await;
    let reward_id = harness.create_reward("Trowel set", 40, 5).await;

    let placed: serde_json::Value = place(&harness, &mason_id, &reward_id, 2).await.json();
    let redemption_id = placed["id"].as_str().unwrap().to_string();

    advance(&harness, &redemption_id, "rejected").await.assert_status_ok();

    let profile: serde_json::Value = harness
        .server
        .get("/v1/masons/me")
        .add_header("authorization", harness.mason_auth_header(&mason_id))
        .await
        .json();
    assert_eq!(profile["points_balance"], 100);
}
